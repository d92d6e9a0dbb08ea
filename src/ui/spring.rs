/// Focus animation
///
/// `focused` in the gallery state is the source of truth; this module owns
/// the animated `scale` that chases it and the two visuals derived from it.
/// The action bar offset and the corner radius are linear in `scale` and
/// hold no state of their own.

use std::time::Duration;

/// Scale of the page at rest when focused / unfocused
pub const FOCUSED_SCALE: f32 = 0.9;
pub const UNFOCUSED_SCALE: f32 = 1.0;

/// Height of the action bar in logical pixels
pub const ACTION_BAR_HEIGHT: f32 = 80.0;

/// Corner radius of the page at `FOCUSED_SCALE`
pub const FOCUSED_CORNER_RADIUS: f32 = 30.0;

// Tension 40 / friction 7 expressed as a damped oscillator with unit mass
const STIFFNESS: f32 = 230.2;
const DAMPING: f32 = 22.0;

// Considered at rest below both thresholds
const REST_DISPLACEMENT: f32 = 0.001;
const REST_SPEED: f32 = 0.001;

/// Integration step (1 ms keeps semi-implicit Euler stable at this stiffness)
const STEP: f32 = 0.001;

/// Longest frame gap fed into the simulation; a stalled window resumes
/// the animation instead of jumping to the end
const MAX_FRAME: Duration = Duration::from_millis(64);

/// Target scale for a focus value
pub fn focus_scale(focused: bool) -> f32 {
    if focused {
        FOCUSED_SCALE
    } else {
        UNFOCUSED_SCALE
    }
}

/// Map `scale` in [0.9, 1.0] linearly onto [from, to], clamping outside
fn interpolate(scale: f32, from: f32, to: f32) -> f32 {
    let t = ((scale - FOCUSED_SCALE) / (UNFOCUSED_SCALE - FOCUSED_SCALE)).clamp(0.0, 1.0);
    from + (to - from) * t
}

/// Vertical offset of the action bar: 0 (shown) at 0.9, -80 (hidden) at 1.0
pub fn action_bar_offset(scale: f32) -> f32 {
    interpolate(scale, 0.0, -ACTION_BAR_HEIGHT)
}

/// Page corner radius: 30 at 0.9, square at 1.0
pub fn corner_radius(scale: f32) -> f32 {
    interpolate(scale, FOCUSED_CORNER_RADIUS, 0.0)
}

/// Damped spring driving a single value toward a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// A spring at rest at `value`
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Start moving toward `target`, keeping the current velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_animating(&self) -> bool {
        self.velocity != 0.0 || self.value != self.target
    }

    /// Advance the simulation by `elapsed`
    pub fn step(&mut self, elapsed: Duration) {
        if !self.is_animating() {
            return;
        }

        let mut remaining = elapsed.min(MAX_FRAME).as_secs_f32();
        while remaining > 0.0 {
            let dt = remaining.min(STEP);
            let acceleration = -STIFFNESS * (self.value - self.target) - DAMPING * self.velocity;
            self.velocity += acceleration * dt;
            self.value += self.velocity * dt;
            remaining -= dt;
        }

        if (self.value - self.target).abs() < REST_DISPLACEMENT
            && self.velocity.abs() < REST_SPEED
        {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// Run until at rest (bounded)
    #[cfg(test)]
    pub fn settle(&mut self) {
        for _ in 0..1_000 {
            if !self.is_animating() {
                return;
            }
            self.step(MAX_FRAME);
        }
        self.value = self.target;
        self.velocity = 0.0;
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(UNFOCUSED_SCALE)
    }
}
