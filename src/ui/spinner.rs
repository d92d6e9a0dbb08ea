/// Loading spinner
/// A rotating grey arc, drawn on a canvas and advanced by window frames
use iced::widget::canvas::{self, path, LineCap, Path, Stroke};
use iced::{Color, Radians, Rectangle};

use crate::Message;

/// Radians per second
pub const SPEED: f32 = 5.0;

/// Portion of the circle covered by the arc
const SWEEP: f32 = std::f32::consts::PI * 1.5;

const TRACK: Color = Color::from_rgba(0.5, 0.5, 0.5, 0.25);
const ARC: Color = Color::from_rgb(0.5, 0.5, 0.5);

#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    /// Start angle of the arc in radians
    pub rotation: f32,
    pub thickness: f32,
}

impl Spinner {
    pub fn new(rotation: f32) -> Self {
        Self {
            rotation,
            thickness: 4.0,
        }
    }
}

/// Advance a rotation by `seconds`, wrapped to one turn
pub fn advance(rotation: f32, seconds: f32) -> f32 {
    (rotation + SPEED * seconds).rem_euclid(std::f32::consts::TAU)
}

impl canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let center = frame.center();
        let radius = (bounds.width.min(bounds.height) / 2.0 - self.thickness).max(1.0);

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_color(TRACK).with_width(self.thickness),
        );

        let arc = Path::new(|builder| {
            builder.arc(path::Arc {
                center,
                radius,
                start_angle: Radians(self.rotation),
                end_angle: Radians(self.rotation + SWEEP),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_color(ARC)
                .with_width(self.thickness)
                .with_line_cap(LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

/// Spinner widget of the given size
pub fn view<'a>(rotation: f32, size: f32) -> iced::Element<'a, Message> {
    canvas::Canvas::new(Spinner::new(rotation))
        .width(iced::Length::Fixed(size))
        .height(iced::Length::Fixed(size))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps() {
        let r = advance(6.0, 1.0);
        assert!(r >= 0.0 && r < std::f32::consts::TAU);
        assert!((r - (11.0 - std::f32::consts::TAU)).abs() < 1e-4);
    }

    #[test]
    fn test_advance_small_step() {
        assert!((advance(0.0, 0.1) - 0.5).abs() < 1e-6);
    }
}
