/// User interface module
///
/// - `spring.rs` - focus animation and the visuals derived from it
/// - `spinner.rs` - canvas-drawn loading spinner
/// - `loading.rs` - screen shown until the first batch arrives
/// - `page.rs` - one full-window wallpaper with its overlays
/// - `action_bar.rs` - refresh / share / save row

pub mod action_bar;
pub mod loading;
pub mod page;
pub mod spinner;
pub mod spring;

use iced::widget::container;
use iced::{Color, Theme};

pub const TEXT_MUTED: Color = Color::from_rgb(0.6, 0.6, 0.6);

/// Solid black backdrop
pub fn black(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::BLACK.into()),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}

/// Translucent strip behind overlay text
pub fn scrim(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.45).into()),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}
