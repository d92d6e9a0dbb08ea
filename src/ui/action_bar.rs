/// Floating action bar
/// Slides up from below the window as the page shrinks into focus
use iced::alignment::Vertical;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use super::black;
use super::spring::ACTION_BAR_HEIGHT;
use crate::Message;

/// Visible height of the bar for a given offset (0 = fully shown,
/// -80 = fully below the window edge)
pub fn visible_height(offset: f32) -> f32 {
    (ACTION_BAR_HEIGHT + offset).clamp(0.0, ACTION_BAR_HEIGHT)
}

fn action<'a>(icon: &'a str, label: &'a str, message: Message) -> Element<'a, Message> {
    let content = column![text(icon).size(30), text(label).size(11)]
        .spacing(2)
        .align_x(Alignment::Center);

    container(
        button(content)
            .style(button::text)
            .padding(6)
            .on_press(message),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

pub fn view<'a>(offset: f32) -> Element<'a, Message> {
    let bar = container(row![
        action("⟳", "Refresh", Message::Refresh),
        action("⇪", "Share", Message::Share),
        action("⤓", "Save", Message::Save),
    ])
    .width(Length::Fill)
    .height(Length::Fixed(ACTION_BAR_HEIGHT))
    .style(black);

    // Clip the bar to the part that has slid into view
    let window = container(bar)
        .width(Length::Fill)
        .height(Length::Fixed(visible_height(offset)))
        .align_y(Vertical::Top)
        .clip(true);

    container(window)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(Vertical::Bottom)
        .into()
}
