use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

use super::{black, spinner, TEXT_MUTED};
use crate::Message;

/// Spinner until the first batch lands, with a retry affordance once a
/// load has failed
pub fn view<'a>(rotation: f32, error: Option<&'a str>) -> Element<'a, Message> {
    let mut content = column![spinner::view(rotation, 48.0)]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

    if let Some(error) = error {
        content = content
            .push(text(error).size(14).color(TEXT_MUTED))
            .push(button("Retry").on_press(Message::Retry).padding(10));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(black)
        .into()
}

/// Shown when the API answered with zero photos
pub fn empty<'a>() -> Element<'a, Message> {
    let content = column![
        text("No wallpapers in this batch").size(18),
        button("Refresh").on_press(Message::Refresh).padding(10),
    ]
    .spacing(20)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(black)
        .into()
}
