/// A single wallpaper page
///
/// Layers, bottom to top:
/// 1. black backdrop with a spinner until the preview arrives
/// 2. the image, scaled by the focus spring and tappable
/// 3. position and caption (hidden while focused)
/// 4. previous / next zones (only while paging is enabled)
/// 5. the action bar
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    button, column, container, image, mouse_area, responsive, row, stack, text, Space,
};
use iced::{Border, ContentFit, Element, Length, Size};

use super::{action_bar, black, scrim, spinner, spring, TEXT_MUTED};
use crate::state::data::Wallpaper;
use crate::state::gallery::GalleryState;
use crate::Message;

/// Decoded preview of a page, kept for the lifetime of its batch
#[derive(Debug, Clone)]
pub enum Preview {
    Loading,
    Ready(image::Handle),
    Failed,
}

impl Preview {
    pub fn is_loading(&self) -> bool {
        matches!(self, Preview::Loading)
    }
}

#[derive(Clone, Copy)]
pub struct PageView<'a> {
    pub wallpaper: &'a Wallpaper,
    pub preview: Option<&'a Preview>,
    pub gallery: &'a GalleryState,
    pub scale: f32,
    pub spinner_rotation: f32,
}

impl<'a> PageView<'a> {
    /// The page, sized from the space the window actually gives it
    pub fn view(self) -> Element<'a, Message> {
        responsive(move |available: Size| self.layers(available)).into()
    }

    fn layers(&self, available: Size) -> Element<'a, Message> {
        let mut layers = stack![self.backdrop(), self.picture(available)]
            .width(Length::Fill)
            .height(Length::Fill);

        if !self.gallery.is_focused() {
            layers = layers.push(self.caption());
        }
        if self.gallery.paging_enabled() {
            layers = layers.push(self.navigation());
        }
        layers = layers.push(action_bar::view(spring::action_bar_offset(self.scale)));

        container(layers).style(black).into()
    }

    fn backdrop(&self) -> Element<'a, Message> {
        let content: Element<'a, Message> = match self.preview {
            Some(Preview::Failed) => text("Could not load this wallpaper")
                .size(14)
                .color(TEXT_MUTED)
                .into(),
            Some(Preview::Ready(_)) => Space::new(Length::Shrink, Length::Shrink).into(),
            _ => spinner::view(self.spinner_rotation, 40.0),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn picture(&self, available: Size) -> Element<'a, Message> {
        let width = (available.width * self.scale).max(0.0);
        let height = (available.height * self.scale).max(0.0);
        let radius = spring::corner_radius(self.scale);

        let content: Element<'a, Message> = match self.preview {
            Some(Preview::Ready(handle)) => image(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            _ => Space::new(Length::Fill, Length::Fill).into(),
        };

        let card = container(content)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .clip(true)
            .style(move |_theme| container::Style {
                border: Border {
                    radius: radius.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            });

        container(mouse_area(card).on_press(Message::ToggleFocus))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn caption(&self) -> Element<'a, Message> {
        let position = format!(
            "{} / {}",
            self.gallery.page() + 1,
            self.gallery.images().len()
        );

        let mut strip = column![text(position).size(13)].spacing(2);
        if let Some(caption) = self.wallpaper.caption() {
            strip = strip.push(text(caption).size(13).color(TEXT_MUTED));
        }

        container(container(strip).padding([6, 12]).style(scrim))
            .width(Length::Fill)
            .padding(12)
            .align_x(Horizontal::Left)
            .align_y(Vertical::Top)
            .into()
    }

    fn navigation(&self) -> Element<'a, Message> {
        let zone = |label: &'a str, enabled: bool, message: Message| -> Element<'a, Message> {
            let arrow = button(text(label).size(28))
                .style(button::text)
                .padding(12)
                .on_press_maybe(enabled.then_some(message));

            container(arrow)
                .height(Length::Fill)
                .padding(8)
                .center_y(Length::Fill)
                .into()
        };

        row![
            zone("◀", self.gallery.has_previous(), Message::PreviousPage),
            Space::with_width(Length::Fill),
            zone("▶", self.gallery.has_next(), Message::NextPage),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}
