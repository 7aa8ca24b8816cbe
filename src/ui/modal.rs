/// Lightbox overlay drawn on top of the album grid
use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row, stack,
    text,
};
use iced::{alignment, Color, ContentFit, Element, Length};

use crate::state::lightbox::{Direction, Lightbox};
use crate::Message;

/// Height of the medium rendition
const PREVIEW_HEIGHT: f32 = 768.0;

/// Stack `content` over `base` with a dimmed backdrop; clicking the
/// backdrop sends `on_blur`
pub fn overlay<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

/// The lightbox dialog: title bar, preview, caption and arrows
pub fn lightbox<'a>(
    lightbox: &'a Lightbox,
    caption: String,
    width: f32,
    has_previous: bool,
    has_next: bool,
) -> Element<'a, Message> {
    let title_bar = row![
        text(lightbox.title()).size(20),
        horizontal_space(),
        button("✕").on_press(Message::CloseLightbox),
    ]
    .align_y(alignment::Vertical::Center);

    let preview: Element<'a, Message> = match lightbox.preview() {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => center(text("Loading…")).height(Length::Fixed(PREVIEW_HEIGHT / 2.0)).into(),
    };

    let controls = row![
        button("◀").on_press_maybe(has_previous.then_some(Message::Navigate(Direction::Backward))),
        center(text(caption).size(14)).height(Length::Shrink),
        button("▶").on_press_maybe(has_next.then_some(Message::Navigate(Direction::Forward))),
    ]
    .spacing(10)
    .align_y(alignment::Vertical::Center);

    container(column![title_bar, preview, controls].spacing(12))
        .width(Length::Fixed(width))
        .padding(15)
        .style(container::rounded_box)
        .into()
}
