/// Album grid: a title per album followed by rows of clickable thumbnails
use iced::widget::{column, container, image, mouse_area, row, text, Column, Row};
use iced::{alignment, mouse, ContentFit, Element, Length};

use super::layout::{GridLayout, Item, Tile, PADDING, SPACING, THUMB_HEIGHT, TITLE_HEIGHT};
use crate::state::cache::{ImageCache, Tier};
use crate::state::data::album_title;
use crate::state::index::ImageIndex;
use crate::Message;

/// Render `layout`; `footer` goes below the last album (load more / status)
pub fn view<'a>(
    layout: &GridLayout,
    index: &'a ImageIndex,
    cache: &'a ImageCache,
    footer: Element<'a, Message>,
) -> Element<'a, Message> {
    let mut grid: Column<'a, Message> = column![].spacing(SPACING).padding(PADDING);

    for placed in &layout.items {
        grid = grid.push(match &placed.item {
            Item::Title(album) => container(text(album_title(*album)).size(22))
                .height(Length::Fixed(TITLE_HEIGHT))
                .align_y(alignment::Vertical::Bottom)
                .into(),
            Item::Row(tiles) => thumbnail_row(tiles, index, cache),
        });
    }

    grid.push(footer).width(Length::Fill).into()
}

fn thumbnail_row<'a>(
    tiles: &[Tile],
    index: &'a ImageIndex,
    cache: &'a ImageCache,
) -> Element<'a, Message> {
    let mut tiles_row: Row<'a, Message> = row![].spacing(SPACING).height(Length::Fixed(THUMB_HEIGHT));

    for tile in tiles {
        let Some(photo) = index.get(tile.photo) else {
            continue;
        };

        let content: Element<'a, Message> = match cache.get(Tier::Thumb, &photo.filename) {
            Some(loaded) => image(loaded.handle.clone())
                .width(Length::Fixed(tile.width))
                .height(Length::Fixed(THUMB_HEIGHT))
                .content_fit(ContentFit::Cover)
                .into(),
            None => container(
                text(match cache.failure(Tier::Thumb, &photo.filename) {
                    Some(_) => format!("⚠ {}", photo.filename),
                    None => photo.filename.clone(),
                })
                .size(12),
            )
                .width(Length::Fixed(tile.width))
                .height(Length::Fixed(THUMB_HEIGHT))
                .center_x(Length::Fixed(tile.width))
                .center_y(Length::Fixed(THUMB_HEIGHT))
                .style(container::rounded_box)
                .into(),
        };

        tiles_row = tiles_row.push(
            mouse_area(content)
                .on_press(Message::OpenPhoto(tile.photo))
                .interaction(mouse::Interaction::Pointer),
        );
    }

    tiles_row.into()
}
