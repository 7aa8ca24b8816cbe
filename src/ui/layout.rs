/// Flow layout of the album grid
///
/// The grid is rendered from this layout, so the y offset it computes for
/// a thumbnail is exactly where the thumbnail ends up in the scrollable.
/// That is what lets the lightbox scroll the page back to the photo it
/// was opened from.
use crate::state::data::AlbumId;
use crate::state::index::{ImageIndex, PhotoRef};

/// Thumbnails are rendered at the height the server resizes them to
pub const THUMB_HEIGHT: f32 = 162.0;
/// Width used until a thumbnail's real size is known (3:2)
pub const PLACEHOLDER_WIDTH: f32 = 243.0;
/// Height of an album title row
pub const TITLE_HEIGHT: f32 = 44.0;
/// Gap between tiles and between rows
pub const SPACING: f32 = 8.0;
/// Padding around the whole grid
pub const PADDING: f32 = 20.0;
/// Space reserved for the vertical scrollbar
pub const SCROLLBAR_ALLOWANCE: f32 = 16.0;

/// Rendered width of a thumbnail with the given pixel size
pub fn tile_width(size: Option<(u32, u32)>) -> f32 {
    match size {
        Some((w, h)) if w > 0 && h > 0 => w as f32 * THUMB_HEIGHT / h as f32,
        _ => PLACEHOLDER_WIDTH,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub photo: PhotoRef,
    pub width: f32,
}

/// One vertical slot of the grid column
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Title(AlbumId),
    Row(Vec<Tile>),
}

impl Item {
    pub fn height(&self) -> f32 {
        match self {
            Item::Title(_) => TITLE_HEIGHT,
            Item::Row(_) => THUMB_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub y: f32,
    pub item: Item,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    pub items: Vec<Placed>,
    /// Height of the laid-out content including padding
    pub height: f32,
}

impl GridLayout {
    /// Lay out every album in `index` for a viewport `viewport_width` wide.
    ///
    /// `size_of` returns the pixel size of a photo's thumbnail once known.
    pub fn compute<F>(index: &ImageIndex, viewport_width: f32, size_of: F) -> Self
    where
        F: Fn(PhotoRef) -> Option<(u32, u32)>,
    {
        let available = (viewport_width - 2.0 * PADDING - SCROLLBAR_ALLOWANCE).max(0.0);
        let mut items = Vec::new();

        for (album, photos) in index.albums() {
            items.push(Item::Title(album));

            let mut row: Vec<Tile> = Vec::new();
            let mut x = 0.0;
            for position in 0..photos.len() {
                let photo = PhotoRef { album, position };
                let width = tile_width(size_of(photo));

                if !row.is_empty() && x + width > available {
                    items.push(Item::Row(std::mem::take(&mut row)));
                    x = 0.0;
                }
                row.push(Tile { photo, width });
                x += width + SPACING;
            }
            if !row.is_empty() {
                items.push(Item::Row(row));
            }
        }

        let mut y = PADDING;
        let placed: Vec<Placed> = items
            .into_iter()
            .map(|item| {
                let at = y;
                y += item.height() + SPACING;
                Placed { y: at, item }
            })
            .collect();

        let height = if placed.is_empty() {
            2.0 * PADDING
        } else {
            y - SPACING + PADDING
        };

        Self {
            items: placed,
            height,
        }
    }

    /// Scroll offset and rendered width of a photo's thumbnail
    pub fn position_of(&self, photo: PhotoRef) -> Option<(f32, f32)> {
        self.items.iter().find_map(|placed| match &placed.item {
            Item::Row(tiles) => tiles
                .iter()
                .find(|tile| tile.photo == photo)
                .map(|tile| (placed.y, tile.width)),
            Item::Title(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Timestamp;
    use crate::state::index::tests::photo;

    fn index() -> ImageIndex {
        let mut index = ImageIndex::new();
        index.register_albums(&[Timestamp(200), Timestamp(100)]);
        index.extend(vec![
            photo(200, "a.jpg"),
            photo(200, "b.jpg"),
            photo(200, "c.jpg"),
            photo(100, "d.jpg"),
        ]);
        index
    }

    #[test]
    fn test_tile_width_keeps_aspect_ratio() {
        assert_eq!(tile_width(Some((324, 162))), 324.0);
        assert_eq!(tile_width(Some((243, 324))), 121.5);
        assert_eq!(tile_width(None), PLACEHOLDER_WIDTH);
        assert_eq!(tile_width(Some((100, 0))), PLACEHOLDER_WIDTH);
    }

    #[test]
    fn test_rows_wrap_to_viewport() {
        // Room for two placeholder tiles per row: 2 * 243 + 8 = 494
        let width = 494.0 + 2.0 * PADDING + SCROLLBAR_ALLOWANCE;
        let layout = GridLayout::compute(&index(), width, |_| None);

        let shapes: Vec<usize> = layout
            .items
            .iter()
            .map(|placed| match &placed.item {
                Item::Title(_) => 0,
                Item::Row(tiles) => tiles.len(),
            })
            .collect();
        assert_eq!(shapes, vec![0, 2, 1, 0, 1]);
    }

    #[test]
    fn test_position_of_follows_item_heights() {
        let width = 494.0 + 2.0 * PADDING + SCROLLBAR_ALLOWANCE;
        let layout = GridLayout::compute(&index(), width, |_| None);

        let third = PhotoRef {
            album: Timestamp(200),
            position: 2,
        };
        let expected_y = PADDING + (TITLE_HEIGHT + SPACING) + (THUMB_HEIGHT + SPACING);
        assert_eq!(layout.position_of(third), Some((expected_y, PLACEHOLDER_WIDTH)));

        let missing = PhotoRef {
            album: Timestamp(999),
            position: 0,
        };
        assert_eq!(layout.position_of(missing), None);
    }

    #[test]
    fn test_narrow_viewport_keeps_one_tile_per_row() {
        let layout = GridLayout::compute(&index(), 10.0, |_| Some((1000, 162)));
        let rows = layout
            .items
            .iter()
            .filter(|placed| matches!(placed.item, Item::Row(_)))
            .count();
        assert_eq!(rows, 4);
    }

    #[test]
    fn test_empty_index_height() {
        let layout = GridLayout::compute(&ImageIndex::new(), 800.0, |_| None);
        assert!(layout.items.is_empty());
        assert_eq!(layout.height, 2.0 * PADDING);
    }
}
