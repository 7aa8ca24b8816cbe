/// Lightbox state: which photo is enlarged and how to step through the index
use iced::widget::image::Handle;

use super::data::album_title;
use super::index::{ImageIndex, PhotoRef};

/// Medium renditions are 768 px high, thumbnails 162 px: 768 / 162 ≈ 4.74
pub const MODAL_WIDTH_FACTOR: f32 = 4.74;
/// Room for the dialog border and padding around the preview
pub const MODAL_PADDING: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Width of the lightbox dialog for a thumbnail rendered `thumb_width` wide
pub fn modal_width(thumb_width: f32) -> f32 {
    thumb_width * MODAL_WIDTH_FACTOR + MODAL_PADDING
}

#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    current: Option<PhotoRef>,
    open: bool,
    title: String,
    preview: Option<Handle>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `photo`. The previous preview is dropped right away so a stale
    /// image is never displayed while the new one loads.
    pub fn open(&mut self, photo: PhotoRef) {
        self.current = Some(photo);
        self.open = true;
        self.title = album_title(photo.album);
        self.preview = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.preview = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Last photo opened; kept after closing
    pub fn current(&self) -> Option<PhotoRef> {
        self.current
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn preview(&self) -> Option<&Handle> {
        self.preview.as_ref()
    }

    /// Attach a loaded preview; ignored if the user moved on in the meantime
    pub fn set_preview(&mut self, photo: PhotoRef, handle: Handle) -> bool {
        if self.open && self.current == Some(photo) {
            self.preview = Some(handle);
            return true;
        }
        false
    }

    /// Photo to open next in `direction`, if the lightbox is showing one.
    ///
    /// Does not change state: the caller opens the target the same way a
    /// click would. `None` when closed or at either end of the index.
    pub fn target(&self, index: &ImageIndex, direction: Direction) -> Option<PhotoRef> {
        if !self.open {
            return None;
        }
        let current = self.current?;
        match direction {
            Direction::Forward => index.next(current),
            Direction::Backward => index.previous(current),
        }
    }

    /// Step in `direction`; returns the newly opened photo, or `None` if
    /// nothing changed
    pub fn navigate(&mut self, index: &ImageIndex, direction: Direction) -> Option<PhotoRef> {
        let target = self.target(index, direction)?;
        self.open(target);
        Some(target)
    }
}
