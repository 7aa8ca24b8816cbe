/// State management module
///
/// This module holds all viewer state, independent of the widgets:
/// - Records served by the album endpoints (data.rs)
/// - Album pagination and the loading flag (albums.rs)
/// - Photos grouped by album (index.rs)
/// - Infinite scroll trigger (scroll.rs)
/// - Lightbox navigation (lightbox.rs)
/// - Downloaded thumbnails and previews (cache.rs)

pub mod albums;
pub mod cache;
pub mod data;
pub mod index;
pub mod lightbox;
pub mod scroll;
