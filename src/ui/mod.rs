/// User interface module
///
/// - `layout.rs` - flow layout of albums and thumbnails
/// - `grid.rs` - the scrollable album grid
/// - `modal.rs` - lightbox overlay

pub mod grid;
pub mod layout;
pub mod modal;
