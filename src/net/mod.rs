/// Network access to the album server
///
/// - `client.rs` - album list, image list and image bytes over HTTP

pub mod client;

pub use client::AlbumClient;
