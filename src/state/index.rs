use std::collections::HashMap;

use super::data::{AlbumId, Photo};

/// Stable reference to a photo inside the [`ImageIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhotoRef {
    pub album: AlbumId,
    pub position: usize,
}

/// Photos grouped by album, in arrival order.
///
/// Album order follows the pager (newest first, as the server sorts them);
/// an album first seen through one of its photos is appended at the end.
/// The index only grows for the lifetime of the session. Every album in
/// `order` has a bucket, possibly empty.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    order: Vec<AlbumId>,
    buckets: HashMap<AlbumId, Vec<Photo>>,
}

impl ImageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the display order of a freshly loaded batch of albums
    pub fn register_albums(&mut self, albums: &[AlbumId]) {
        for album in albums {
            self.bucket_mut(*album);
        }
    }

    fn bucket_mut(&mut self, album: AlbumId) -> &mut Vec<Photo> {
        let order = &mut self.order;
        self.buckets.entry(album).or_insert_with(|| {
            order.push(album);
            Vec::new()
        })
    }

    /// Append a photo to its album's bucket, creating the bucket if needed
    pub fn insert(&mut self, photo: Photo) -> PhotoRef {
        let album = photo.album;
        let bucket = self.bucket_mut(album);
        bucket.push(photo);

        PhotoRef {
            album,
            position: bucket.len() - 1,
        }
    }

    /// Insert every record in order, returning where each one landed
    pub fn extend(&mut self, photos: impl IntoIterator<Item = Photo>) -> Vec<PhotoRef> {
        photos.into_iter().map(|photo| self.insert(photo)).collect()
    }

    pub fn get(&self, photo: PhotoRef) -> Option<&Photo> {
        self.buckets.get(&photo.album)?.get(photo.position)
    }

    /// Photos of one album; empty if none arrived yet
    pub fn bucket(&self, album: AlbumId) -> &[Photo] {
        self.buckets.get(&album).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Albums in display order with their photos
    pub fn albums(&self) -> impl Iterator<Item = (AlbumId, &[Photo])> + '_ {
        self.order.iter().map(move |album| (*album, self.bucket(*album)))
    }

    pub fn album_count(&self) -> usize {
        self.order.len()
    }

    pub fn photo_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// The photo after `from`: next in the same album, else the first
    /// photo of the next album that has any. `None` at the very end.
    pub fn next(&self, from: PhotoRef) -> Option<PhotoRef> {
        if from.position + 1 < self.bucket(from.album).len() {
            return Some(PhotoRef {
                album: from.album,
                position: from.position + 1,
            });
        }

        let current = self.order.iter().position(|a| *a == from.album)?;
        self.order[current + 1..]
            .iter()
            .find(|album| !self.bucket(**album).is_empty())
            .map(|album| PhotoRef {
                album: *album,
                position: 0,
            })
    }

    /// The photo before `from`: previous in the same album, else the last
    /// photo of the previous album that has any. `None` at the very start.
    pub fn previous(&self, from: PhotoRef) -> Option<PhotoRef> {
        if from.position > 0 {
            return Some(PhotoRef {
                album: from.album,
                position: from.position - 1,
            });
        }

        let current = self.order.iter().position(|a| *a == from.album)?;
        self.order[..current]
            .iter()
            .rev()
            .find_map(|album| match self.bucket(*album).len() {
                0 => None,
                len => Some(PhotoRef {
                    album: *album,
                    position: len - 1,
                }),
            })
    }
}
