use std::collections::{HashSet, VecDeque};

use super::data::AlbumId;

/// Number of albums requested per page
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// What a call to [`AlbumPager::load_more`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// These albums moved to the loaded list; fetch their images
    Fetch(Vec<AlbumId>),
    /// Nothing left to page through
    Exhausted,
}

/// Pagination cursor over the album list.
///
/// The full list is received once, then drained from the front into
/// `loaded`, a page at a time. An album is never handed out twice.
#[derive(Debug, Clone)]
pub struct AlbumPager {
    pending: VecDeque<AlbumId>,
    loaded: Vec<AlbumId>,
    page_size: usize,
    loading: bool,
    received: bool,
}

impl AlbumPager {
    pub fn new(page_size: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            loaded: Vec::new(),
            page_size: page_size.max(1),
            loading: false,
            received: false,
        }
    }

    /// Store the album list fetched at startup.
    ///
    /// Duplicates are dropped; albums already loaded are not queued again.
    pub fn set_albums(&mut self, albums: Vec<AlbumId>) {
        self.pending.clear();
        let mut seen: HashSet<AlbumId> = self.loaded.iter().copied().collect();
        for album in albums {
            if seen.insert(album) {
                self.pending.push_back(album);
            }
        }
        self.received = true;
    }

    /// Move the next page from pending to loaded.
    ///
    /// Returns `None` while a batch is already in flight. An empty pending
    /// list yields [`Batch::Exhausted`] and leaves the loading flag alone.
    pub fn load_more(&mut self) -> Option<Batch> {
        if self.loading {
            return None;
        }
        if self.pending.is_empty() {
            return Some(Batch::Exhausted);
        }

        let take = self.page_size.min(self.pending.len());
        let batch: Vec<AlbumId> = self.pending.drain(..take).collect();
        self.loaded.extend(batch.iter().copied());
        self.loading = true;

        Some(Batch::Fetch(batch))
    }

    /// Clear the loading flag once the batch request completed, successful or not
    pub fn finish_batch(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the startup album list has arrived
    pub fn has_album_list(&self) -> bool {
        self.received
    }

    pub fn has_more(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Albums handed out so far, in display order
    pub fn loaded(&self) -> &[AlbumId] {
        &self.loaded
    }
}

impl Default for AlbumPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Timestamp;

    fn ids(range: std::ops::Range<i64>) -> Vec<AlbumId> {
        range.map(Timestamp).collect()
    }

    #[test]
    fn test_load_more_takes_a_full_page() {
        let mut pager = AlbumPager::default();
        pager.set_albums(ids(0..20));

        let batch = pager.load_more();

        assert_eq!(batch, Some(Batch::Fetch(ids(0..8))));
        assert_eq!(pager.loaded(), ids(0..8).as_slice());
        assert_eq!(pager.pending_count(), 12);
        assert!(pager.is_loading());
    }

    #[test]
    fn test_load_more_moves_min_of_remaining_and_page() {
        for remaining in 0..=17 {
            let mut pager = AlbumPager::default();
            pager.set_albums(ids(0..remaining));

            match pager.load_more() {
                Some(Batch::Fetch(batch)) => {
                    assert_eq!(batch.len(), (remaining as usize).min(8));
                    assert_eq!(pager.loaded().len(), batch.len());
                    assert_eq!(pager.pending_count(), remaining as usize - batch.len());
                }
                Some(Batch::Exhausted) => assert_eq!(remaining, 0),
                None => panic!("pager should not be loading"),
            }
        }
    }

    #[test]
    fn test_load_more_is_gated_while_loading() {
        let mut pager = AlbumPager::default();
        pager.set_albums(ids(0..20));

        assert!(matches!(pager.load_more(), Some(Batch::Fetch(_))));
        assert_eq!(pager.load_more(), None);

        pager.finish_batch();
        assert_eq!(pager.load_more(), Some(Batch::Fetch(ids(8..16))));
    }

    #[test]
    fn test_exhausted_does_not_set_loading() {
        let mut pager = AlbumPager::default();
        pager.set_albums(ids(0..3));

        assert_eq!(pager.load_more(), Some(Batch::Fetch(ids(0..3))));
        pager.finish_batch();

        assert_eq!(pager.load_more(), Some(Batch::Exhausted));
        assert!(!pager.is_loading());
        assert!(!pager.has_more());
    }

    #[test]
    fn test_albums_are_never_revisited() {
        let mut pager = AlbumPager::new(2);
        pager.set_albums(ids(0..4));
        pager.load_more();
        pager.finish_batch();

        // A refreshed list containing already loaded albums only queues new ones
        pager.set_albums(vec![Timestamp(0), Timestamp(2), Timestamp(9), Timestamp(9)]);

        assert_eq!(pager.pending_count(), 2);
        assert_eq!(pager.load_more(), Some(Batch::Fetch(vec![Timestamp(2), Timestamp(9)])));
    }

    #[test]
    fn test_large_album_list_with_duplicates() {
        let mut pager = AlbumPager::new(1000);
        let mut albums = ids(0..50_000);
        albums.extend(ids(0..50_000).into_iter().rev());
        pager.set_albums(albums);

        assert_eq!(pager.pending_count(), 50_000);
        assert_eq!(pager.load_more(), Some(Batch::Fetch(ids(0..1000))));
    }
}
