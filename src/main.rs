use clap::Parser;
use iced::keyboard::{self, key::Named, Key};
use iced::widget::scrollable::{AbsoluteOffset, Viewport};
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{alignment, Element, Length, Subscription, Task, Theme};
use reqwest::Url;

mod config;
mod error;
mod net;
mod state;
mod ui;

use config::Config;
use error::ViewerError;
use net::AlbumClient;
use state::albums::{AlbumPager, Batch};
use state::cache::{self as image_cache, ImageCache, LoadedImage, Tier};
use state::data::{AlbumId, Photo};
use state::index::{ImageIndex, PhotoRef};
use state::lightbox::{modal_width, Direction, Lightbox};
use state::scroll::{ScrollPosition, ScrollTrigger};
use ui::layout::{GridLayout, PLACEHOLDER_WIDTH};

/// Width assumed until the first scroll event reports the real viewport
const INITIAL_VIEWPORT_WIDTH: f32 = 1280.0;

fn grid_id() -> scrollable::Id {
    scrollable::Id::new("album-grid")
}

/// Main application state
struct AlbumViewer {
    client: AlbumClient,
    pager: AlbumPager,
    index: ImageIndex,
    cache: ImageCache,
    trigger: ScrollTrigger,
    lightbox: Lightbox,
    /// Lightbox dialog width, derived from the thumbnail it was opened from
    modal_width: f32,
    viewport_width: f32,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Startup album list arrived
    AlbumsLoaded(Result<Vec<AlbumId>, ViewerError>),
    /// User asked for the next page ("Load more" button)
    LoadMore,
    /// Image records for a batch of albums arrived
    ImagesLoaded(Vec<AlbumId>, Result<Vec<Photo>, ViewerError>),
    /// A grid thumbnail finished downloading
    ThumbnailLoaded(String, Result<LoadedImage, ViewerError>),
    /// A lightbox preview finished downloading
    PreviewLoaded(PhotoRef, String, Result<LoadedImage, ViewerError>),
    /// The album grid scrolled
    Scrolled(Viewport),
    /// User clicked a thumbnail
    OpenPhoto(PhotoRef),
    /// Arrow key or arrow button in the lightbox
    Navigate(Direction),
    /// Escape, close button or backdrop click
    CloseLightbox,
}

impl AlbumViewer {
    /// Create the viewer and request the album list
    fn new(config: Config, server: Url) -> (Self, Task<Message>) {
        let disk_dir = config.disk_cache_dir();
        log::info!("🖼️  Album viewer starting against {}", server);
        match &disk_dir {
            Some(dir) => log::info!("📁 Image cache at {}", dir.display()),
            None => log::info!("📁 Disk cache disabled"),
        }

        let client = AlbumClient::new(server);
        let viewer = AlbumViewer {
            client: client.clone(),
            pager: AlbumPager::new(config.page_size),
            index: ImageIndex::new(),
            cache: ImageCache::new(disk_dir),
            trigger: ScrollTrigger::new(config.auto_load()),
            lightbox: Lightbox::new(),
            modal_width: modal_width(PLACEHOLDER_WIDTH),
            viewport_width: INITIAL_VIEWPORT_WIDTH,
            status: "Loading albums...".to_string(),
        };

        let task = Task::perform(
            async move { client.fetch_albums().await },
            Message::AlbumsLoaded,
        );

        (viewer, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AlbumsLoaded(Ok(albums)) => {
                log::info!("📚 Received {} albums", albums.len());
                self.pager.set_albums(albums);
                self.load_more()
            }
            Message::AlbumsLoaded(Err(e)) => {
                log::warn!("⚠️  Album list failed: {}", e);
                self.status = format!("❌ Could not load albums: {}", e);
                Task::none()
            }
            Message::LoadMore => self.load_more(),
            Message::ImagesLoaded(batch, result) => {
                // Cleared on success and failure alike
                self.pager.finish_batch();
                self.trigger.rearm();
                log::debug!("Scroll trigger armed: {}", self.trigger.is_armed());

                match result {
                    Ok(photos) => {
                        let landed = self.index.extend(photos);
                        log::info!(
                            "✅ Loaded {} photos for {} albums",
                            landed.len(),
                            batch.len()
                        );
                        self.status = format!(
                            "{} albums, {} photos",
                            self.index.album_count(),
                            self.index.photo_count()
                        );
                        self.load_thumbnails(&landed)
                    }
                    Err(e) => {
                        log::warn!("⚠️  Images for {} albums failed: {}", batch.len(), e);
                        self.status = format!("❌ Could not load photos: {}", e);
                        Task::none()
                    }
                }
            }
            Message::ThumbnailLoaded(filename, result) => {
                match result {
                    Ok(loaded) => {
                        self.cache.insert(Tier::Thumb, filename, loaded);
                        log::debug!("{} images cached", self.cache.len());
                    }
                    Err(e) => {
                        log::warn!("⚠️  Thumbnail {} failed: {}", filename, e);
                        self.cache.mark_failed(Tier::Thumb, filename, e);
                    }
                }
                Task::none()
            }
            Message::PreviewLoaded(photo, filename, result) => {
                match result {
                    Ok(loaded) => {
                        self.lightbox.set_preview(photo, loaded.handle.clone());
                        self.cache.insert(Tier::Medium, filename, loaded);
                    }
                    Err(e) => {
                        log::warn!("⚠️  Preview {} failed: {}", filename, e);
                        self.status = format!("❌ Could not load {}: {}", filename, e);
                        self.cache.mark_failed(Tier::Medium, filename, e);
                    }
                }
                Task::none()
            }
            Message::Scrolled(viewport) => {
                self.viewport_width = viewport.bounds().width;
                let position = ScrollPosition {
                    offset_y: viewport.absolute_offset().y,
                    viewport_height: viewport.bounds().height,
                    content_height: viewport.content_bounds().height,
                };

                if self.pager.has_album_list() && self.trigger.on_scroll(position) {
                    log::debug!("Reached the bottom, loading more albums");
                    return self.load_more();
                }
                Task::none()
            }
            Message::OpenPhoto(photo) => {
                if self.index.get(photo).is_none() {
                    return Task::none();
                }
                self.lightbox.open(photo);
                self.present(photo)
            }
            Message::Navigate(direction) => match self.lightbox.navigate(&self.index, direction) {
                Some(target) => self.present(target),
                None => Task::none(),
            },
            Message::CloseLightbox => {
                self.lightbox.close();
                Task::none()
            }
        }
    }

    /// Take the next page of albums and request their images
    fn load_more(&mut self) -> Task<Message> {
        match self.pager.load_more() {
            None => {
                log::debug!("A batch is already loading");
                Task::none()
            }
            Some(Batch::Exhausted) => {
                self.status = format!("All {} albums loaded", self.pager.loaded().len());
                Task::none()
            }
            Some(Batch::Fetch(batch)) => {
                log::info!(
                    "⏳ Loading {} albums ({} remaining)",
                    batch.len(),
                    self.pager.pending_count()
                );
                self.index.register_albums(&batch);
                self.status = "Loading photos...".to_string();

                let client = self.client.clone();
                Task::perform(
                    async move {
                        let result = client.fetch_images(batch.clone()).await;
                        (batch, result)
                    },
                    |(batch, result)| Message::ImagesLoaded(batch, result),
                )
            }
        }
    }

    fn load_thumbnails(&mut self, photos: &[PhotoRef]) -> Task<Message> {
        let mut tasks = Vec::new();
        for photo in photos.iter().filter_map(|p| self.index.get(*p)) {
            let Some(url) = photo.grid_url() else {
                continue;
            };
            if !self.cache.start_loading(Tier::Thumb, &photo.filename) {
                continue;
            }

            let client = self.client.clone();
            let disk_dir = self.cache.disk_dir().cloned();
            let filename = photo.filename.clone();
            let url = url.to_string();
            tasks.push(Task::perform(
                async move {
                    let result =
                        image_cache::load_image(client, disk_dir, Tier::Thumb, filename.clone(), url)
                            .await;
                    (filename, result)
                },
                |(filename, result)| Message::ThumbnailLoaded(filename, result),
            ));
        }
        Task::batch(tasks)
    }

    /// After the lightbox switched to `photo_ref`: size the dialog, fetch
    /// the preview and scroll the grid so the thumbnail is in view
    fn present(&mut self, photo_ref: PhotoRef) -> Task<Message> {
        let Some(photo) = self.index.get(photo_ref).cloned() else {
            return Task::none();
        };
        log::debug!("Opening {}", photo.filename);

        let scroll = match self.layout().position_of(photo_ref) {
            Some((y, thumb_width)) => {
                self.modal_width = modal_width(thumb_width);
                scrollable::scroll_to(grid_id(), AbsoluteOffset { x: 0.0, y })
            }
            None => Task::none(),
        };

        let preview = if let Some(loaded) = self.cache.get(Tier::Medium, &photo.filename) {
            self.lightbox.set_preview(photo_ref, loaded.handle.clone());
            Task::none()
        } else if photo.medium_url.is_empty() {
            self.status = format!("❌ {} has no preview", photo.filename);
            Task::none()
        } else if self.cache.start_loading(Tier::Medium, &photo.filename) {
            let client = self.client.clone();
            let disk_dir = self.cache.disk_dir().cloned();
            let filename = photo.filename.clone();
            let url = photo.medium_url.clone();
            Task::perform(
                async move {
                    let result =
                        image_cache::load_image(client, disk_dir, Tier::Medium, filename.clone(), url)
                            .await;
                    (filename, result)
                },
                move |(filename, result)| Message::PreviewLoaded(photo_ref, filename, result),
            )
        } else {
            Task::none()
        };

        Task::batch([scroll, preview])
    }

    fn layout(&self) -> GridLayout {
        GridLayout::compute(&self.index, self.viewport_width, |photo| {
            let filename = &self.index.get(photo)?.filename;
            self.cache
                .get(Tier::Thumb, filename)
                .map(|loaded| (loaded.width, loaded.height))
        })
    }

    fn footer(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = if self.pager.is_loading() {
            text("Loading...").into()
        } else if self.pager.has_more() {
            button("Load more albums")
                .on_press(Message::LoadMore)
                .padding(10)
                .into()
        } else if self.pager.has_album_list() {
            text("No more albums").into()
        } else {
            text("").into()
        };

        container(content).center_x(Length::Fill).padding(20).into()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Albums").size(28),
            horizontal_space(),
            text(&self.status).size(14),
        ]
        .align_y(alignment::Vertical::Center)
        .padding(15);

        let layout = self.layout();
        let grid = scrollable(ui::grid::view(
            &layout,
            &self.index,
            &self.cache,
            self.footer(),
        ))
        .id(grid_id())
        .on_scroll(Message::Scrolled)
        .width(Length::Fill)
        .height(Length::Fill);

        let base = column![header, grid];

        match self.lightbox.current().and_then(|p| self.index.get(p)) {
            Some(photo) if self.lightbox.is_open() => ui::modal::overlay(
                base,
                ui::modal::lightbox(
                    &self.lightbox,
                    photo.caption(),
                    self.modal_width,
                    self.lightbox.target(&self.index, Direction::Backward).is_some(),
                    self.lightbox.target(&self.index, Direction::Forward).is_some(),
                ),
                Message::CloseLightbox,
            ),
            _ => base.into(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(key_message)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Arrow keys step through photos, Escape closes the lightbox
fn key_message(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key.as_ref() {
        Key::Named(Named::ArrowLeft) => Some(Message::Navigate(Direction::Backward)),
        Key::Named(Named::ArrowRight) => Some(Message::Navigate(Direction::Forward)),
        Key::Named(Named::Escape) => Some(Message::CloseLightbox),
        _ => None,
    }
}

fn main() -> iced::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = Config::parse();
    let server = match config.validate().and_then(|_| config.server_url()) {
        Ok(server) => server,
        Err(e) => {
            log::error!("❌ {}", e);
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    iced::application("Album Viewer", AlbumViewer::update, AlbumViewer::view)
        .subscription(AlbumViewer::subscription)
        .theme(AlbumViewer::theme)
        .window_size((1280.0, 900.0))
        .centered()
        .run_with(move || AlbumViewer::new(config, server))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Timestamp;
    use crate::state::index::tests::photo;

    fn viewer(page_size: &str) -> AlbumViewer {
        let config = Config::try_parse_from([
            "album-viewer",
            "--server",
            "http://127.0.0.1:9/",
            "--page-size",
            page_size,
            "--no-disk-cache",
        ])
        .unwrap();
        let server = config.server_url().unwrap();
        AlbumViewer::new(config, server).0
    }

    fn ids(range: std::ops::Range<i64>) -> Vec<AlbumId> {
        range.map(Timestamp).collect()
    }

    fn at(album: i64, position: usize) -> PhotoRef {
        PhotoRef {
            album: Timestamp(album),
            position,
        }
    }

    #[test]
    fn test_album_list_starts_first_batch() {
        let mut viewer = viewer("8");
        let _ = viewer.update(Message::AlbumsLoaded(Ok(ids(0..20))));

        assert_eq!(viewer.pager.loaded(), ids(0..8).as_slice());
        assert!(viewer.pager.is_loading());
        assert_eq!(viewer.index.album_count(), 8);

        // Gated until the first batch comes back
        let _ = viewer.update(Message::LoadMore);
        assert_eq!(viewer.pager.loaded().len(), 8);
    }

    #[test]
    fn test_failed_batch_clears_loading_flag() {
        let mut viewer = viewer("8");
        let _ = viewer.update(Message::AlbumsLoaded(Ok(ids(0..20))));

        let _ = viewer.update(Message::ImagesLoaded(
            ids(0..8),
            Err(ViewerError::Status {
                url: "http://127.0.0.1:9/images.json".to_string(),
                status: 500,
            }),
        ));

        assert!(!viewer.pager.is_loading());
        assert!(viewer.status.contains("HTTP 500"));

        let _ = viewer.update(Message::LoadMore);
        assert_eq!(viewer.pager.loaded().len(), 16);
    }

    #[test]
    fn test_album_list_failure_is_reported() {
        let mut viewer = viewer("8");
        let _ = viewer.update(Message::AlbumsLoaded(Err(ViewerError::Http {
            url: "http://127.0.0.1:9/albums.json".to_string(),
            message: "connection refused".to_string(),
        })));

        assert!(viewer.status.contains("connection refused"));
        assert!(!viewer.pager.has_album_list());
        assert!(!viewer.pager.is_loading());
    }

    #[test]
    fn test_lightbox_navigation_across_albums() {
        let mut viewer = viewer("2");
        let _ = viewer.update(Message::AlbumsLoaded(Ok(vec![Timestamp(200), Timestamp(100)])));
        let _ = viewer.update(Message::ImagesLoaded(
            vec![Timestamp(200), Timestamp(100)],
            Ok(vec![photo(200, "a.jpg"), photo(100, "b.jpg"), photo(200, "c.jpg")]),
        ));

        let _ = viewer.update(Message::OpenPhoto(at(200, 1)));
        assert!(viewer.lightbox.is_open());

        let _ = viewer.update(Message::Navigate(Direction::Forward));
        assert_eq!(viewer.lightbox.current(), Some(at(100, 0)));

        // Last photo of the last album: forward is a no-op
        let _ = viewer.update(Message::Navigate(Direction::Forward));
        assert_eq!(viewer.lightbox.current(), Some(at(100, 0)));

        let _ = viewer.update(Message::Navigate(Direction::Backward));
        assert_eq!(viewer.lightbox.current(), Some(at(200, 1)));

        let _ = viewer.update(Message::CloseLightbox);
        let _ = viewer.update(Message::Navigate(Direction::Backward));
        assert_eq!(viewer.lightbox.current(), Some(at(200, 1)));
    }

    #[test]
    fn test_key_bindings() {
        let none = keyboard::Modifiers::default();

        assert!(matches!(
            key_message(Key::Named(Named::ArrowLeft), none),
            Some(Message::Navigate(Direction::Backward))
        ));
        assert!(matches!(
            key_message(Key::Named(Named::ArrowRight), none),
            Some(Message::Navigate(Direction::Forward))
        ));
        assert!(matches!(
            key_message(Key::Named(Named::Escape), none),
            Some(Message::CloseLightbox)
        ));
        assert!(key_message(Key::Named(Named::ArrowUp), none).is_none());
        assert!(key_message(Key::Character("a".into()), none).is_none());
    }

    #[test]
    fn test_no_auto_load_leaves_trigger_disarmed() {
        let config = Config::try_parse_from([
            "album-viewer",
            "--server",
            "http://127.0.0.1:9/",
            "--no-auto-load",
            "--no-disk-cache",
        ])
        .unwrap();
        let server = config.server_url().unwrap();
        let mut viewer = AlbumViewer::new(config, server).0;
        let _ = viewer.update(Message::AlbumsLoaded(Ok(ids(0..20))));
        let _ = viewer.update(Message::ImagesLoaded(ids(0..8), Ok(Vec::new())));

        assert!(!viewer.trigger.is_armed());
        assert_eq!(viewer.pager.loaded().len(), 8);

        // The button still pages
        let _ = viewer.update(Message::LoadMore);
        assert_eq!(viewer.pager.loaded().len(), 16);
    }

    #[test]
    fn test_exhausted_pager_reports_status() {
        let mut viewer = viewer("8");
        let _ = viewer.update(Message::AlbumsLoaded(Ok(ids(0..3))));
        let _ = viewer.update(Message::ImagesLoaded(ids(0..3), Ok(Vec::new())));

        let _ = viewer.update(Message::LoadMore);

        assert!(!viewer.pager.is_loading());
        assert_eq!(viewer.status, "All 3 albums loaded");
    }
}
