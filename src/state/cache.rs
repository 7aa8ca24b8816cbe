/// Image cache for thumbnails and lightbox previews
///
/// Decoded handles live in memory for the session. Downloaded bytes are
/// also written to a cache directory keyed by filename, because the
/// signed URLs the server hands out change between sessions while the
/// filename does not.
use iced::widget::image::Handle;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewerError};
use crate::net::AlbumClient;

/// Which rendition of a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// 162 px high, shown in the grid
    Thumb,
    /// 768 px high, shown in the lightbox
    Medium,
}

impl Tier {
    fn dir_name(self) -> &'static str {
        match self {
            Tier::Thumb => "thumbs",
            Tier::Medium => "medium",
        }
    }
}

/// A downloaded image ready for display
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// In-memory handle cache plus the optional disk location
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<(Tier, String), LoadedImage>,
    failed: HashMap<(Tier, String), ViewerError>,
    in_flight: HashSet<(Tier, String)>,
    disk_dir: Option<PathBuf>,
}

impl ImageCache {
    pub fn new(disk_dir: Option<PathBuf>) -> Self {
        Self {
            images: HashMap::new(),
            failed: HashMap::new(),
            in_flight: HashSet::new(),
            disk_dir,
        }
    }

    pub fn disk_dir(&self) -> Option<&PathBuf> {
        self.disk_dir.as_ref()
    }

    pub fn get(&self, tier: Tier, filename: &str) -> Option<&LoadedImage> {
        self.images.get(&(tier, filename.to_string()))
    }

    /// Claim a load of `filename`. Returns false when it is already cached
    /// or a request is in flight; a previous failure may be retried.
    pub fn start_loading(&mut self, tier: Tier, filename: &str) -> bool {
        let key = (tier, filename.to_string());
        if self.images.contains_key(&key) || self.in_flight.contains(&key) {
            return false;
        }
        self.failed.remove(&key);
        self.in_flight.insert(key);
        true
    }

    pub fn insert(&mut self, tier: Tier, filename: String, image: LoadedImage) {
        let key = (tier, filename);
        self.in_flight.remove(&key);
        self.failed.remove(&key);
        self.images.insert(key, image);
    }

    pub fn mark_failed(&mut self, tier: Tier, filename: String, error: ViewerError) {
        let key = (tier, filename);
        self.in_flight.remove(&key);
        self.failed.insert(key, error);
    }

    pub fn failure(&self, tier: Tier, filename: &str) -> Option<&ViewerError> {
        self.failed.get(&(tier, filename.to_string()))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }
}

/// Path of a cached rendition inside `dir`
pub fn cache_path(dir: &Path, tier: Tier, filename: &str) -> PathBuf {
    // Filenames come from the server; keep only the last path component
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.replace(['/', '\\'], "_"));
    dir.join(tier.dir_name()).join(name)
}

/// Default cache directory
/// Returns ~/.cache/album-viewer on Linux
pub fn default_cache_dir() -> Option<PathBuf> {
    let mut path = dirs::cache_dir().or_else(dirs::home_dir)?;
    path.push("album-viewer");
    Some(path)
}

/// Read the pixel size of encoded image bytes without decoding them fully
pub fn probe_dimensions(bytes: &[u8], filename: &str) -> Result<(u32, u32)> {
    let image_error = |message: String| ViewerError::Image {
        filename: filename.to_string(),
        message,
    };

    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| image_error(e.to_string()))?
        .into_dimensions()
        .map_err(|e| image_error(e.to_string()))
}

/// Load a rendition: disk cache first, network otherwise.
///
/// Freshly downloaded bytes are written back to the disk cache; a failed
/// write is logged and does not fail the load.
pub async fn load_image(
    client: AlbumClient,
    disk_dir: Option<PathBuf>,
    tier: Tier,
    filename: String,
    url: String,
) -> Result<LoadedImage> {
    let cached = match &disk_dir {
        Some(dir) => read_cached(cache_path(dir, tier, &filename)).await,
        None => None,
    };

    let bytes = match cached {
        Some(bytes) => {
            log::debug!("Cache hit for {:?} {}", tier, filename);
            bytes
        }
        None => {
            let bytes = client.fetch_bytes(&url).await?;
            if let Some(dir) = &disk_dir {
                let path = cache_path(dir, tier, &filename);
                if let Err(e) = write_cached(path, bytes.clone()).await {
                    log::warn!("⚠️  {}", e);
                }
            }
            bytes
        }
    };

    decode_loaded(bytes, filename).await
}

async fn read_cached(path: PathBuf) -> Option<Vec<u8>> {
    tokio::fs::read(&path).await.ok()
}

async fn write_cached(path: PathBuf, bytes: Vec<u8>) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ViewerError::io(parent, e))?;
    }
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| ViewerError::io(&path, e))
}

async fn decode_loaded(bytes: Vec<u8>, filename: String) -> Result<LoadedImage> {
    let name = filename.clone();
    // Probing parses headers; keep it off the UI executor
    tokio::task::spawn_blocking(move || {
        let (width, height) = probe_dimensions(&bytes, &name)?;
        Ok(LoadedImage {
            handle: Handle::from_bytes(bytes),
            width,
            height,
        })
    })
    .await
    .map_err(|e| ViewerError::Image {
        filename,
        message: format!("Task join error: {}", e),
    })?
}
