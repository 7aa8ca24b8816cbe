/// Command line and environment configuration
use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

use crate::error::{Result, ViewerError};
use crate::state::albums::DEFAULT_PAGE_SIZE;
use crate::state::cache::default_cache_dir;

#[derive(Debug, Clone, Parser)]
#[command(name = "album-viewer", version, about = "Browse photo albums served as JSON")]
pub struct Config {
    /// Base URL of the album server (serves albums.json and images.json)
    #[arg(long, env = "ALBUM_VIEWER_SERVER", default_value = "http://localhost:8080/")]
    pub server: String,

    /// Albums loaded per page
    #[arg(long, env = "ALBUM_VIEWER_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Only load more albums with the "Load more" button, not on scroll
    #[arg(long, env = "ALBUM_VIEWER_NO_AUTO_LOAD")]
    pub no_auto_load: bool,

    /// Where downloaded thumbnails and previews are kept
    #[arg(long, env = "ALBUM_VIEWER_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Keep downloaded images in memory only
    #[arg(long)]
    pub no_disk_cache: bool,
}

impl Config {
    /// Parsed server URL, always ending with `/` so endpoints join below it
    pub fn server_url(&self) -> Result<Url> {
        let mut raw = self.server.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw)
            .map_err(|e| ViewerError::Config(format!("server URL {:?}: {}", self.server, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ViewerError::Config(format!(
                "server URL must be http or https, got {}",
                other
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ViewerError::Config("page size must be at least 1".to_string()));
        }
        self.server_url()?;
        Ok(())
    }

    pub fn auto_load(&self) -> bool {
        !self.no_auto_load
    }

    /// Disk cache location, or `None` when disabled or undeterminable
    pub fn disk_cache_dir(&self) -> Option<PathBuf> {
        if self.no_disk_cache {
            return None;
        }
        self.cache_dir.clone().or_else(default_cache_dir)
    }
}
