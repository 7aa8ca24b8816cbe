use reqwest::{Client, Request, Url};

use crate::error::{Result, ViewerError};
use crate::state::data::{AlbumId, Photo};

pub const ALBUMS_ENDPOINT: &str = "albums.json";
pub const IMAGES_ENDPOINT: &str = "images.json";

/// HTTP client for the album server.
///
/// Cheap to clone; every fetch is handed to an iced `Task` as an owned future.
#[derive(Debug, Clone)]
pub struct AlbumClient {
    http: Client,
    base: Url,
}

impl AlbumClient {
    /// `base` must end with a `/` so endpoints resolve below it
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
        }
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        self.base
            .join(name)
            .map_err(|e| ViewerError::Config(format!("cannot resolve {}: {}", name, e)))
    }

    /// `GET albums.json`: every album timestamp, newest first
    pub async fn fetch_albums(&self) -> Result<Vec<AlbumId>> {
        let url = self.endpoint(ALBUMS_ENDPOINT)?;
        log::debug!("Fetching album list from {}", url);

        let request = self
            .http
            .get(url.clone())
            .build()
            .map_err(|e| ViewerError::http(url.as_str(), e))?;
        let body = self.execute(request).await?;
        decode_albums(&body)
    }

    /// Build `GET images.json?albums=<id>&albums=<id>...` for one batch
    pub fn images_request(&self, albums: &[AlbumId]) -> Result<Request> {
        let url = self.endpoint(IMAGES_ENDPOINT)?;
        let query: Vec<(&str, String)> = albums
            .iter()
            .map(|album| ("albums", album.to_string()))
            .collect();

        self.http
            .get(url.clone())
            .query(&query)
            .build()
            .map_err(|e| ViewerError::http(url.as_str(), e))
    }

    /// `GET images.json` for a batch of albums
    pub async fn fetch_images(&self, albums: Vec<AlbumId>) -> Result<Vec<Photo>> {
        let request = self.images_request(&albums)?;
        log::debug!("Fetching images for {} albums", albums.len());

        let body = self.execute(request).await?;
        decode_images(&body)
    }

    /// Raw bytes of a thumbnail or medium rendition
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let request = self
            .http
            .get(url)
            .build()
            .map_err(|e| ViewerError::http(url, e))?;
        self.execute(request).await
    }

    async fn execute(&self, request: Request) -> Result<Vec<u8>> {
        let url = request.url().to_string();
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ViewerError::http(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ViewerError::http(&url, e))?;
        Ok(body.to_vec())
    }
}

/// Decode the album list payload
pub fn decode_albums(body: &[u8]) -> Result<Vec<AlbumId>> {
    serde_json::from_slice(body).map_err(|e| ViewerError::decode(ALBUMS_ENDPOINT, e))
}

/// Decode the image list payload; `null` is treated as no images
pub fn decode_images(body: &[u8]) -> Result<Vec<Photo>> {
    let photos: Option<Vec<Photo>> =
        serde_json::from_slice(body).map_err(|e| ViewerError::decode(IMAGES_ENDPOINT, e))?;
    Ok(photos.unwrap_or_default())
}
