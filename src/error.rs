/// Error types for the album viewer
///
/// Every fetch and cache operation returns a `Result<_, ViewerError>`.
/// Errors are cloned into UI messages, so the variants carry strings
/// rather than the underlying (non-Clone) error values.
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewerError {
    /// Transport failure (DNS, connect, TLS, body read)
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Payload did not match the expected JSON shape
    #[error("could not decode {endpoint}: {message}")]
    Decode { endpoint: &'static str, message: String },

    /// Disk cache read/write failure
    #[error("cache I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Downloaded bytes are not a readable image
    #[error("unreadable image {filename}: {message}")]
    Image { filename: String, message: String },

    /// Invalid command line / environment configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ViewerError {
    pub fn http(url: impl Into<String>, err: reqwest::Error) -> Self {
        ViewerError::Http {
            url: url.into(),
            message: err.to_string(),
        }
    }

    pub fn decode(endpoint: &'static str, err: serde_json::Error) -> Self {
        ViewerError::Decode {
            endpoint,
            message: err.to_string(),
        }
    }

    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        ViewerError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = ViewerError::Status {
            url: "http://localhost:8080/albums.json".to_string(),
            status: 502,
        };
        assert_eq!(
            err.to_string(),
            "http://localhost:8080/albums.json returned HTTP 502"
        );
    }

    #[test]
    fn test_decode_keeps_endpoint() {
        let json_err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err = ViewerError::decode("albums.json", json_err);
        assert!(err.to_string().starts_with("could not decode albums.json"));
    }
}
