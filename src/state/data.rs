/// Shared data structures for the application state
///
/// These structs represent the records served by the album endpoints
/// and flow between the network layer and the UI layer.
use chrono::DateTime;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// Seconds since the Unix epoch.
///
/// The server serializes timestamps as decimal strings (`"1700000000"`),
/// but plain JSON numbers are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

/// An album is identified by the timestamp all its photos share.
pub type AlbumId = Timestamp;

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl<'de> Visitor<'de> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("epoch seconds as a number or a decimal string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
                Ok(Timestamp(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
                i64::try_from(v)
                    .map(Timestamp)
                    .map_err(|_| E::custom(format!("timestamp {} out of range", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
                v.trim()
                    .parse::<i64>()
                    .map(Timestamp)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(TimestampVisitor)
    }
}

/// Human-readable album title, e.g. "Tue 14 November 2023".
///
/// Album timestamps are midnight UTC of the capture day, so the date is
/// formatted in UTC. Timestamps chrono cannot represent fall back to the
/// raw number, which keeps this total.
pub fn album_title(album: AlbumId) -> String {
    match DateTime::from_timestamp(album.0, 0) {
        Some(date) => date.format("%a %d %B %Y").to_string(),
        None => album.0.to_string(),
    }
}

/// A single photo record from `images.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photo {
    /// Album this photo belongs to
    #[serde(rename = "AlbumDateTime")]
    pub album: AlbumId,
    /// Capture time, if the server sent one
    #[serde(rename = "DateTime", default)]
    pub taken_at: Option<Timestamp>,
    /// Filename only (e.g., "IMG_0042.jpg"), unique across the library
    #[serde(rename = "Filename")]
    pub filename: String,
    /// Small rendition shown in the grid
    #[serde(rename = "ThumbUrl", default)]
    pub thumb_url: String,
    /// Medium rendition shown in the lightbox
    #[serde(rename = "MediumUrl", default)]
    pub medium_url: String,
    /// Any other fields the server adds, kept verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Photo {
    /// Caption shown under the lightbox preview
    pub fn caption(&self) -> String {
        match self.taken_at.and_then(|t| DateTime::from_timestamp(t.0, 0)) {
            Some(taken) => format!("{} · {}", self.filename, taken.format("%H:%M:%S")),
            None => self.filename.clone(),
        }
    }

    /// Grid thumbnail URL, falling back to the medium rendition
    pub fn grid_url(&self) -> Option<&str> {
        [self.thumb_url.as_str(), self.medium_url.as_str()]
            .into_iter()
            .find(|url| !url.is_empty())
    }
}
