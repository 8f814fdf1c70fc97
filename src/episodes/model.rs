use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Deserialize;
use url::Url;

use crate::error::ApiError;

/// Raw episode record as returned by the episodes API
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub published_at: String,
    pub file: RawFile,
}

/// Nested media descriptor on a raw episode record
#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    pub url: String,
    pub duration: u64,
}

/// A normalized episode, ready for listing and playback
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: Url,
    /// URL of the playable audio file
    pub url: Url,
    /// Raw duration in seconds
    pub duration: u64,
    /// Duration rendered as zero-padded "HH:MM:SS"
    pub duration_as_string: String,
    /// Publish date rendered as a short listing date, e.g. "08 Jan 21"
    pub published_at: String,
}

impl Episode {
    /// Normalize a raw API record into a display-ready episode
    pub fn from_raw(raw: RawEpisode) -> Result<Episode, ApiError> {
        let published =
            parse_published_at(&raw.published_at).ok_or_else(|| ApiError::InvalidTimestamp {
                id: raw.id.clone(),
                value: raw.published_at.clone(),
            })?;

        let thumbnail = Url::parse(&raw.thumbnail).map_err(|_| ApiError::InvalidMediaUrl {
            id: raw.id.clone(),
            value: raw.thumbnail.clone(),
        })?;

        let url = Url::parse(&raw.file.url).map_err(|_| ApiError::InvalidMediaUrl {
            id: raw.id.clone(),
            value: raw.file.url.clone(),
        })?;

        Ok(Episode {
            published_at: format_publish_date(&published),
            duration_as_string: format_duration(raw.file.duration),
            duration: raw.file.duration,
            id: raw.id,
            title: raw.title,
            members: raw.members,
            thumbnail,
            url,
        })
    }
}

/// Parse a published_at timestamp
///
/// The API emits RFC 3339, but some backends drop the offset; those values
/// are taken as UTC.
fn parse_published_at(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    let formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for format in formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    None
}

/// Format a publish timestamp as a short listing date, e.g. "08 Jan 21"
pub fn format_publish_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%d %b %y").to_string()
}

/// Convert a duration in seconds to a zero-padded "HH:MM:SS" string
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
