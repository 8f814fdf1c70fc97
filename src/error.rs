use thiserror::Error;

/// Errors that can occur when fetching or decoding the episodes listing
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to fetch episodes from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode episodes response from {url}: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Episode '{id}' has an unparseable published_at value '{value}'")]
    InvalidTimestamp { id: String, value: String },

    #[error("Episode '{id}' has an invalid media URL '{value}'")]
    InvalidMediaUrl { id: String, value: String },
}
