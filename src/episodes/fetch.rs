// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use url::Url;

use crate::error::ApiError;
use crate::http::HttpClient;

use super::model::{Episode, RawEpisode};

/// Default base URL of the episodes API
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Default number of records requested per listing fetch
pub const DEFAULT_LIMIT: usize = 12;

/// Sort direction for the episodes listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Query settings for the episodes collection endpoint
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Base URL of the episodes API
    pub base_url: Url,
    /// Maximum number of records to request
    pub limit: usize,
    /// Field the server sorts by
    pub sort: String,
    /// Sort direction
    pub order: SortOrder,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid default base URL"),
            limit: DEFAULT_LIMIT,
            sort: "published_at".to_string(),
            order: SortOrder::Descending,
        }
    }
}

/// Build the collection query URL for the given options
pub fn build_episodes_url(options: &FetchOptions) -> Result<Url, ApiError> {
    let mut url = options.base_url.join("episodes")?;
    url.query_pairs_mut()
        .append_pair("_limit", &options.limit.to_string())
        .append_pair("_sort", &options.sort)
        .append_pair("_order", options.order.as_query_value());

    Ok(url)
}

/// Fetch the episodes listing and normalize every record
///
/// The server returns records already ordered by the requested sort; the
/// order is preserved here.
pub async fn fetch_episodes<C: HttpClient>(
    client: &C,
    options: &FetchOptions,
) -> Result<Vec<Episode>, ApiError> {
    let url = build_episodes_url(options)?;

    let bytes = client
        .get_bytes(url.as_str())
        .await
        .map_err(|e| ApiError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    let raw: Vec<RawEpisode> =
        serde_json::from_slice(&bytes).map_err(|e| ApiError::DecodeFailed {
            url: url.to_string(),
            source: e,
        })?;

    raw.into_iter().map(Episode::from_raw).collect()
}
