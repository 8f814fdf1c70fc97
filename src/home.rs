// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::episodes::{Episode, FetchOptions, fetch_episodes};
use crate::error::ApiError;
use crate::http::HttpClient;

/// Revalidation period for the rendered listing, in seconds (8 hours)
pub const REVALIDATE_SECONDS: u64 = 60 * 60 * 8;

/// Number of episodes shown in the "latest releases" section
pub const LATEST_COUNT: usize = 2;

/// The homepage listing, split into its two rendered sections
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    /// The newest episodes, up to [`LATEST_COUNT`] of them
    pub latest: Vec<Episode>,
    /// Every remaining episode, in the same server-provided order
    pub all: Vec<Episode>,
}

impl HomeFeed {
    /// Split a normalized, newest-first sequence into the two sections
    pub fn from_episodes(episodes: Vec<Episode>) -> HomeFeed {
        let mut latest = episodes;
        let all = latest.split_off(LATEST_COUNT.min(latest.len()));

        HomeFeed { latest, all }
    }

    /// The full playback queue in page order, latest section first
    ///
    /// Play buttons hand this combined list to the player together with the
    /// clicked row's position in it.
    pub fn queue(&self) -> Vec<Episode> {
        self.latest.iter().chain(self.all.iter()).cloned().collect()
    }

    /// Total number of listed episodes across both sections
    pub fn len(&self) -> usize {
        self.latest.len() + self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty() && self.all.is_empty()
    }
}

/// Fetch the episodes listing and split it for the homepage
pub async fn load_home<C: HttpClient>(
    client: &C,
    options: &FetchOptions,
) -> Result<HomeFeed, ApiError> {
    let episodes = fetch_episodes(client, options).await?;
    Ok(HomeFeed::from_episodes(episodes))
}
