mod fetch;
mod model;

pub use fetch::{
    DEFAULT_BASE_URL, DEFAULT_LIMIT, FetchOptions, SortOrder, build_episodes_url, fetch_episodes,
};
pub use model::{Episode, RawEpisode, RawFile, format_duration, format_publish_date};
