pub mod episodes;
pub mod error;
pub mod home;
pub mod http;
pub mod player;

// Re-export main types for convenience
pub use episodes::{Episode, FetchOptions, SortOrder, fetch_episodes, format_duration};
pub use error::ApiError;
pub use home::{HomeFeed, LATEST_COUNT, REVALIDATE_SECONDS, load_home};
pub use http::{HttpClient, ReqwestClient};
pub use player::{PlayerAction, PlayerState};
