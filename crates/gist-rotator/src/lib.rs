//! Gist Rotator - serve the files of a GitHub Gist one request at a time
//!
//! Each GET for a gist identifier returns the content of the gist's next
//! file, cycling through its files in name order. Gists are cached for two
//! hours so repeated polling does not spend GitHub API quota.

pub mod clock;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod rotation;
pub mod server;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use error::{Result, RotatorError};
pub use fetcher::DocumentFetcher;
pub use rotation::{CacheSnapshot, Rotation, RotationCache, CACHE_TTL_MINS};
pub use server::{create_router, start_server, ServerState, SharedState};
pub use types::CacheStats;
