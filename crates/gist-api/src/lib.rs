//! Rust client for the GitHub Gist API
//!
//! Fetches a single gist by identifier and decodes it into typed values.
//! The client holds no state beyond its connection pool, so one instance can
//! be shared freely between tasks.
//!
//! # Example
//!
//! ```no_run
//! use gist_api::GistClient;
//!
//! # async fn example() -> Result<(), gist_api::GistError> {
//! let client = GistClient::new();
//!
//! let gist = client.fetch("aa5a315d61ae9438b18d").await?;
//! for (name, file) in &gist.files {
//!     println!("{name}: {} ({} bytes)", file.file_type, file.content.len());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::GistClient;
pub use error::{GistError, Result};
pub use types::{Gist, GistFile, Owner};
