//! Gist API HTTP client

use crate::error::Result;
use crate::types::Gist;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = concat!("gist-api-rs/", env!("CARGO_PKG_VERSION"));

/// Client for the GitHub Gist API
///
/// Every call issues exactly one request. There is no retry and no caching
/// here; callers decide both.
#[derive(Clone)]
pub struct GistClient {
    http: reqwest::Client,
    base_url: String,
}

impl GistClient {
    /// Base URL of the public GitHub API
    pub const DEFAULT_BASE_URL: &'static str = "https://api.github.com";

    /// Create a client for the public GitHub API (30 second timeout)
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Create a client against a custom API root (GitHub Enterprise, tests)
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_options(base_url, DEFAULT_USER_AGENT, Duration::from_secs(30))
    }

    /// Create a client with every knob set explicitly
    ///
    /// GitHub rejects requests that carry no `User-Agent`, so one is always sent.
    pub fn with_options(base_url: &str, user_agent: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a gist by identifier
    ///
    /// Transport failures and non-success statuses surface as
    /// [`GistError::Http`](crate::GistError::Http); a body that is not a gist
    /// surfaces as [`GistError::Json`](crate::GistError::Json).
    pub async fn fetch(&self, id: &str) -> Result<Gist> {
        let url = format!("{}/gists/{}", self.base_url, urlencoding::encode(id));
        debug!(url = %url, "Fetching gist");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?;

        // Decode separately so a malformed body is reported as a JSON error
        // rather than folded into the transport error.
        let body = response.text().await?;
        let gist: Gist = serde_json::from_str(&body)?;

        debug!(gist_id = %gist.id, files = gist.files.len(), "Fetched gist");
        Ok(gist)
    }
}

impl Default for GistClient {
    fn default() -> Self {
        Self::new()
    }
}
