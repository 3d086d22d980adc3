//! Error types for the Gist API client

use std::fmt;

/// Errors that can occur when fetching a gist
///
/// Both variants are upstream failures; neither says anything about the
/// gist's files themselves.
#[derive(Debug)]
pub enum GistError {
    /// The gist could not be retrieved: connection refused, timeout, or a
    /// non-2xx answer turned into an error by `error_for_status` (unknown
    /// gist ids give 404, rate limiting gives 403). [`GistError::status`]
    /// carries the upstream code when there was one.
    Http(reqwest::Error),
    /// The API answered 2xx but the body is not a gist document, e.g. an
    /// HTML error page from a proxy or a payload missing the `files` map
    Json(serde_json::Error),
}

impl GistError {
    /// True when the API answered but the body could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Upstream HTTP status, if the API answered with a non-2xx code
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http(e) => e.status(),
            Self::Json(_) => None,
        }
    }
}

impl fmt::Display for GistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Gist HTTP error: {}", e),
            Self::Json(e) => write!(f, "Gist JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for GistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for GistError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for GistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Gist API operations
pub type Result<T> = std::result::Result<T, GistError>;
