use std::env;

use axum::http::HeaderValue;

use crate::error::{Result, RotatorError};
use crate::rotation::DEFAULT_EXPECTED_TYPE;

const DEFAULT_PORT: u16 = 8888;
const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_USER_AGENT: &str = concat!("gist-rotator/", env!("CARGO_PKG_VERSION"));

/// Service configuration parsed from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub user_agent: String,
    pub expected_content_type: String,
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_url = lookup("GIST_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        url::Url::parse(&api_url)
            .map_err(|e| RotatorError::Config(format!("invalid GIST_API_URL {api_url:?}: {e}")))?;

        let user_agent =
            lookup("GIST_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        // Sent verbatim as a header; the HTTP client builder panics on invalid values
        HeaderValue::from_str(&user_agent).map_err(|e| {
            RotatorError::Config(format!("invalid GIST_USER_AGENT {user_agent:?}: {e}"))
        })?;

        let expected_content_type = lookup("EXPECTED_CONTENT_TYPE")
            .unwrap_or_else(|| DEFAULT_EXPECTED_TYPE.to_string());

        let json_logs = lookup("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);

        Ok(Self {
            port,
            api_url,
            user_agent,
            expected_content_type,
            json_logs,
        })
    }
}
