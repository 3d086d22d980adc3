//! Error types for the gist rotator

use std::fmt;

#[derive(Debug)]
pub enum RotatorError {
    /// Remote gist could not be fetched or decoded
    Fetch(gist_api::GistError),
    /// Configuration error
    Config(String),
    Io(Box<std::io::Error>),
}

impl fmt::Display for RotatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "Fetch error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for RotatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Io(e) => Some(e.as_ref()),
            Self::Config(_) => None,
        }
    }
}

impl From<gist_api::GistError> for RotatorError {
    fn from(e: gist_api::GistError) -> Self {
        Self::Fetch(e)
    }
}

impl From<std::io::Error> for RotatorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Box::new(e))
    }
}

impl From<tracing_subscriber::filter::ParseError> for RotatorError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RotatorError>;
