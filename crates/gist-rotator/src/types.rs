//! Response and statistics types for the gist rotator

use serde::{Deserialize, Serialize};

/// Statistics about the rotation cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    /// Requests served from a fresh entry
    pub hits: u64,
    /// Requests that had to go to the remote API (absent or stale entry)
    pub misses: u64,
    /// Misses caused by an expired entry
    pub refreshes: u64,
    pub fetch_failures: u64,
}

/// Informational body for gists that cannot be rotated
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}
