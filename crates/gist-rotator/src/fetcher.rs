//! Seam between the rotation cache and the remote gist source

use async_trait::async_trait;
use gist_api::{Gist, GistClient, GistError};

/// Source of gist documents
///
/// Implementations perform one lookup per call and keep no state about
/// previous calls; retry policy belongs to the caller.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Gist, GistError>;
}

#[async_trait]
impl DocumentFetcher for GistClient {
    async fn fetch(&self, id: &str) -> Result<Gist, GistError> {
        GistClient::fetch(self, id).await
    }
}
