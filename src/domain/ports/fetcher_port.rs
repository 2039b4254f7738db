//! Port definition for network byte retrieval.

use bytes::Bytes;

use crate::domain::errors::CacheResult;

/// Port for fetching raw image bytes over the network.
#[async_trait::async_trait]
pub trait FetcherPort: Send + Sync {
    /// Fetches the payload at `url`.
    ///
    /// # Errors
    /// Returns `CacheError::Fetch` on connectivity, timeout, or non-2xx
    /// responses, and `CacheError::NotFound` when the server reports the
    /// resource missing.
    async fn fetch(&self, url: &str) -> CacheResult<Bytes>;
}
