//! Port definitions for image caching and loading.

use bytes::Bytes;

use crate::domain::entities::{CacheKey, LoadedImage};
use crate::domain::errors::CacheResult;

/// Port for a single cache tier holding raw image bytes.
/// Implementations must be thread-safe.
#[async_trait::async_trait]
pub trait ImageCachePort: Send + Sync {
    /// Attempts to get a payload from the cache.
    /// Returns None if not cached; tier-local I/O failures also
    /// surface as None so they degrade to a miss.
    async fn get(&self, key: &CacheKey) -> Option<Bytes>;

    /// Stores a payload in the cache.
    async fn put(&self, key: CacheKey, bytes: Bytes);

    /// Removes a payload from the cache.
    async fn evict(&self, key: &CacheKey);

    /// Returns the current number of cached payloads.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all payloads from the cache.
    async fn clear(&self);
}

/// Port for loading images through the tier hierarchy.
#[async_trait::async_trait]
pub trait ImageLoaderPort: Send + Sync {
    /// Loads an image, consulting memory, then disk, then network.
    async fn load(&self, url: &str) -> CacheResult<LoadedImage>;

    /// Starts loading without blocking; the result is delivered on the
    /// event channel handed out at construction.
    fn load_async(&self, key: CacheKey, url: String);

    /// Cancels any queued load for the given key.
    fn cancel(&self, key: &CacheKey);
}
