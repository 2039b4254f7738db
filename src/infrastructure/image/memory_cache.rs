//! In-memory LRU image cache implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;

use bytes::Bytes;
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::CacheKey;
use crate::domain::ports::ImageCachePort;

/// Default maximum number of payloads to cache in memory.
pub const DEFAULT_CACHE_SIZE: usize = 50;

/// In-memory LRU cache for raw image bytes.
/// Thread-safe and optimized for frequent reads.
///
/// Bounded by entry count; the unbounded-growth behavior of the
/// original design is deliberately not reproduced.
pub struct MemoryImageCache {
    cache: Arc<RwLock<LruCache<CacheKey, Bytes>>>,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
    // Mirrors the LRU's entry count; updated under the write lock so
    // `len` never has to contend for it.
    size: std::sync::atomic::AtomicUsize,
}

impl MemoryImageCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(RwLock::new(LruCache::new(cap))),
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
            size: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(std::sync::atomic::Ordering::Relaxed);
        let misses = self.misses.load(std::sync::atomic::Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }

    /// Peeks at a payload without promoting it in the LRU.
    /// Use this in read-only contexts to avoid write locks.
    pub async fn peek(&self, key: &CacheKey) -> Option<Bytes> {
        let cache = self.cache.read().await;
        cache.peek(key).cloned()
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached payloads.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} entries, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait::async_trait]
impl ImageCachePort for MemoryImageCache {
    async fn get(&self, key: &CacheKey) -> Option<Bytes> {
        let mut cache = self.cache.write().await;
        if let Some(bytes) = cache.get(key) {
            self.hits.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Memory cache hit");
            Some(bytes.clone())
        } else {
            self.misses
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(key = %key, "Memory cache miss");
            None
        }
    }

    async fn put(&self, key: CacheKey, bytes: Bytes) {
        let mut cache = self.cache.write().await;
        debug!(key = %key, size = bytes.len(), "Storing payload in memory cache");
        cache.put(key, bytes);
        self.size
            .store(cache.len(), std::sync::atomic::Ordering::Relaxed);
    }

    async fn evict(&self, key: &CacheKey) {
        let mut cache = self.cache.write().await;
        if cache.pop(key).is_some() {
            debug!(key = %key, "Evicted payload from memory cache");
        }
        self.size
            .store(cache.len(), std::sync::atomic::Ordering::Relaxed);
    }

    fn len(&self) -> usize {
        self.size.load(std::sync::atomic::Ordering::Relaxed)
    }

    async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
        self.size.store(0, std::sync::atomic::Ordering::Relaxed);
        debug!("Cleared memory image cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_put_and_get() {
        let cache = MemoryImageCache::new(10);
        let key = CacheKey::new("test1");
        let payload = Bytes::from_static(b"png bytes");

        cache.put(key.clone(), payload.clone()).await;
        let retrieved = cache.get(&key).await;

        assert_eq!(retrieved, Some(payload));
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let cache = MemoryImageCache::new(10);
        let key = CacheKey::new("nonexistent");

        let result = cache.get(&key).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_latest_value_wins() {
        let cache = MemoryImageCache::new(10);
        let key = CacheKey::new("test1");

        cache.put(key.clone(), Bytes::from_static(b"old")).await;
        cache.put(key.clone(), Bytes::from_static(b"new")).await;

        assert_eq!(cache.get(&key).await, Some(Bytes::from_static(b"new")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_eviction() {
        let cache = MemoryImageCache::new(2);

        let key1 = CacheKey::new("test1");
        let key2 = CacheKey::new("test2");
        let key3 = CacheKey::new("test3");

        let payload = Bytes::from_static(b"data");

        cache.put(key1.clone(), payload.clone()).await;
        cache.put(key2.clone(), payload.clone()).await;
        cache.put(key3.clone(), payload.clone()).await;

        // key1 should be evicted (LRU)
        assert!(cache.get(&key1).await.is_none());
        assert!(cache.get(&key2).await.is_some());
        assert!(cache.get(&key3).await.is_some());
    }

    #[tokio::test]
    async fn test_cache_stats() {
        let cache = MemoryImageCache::new(10);
        let key = CacheKey::new("test1");

        cache.put(key.clone(), Bytes::from_static(b"data")).await;

        // Hit
        let _ = cache.get(&key).await;
        // Miss
        let _ = cache.get(&CacheKey::new("missing")).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_len_accurate_while_write_lock_held() {
        let cache = MemoryImageCache::new(10);
        let key = CacheKey::new("test1");

        cache.put(key.clone(), Bytes::from_static(b"data")).await;

        // A writer holding the lock must not make len report empty.
        let guard = cache.cache.write().await;
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().size, 1);
        drop(guard);
    }

    #[tokio::test]
    async fn test_peek_does_not_promote() {
        let cache = MemoryImageCache::new(2);

        let key1 = CacheKey::new("test1");
        let key2 = CacheKey::new("test2");
        let payload = Bytes::from_static(b"data");

        cache.put(key1.clone(), payload.clone()).await;
        cache.put(key2.clone(), payload.clone()).await;

        // Peek at key1 (should not promote it)
        let _ = cache.peek(&key1).await;

        // Add key3, should evict key1 (since peek doesn't promote)
        let key3 = CacheKey::new("test3");
        cache.put(key3.clone(), payload).await;

        assert!(cache.peek(&key1).await.is_none());
    }
}
