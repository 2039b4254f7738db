//! Composition root for the cache subsystem.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::domain::errors::CacheResult;
use crate::domain::ports::FetcherPort;

use super::config::CacheConfig;
use super::image::{
    DiskImageCache, FetcherConfig, HttpFetcher, ImageLoadedEvent, ImageLoader, ImageLoaderConfig,
    MemoryImageCache,
};

/// Builds and wires the cache tiers, fetcher, and loader.
///
/// Call sites never construct the dependencies by hand; every instance
/// is explicit and owned here, so tests can build isolated factories
/// over temporary directories.
pub struct CacheFactory {
    config: CacheConfig,
}

impl CacheFactory {
    /// Creates a factory from configuration.
    #[must_use]
    pub const fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Returns the directory backing the disk tier.
    #[must_use]
    pub fn disk_dir(&self) -> PathBuf {
        self.config.effective_disk_dir()
    }

    /// Builds the disk cache over its configured directory.
    ///
    /// # Errors
    /// Returns error if the cache directory cannot be created.
    pub async fn build_disk_cache(&self) -> CacheResult<Arc<DiskImageCache>> {
        let cache = DiskImageCache::new(self.disk_dir(), self.config.disk_max_bytes).await?;
        Ok(Arc::new(cache))
    }

    /// Builds the memory cache.
    #[must_use]
    pub fn build_memory_cache(&self) -> Arc<MemoryImageCache> {
        Arc::new(MemoryImageCache::new(self.config.memory_capacity))
    }

    /// Builds the HTTP fetcher.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn build_fetcher(&self) -> CacheResult<Arc<HttpFetcher>> {
        let fetcher = HttpFetcher::new(FetcherConfig {
            timeout_secs: self.config.timeout_secs,
            retry_attempts: self.config.retry_attempts,
            retry_backoff_ms: self.config.retry_backoff_ms,
        })?;
        Ok(Arc::new(fetcher))
    }

    /// Builds a ready-to-use loader with its caches injected, along
    /// with the receiver that background load results arrive on.
    ///
    /// # Errors
    /// Returns error if the disk cache or HTTP client cannot be
    /// created.
    pub async fn build_loader(
        &self,
    ) -> CacheResult<(ImageLoader, mpsc::UnboundedReceiver<ImageLoadedEvent>)> {
        let memory_cache = self.build_memory_cache();
        let disk_cache = self.build_disk_cache().await?;
        let fetcher: Arc<dyn FetcherPort> = self.build_fetcher()?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let loader = ImageLoader::new(
            ImageLoaderConfig {
                max_concurrent_downloads: self.config.max_concurrent_downloads,
            },
            &event_tx,
            memory_cache,
            disk_cache,
            fetcher,
        );

        info!(
            memory_capacity = self.config.memory_capacity,
            disk_dir = %self.disk_dir().display(),
            "Image loader assembled"
        );

        Ok((loader, event_rx))
    }
}
