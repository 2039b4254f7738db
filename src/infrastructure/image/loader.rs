//! Async image loading orchestrator.
//!
//! Implements a three-tier lookup: memory -> disk -> network, with
//! back-fill of faster tiers on any hit from a slower one.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{Mutex, RwLock, Semaphore, broadcast, mpsc};
use tracing::{debug, error, info, warn};

use crate::domain::entities::{CacheKey, ImageSource, LoadedImage};
use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::{FetcherPort, ImageCachePort, ImageLoaderPort};

use super::disk_cache::DiskImageCache;
use super::memory_cache::MemoryImageCache;

/// Message sent when an image finishes loading.
#[derive(Debug, Clone)]
pub struct ImageLoadedEvent {
    /// The cache key.
    pub key: CacheKey,
    /// The loaded payload, or the terminal failure.
    pub result: Result<LoadedImage, CacheError>,
}

/// Configuration for the image loader.
#[derive(Debug, Clone)]
pub struct ImageLoaderConfig {
    /// Maximum concurrent downloads in the background pipeline.
    pub max_concurrent_downloads: usize,
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: 4,
        }
    }
}

/// Shared tier state and the load algorithm itself.
///
/// Owned jointly by the public loader and the background worker so both
/// paths go through the same coalescing map.
struct LoaderCore {
    memory_cache: Arc<MemoryImageCache>,
    disk_cache: Arc<DiskImageCache>,
    fetcher: Arc<dyn FetcherPort>,
    in_flight: Mutex<HashMap<CacheKey, broadcast::Sender<FlightOutcome>>>,
}

/// What the owner of a coalesced load hands to its followers: the
/// payload plus the tier that actually served it.
type FlightOutcome = Result<(Bytes, ImageSource), CacheError>;

/// Role of a caller in a coalesced load.
enum Flight {
    /// First caller for this key; performs the fetch.
    Owner(broadcast::Sender<FlightOutcome>),
    /// Attached to an already pending fetch.
    Follower(broadcast::Receiver<FlightOutcome>),
}

impl LoaderCore {
    /// Loads a payload for `key`, consulting tiers strictly in order.
    /// Concurrent calls for the same cold key share a single fetch.
    async fn load_keyed(&self, key: &CacheKey, url: &str) -> CacheResult<LoadedImage> {
        if let Some(bytes) = self.memory_cache.get(key).await {
            return Ok(LoadedImage {
                key: key.clone(),
                bytes,
                source: ImageSource::MemoryCache,
            });
        }

        if let Some(bytes) = self.disk_cache.get(key).await {
            self.memory_cache.put(key.clone(), bytes.clone()).await;
            return Ok(LoadedImage {
                key: key.clone(),
                bytes,
                source: ImageSource::DiskCache,
            });
        }

        let flight = {
            let mut in_flight = self.in_flight.lock().await;
            if let Some(tx) = in_flight.get(key) {
                Flight::Follower(tx.subscribe())
            } else {
                let (tx, _) = broadcast::channel(1);
                in_flight.insert(key.clone(), tx.clone());
                Flight::Owner(tx)
            }
        };

        match flight {
            Flight::Follower(mut rx) => {
                debug!(key = %key, "Attached to in-flight fetch");
                let (bytes, source) = rx
                    .recv()
                    .await
                    .map_err(|_| CacheError::fetch("in-flight fetch abandoned"))??;
                Ok(LoadedImage {
                    key: key.clone(),
                    bytes,
                    source,
                })
            }
            Flight::Owner(tx) => {
                // A fetch that completed between our memory miss and
                // taking ownership has already back-filled memory, so
                // re-check before touching the network.
                let outcome = if let Some(bytes) = self.memory_cache.get(key).await {
                    Ok((bytes, ImageSource::MemoryCache))
                } else {
                    self.fetch_and_backfill(key, url)
                        .await
                        .map(|bytes| (bytes, ImageSource::Network))
                };

                {
                    let mut in_flight = self.in_flight.lock().await;
                    in_flight.remove(key);
                }
                let _ = tx.send(outcome.clone());

                outcome.map(|(bytes, source)| LoadedImage {
                    key: key.clone(),
                    bytes,
                    source,
                })
            }
        }
    }

    /// Fetches from the network and back-fills disk, then memory.
    /// A disk write failure degrades to a warning; the load still
    /// succeeds.
    async fn fetch_and_backfill(&self, key: &CacheKey, url: &str) -> CacheResult<Bytes> {
        debug!(key = %key, url = %url, "Downloading payload from network");

        let bytes = self.fetcher.fetch(url).await?;

        if let Err(e) = self.disk_cache.put(key, &bytes).await {
            warn!(key = %key, error = %e, "Failed to back-fill disk tier");
        }
        self.memory_cache.put(key.clone(), bytes.clone()).await;

        Ok(bytes)
    }
}

/// Orchestrates image loading from memory, disk, and network.
pub struct ImageLoader {
    core: Arc<LoaderCore>,
    pending_loads: Arc<RwLock<HashSet<CacheKey>>>,
    request_tx: mpsc::UnboundedSender<LoaderCommand>,
    config: ImageLoaderConfig,
}

#[derive(Debug)]
enum LoaderCommand {
    Load { key: CacheKey, url: String },
    Cancel { key: CacheKey },
    CancelAll,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// State for the background worker loop.
struct WorkerState {
    core: Arc<LoaderCore>,
    pending_loads: Arc<RwLock<HashSet<CacheKey>>>,
    event_tx: mpsc::UnboundedSender<ImageLoadedEvent>,
    semaphore: Arc<Semaphore>,
    request_rx: mpsc::UnboundedReceiver<LoaderCommand>,
}

impl ImageLoader {
    /// Creates a new image loader over explicit cache instances.
    ///
    /// Results of background loads are delivered through `event_tx`;
    /// the caller decides which execution context drains the receiver.
    pub fn new(
        config: ImageLoaderConfig,
        event_tx: &mpsc::UnboundedSender<ImageLoadedEvent>,
        memory_cache: Arc<MemoryImageCache>,
        disk_cache: Arc<DiskImageCache>,
        fetcher: Arc<dyn FetcherPort>,
    ) -> Self {
        let core = Arc::new(LoaderCore {
            memory_cache,
            disk_cache,
            fetcher,
            in_flight: Mutex::new(HashMap::new()),
        });

        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_downloads));
        let pending_loads = Arc::new(RwLock::new(HashSet::new()));

        let worker_state = WorkerState {
            core: core.clone(),
            pending_loads: pending_loads.clone(),
            event_tx: event_tx.clone(),
            semaphore,
            request_rx,
        };

        tokio::spawn(Self::run_worker_loop(worker_state));

        Self {
            core,
            pending_loads,
            request_tx,
            config,
        }
    }

    /// Worker loop to handle download requests and throttling.
    async fn run_worker_loop(mut state: WorkerState) {
        let mut queue: std::collections::VecDeque<(CacheKey, String)> =
            std::collections::VecDeque::new();

        loop {
            tokio::select! {
                cmd = state.request_rx.recv() => {
                    match cmd {
                        Some(LoaderCommand::Load { key, url }) => {
                            if !queue.iter().any(|(qkey, _)| *qkey == key) {
                                queue.push_front((key, url));
                            }
                        }
                        Some(LoaderCommand::Cancel { key }) => {
                            queue.retain(|(qkey, _)| *qkey != key);
                        }
                        Some(LoaderCommand::CancelAll) => {
                            queue.clear();
                        }
                        None => break,
                    }
                }
                Ok(permit) = state.semaphore.clone().acquire_owned(), if !queue.is_empty() => {
                    if let Some((key, url)) = queue.pop_front() {
                        let core = state.core.clone();
                        let pending_loads = state.pending_loads.clone();
                        let event_tx = state.event_tx.clone();

                        tokio::spawn(async move {
                            {
                                let mut pending = pending_loads.write().await;
                                if pending.contains(&key) {
                                    return;
                                }
                                pending.insert(key.clone());
                            }

                            let result = core.load_keyed(&key, &url).await;

                            {
                                let mut pending = pending_loads.write().await;
                                pending.remove(&key);
                            }

                            let event = ImageLoadedEvent {
                                key: key.clone(),
                                result,
                            };
                            let _ = event_tx.send(event);
                            drop(permit);
                        });
                    }
                }
            }
        }
    }

    /// Checks memory cache without touching slower tiers or the LRU
    /// order.
    pub async fn check_memory_cache(&self, key: &CacheKey) -> Option<Bytes> {
        self.core.memory_cache.peek(key).await
    }

    /// Loads a payload by key and source URL.
    ///
    /// # Errors
    /// Returns the terminal fetch failure if no tier holds the payload
    /// and the network fetch fails.
    pub async fn load_keyed(&self, key: &CacheKey, url: &str) -> CacheResult<LoadedImage> {
        self.core.load_keyed(key, url).await
    }

    /// Cancels all pending loads.
    pub async fn cancel_all(&self) {
        if let Err(e) = self.request_tx.send(LoaderCommand::CancelAll) {
            error!("Failed to send cancel all request: {}", e);
        }
        let mut pending = self.pending_loads.write().await;
        let count = pending.len();
        pending.clear();
        if count > 0 {
            debug!(count = count, "Cancelled all pending image loads");
        }
    }

    /// Returns true if a key is currently loading in the background.
    pub async fn is_loading(&self, key: &CacheKey) -> bool {
        let pending = self.pending_loads.read().await;
        pending.contains(key)
    }

    /// Returns the number of pending background loads.
    pub async fn pending_count(&self) -> usize {
        let pending = self.pending_loads.read().await;
        pending.len()
    }

    /// Returns memory cache statistics.
    #[must_use]
    pub fn memory_cache_stats(&self) -> super::memory_cache::CacheStats {
        self.core.memory_cache.stats()
    }

    /// Returns the disk tier size in bytes.
    #[must_use]
    pub fn disk_cache_size(&self) -> u64 {
        self.core.disk_cache.current_size()
    }

    /// Clears all caches.
    pub async fn clear_all(&self) {
        self.core.memory_cache.clear().await;
        if let Err(e) = self.core.disk_cache.clear().await {
            warn!(error = %e, "Failed to clear disk cache");
        }
        info!("Cleared all image caches");
    }
}

#[async_trait::async_trait]
impl ImageLoaderPort for ImageLoader {
    async fn load(&self, url: &str) -> CacheResult<LoadedImage> {
        let key = CacheKey::from_url(url);
        self.core.load_keyed(&key, url).await
    }

    fn load_async(&self, key: CacheKey, url: String) {
        if let Err(e) = self.request_tx.send(LoaderCommand::Load { key, url }) {
            error!("Failed to send load request: {}", e);
        }
    }

    fn cancel(&self, key: &CacheKey) {
        if let Err(e) = self
            .request_tx
            .send(LoaderCommand::Cancel { key: key.clone() })
        {
            error!("Failed to send cancel request: {}", e);
        }
        debug!(key = %key, "Cancelled image load");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockFetcher;
    use tempfile::TempDir;

    const PAYLOAD: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    struct Harness {
        loader: ImageLoader,
        fetcher: Arc<MockFetcher>,
        memory: Arc<MemoryImageCache>,
        disk: Arc<DiskImageCache>,
        _event_rx: mpsc::UnboundedReceiver<ImageLoadedEvent>,
        _temp: TempDir,
    }

    async fn harness_with(fetcher: MockFetcher) -> Harness {
        let temp = TempDir::new().unwrap();
        let memory = Arc::new(MemoryImageCache::new(10));
        let disk = Arc::new(
            DiskImageCache::new(temp.path().to_path_buf(), 1024 * 1024)
                .await
                .unwrap(),
        );
        let fetcher = Arc::new(fetcher);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let loader = ImageLoader::new(
            ImageLoaderConfig::default(),
            &event_tx,
            memory.clone(),
            disk.clone(),
            fetcher.clone(),
        );
        Harness {
            loader,
            fetcher,
            memory,
            disk,
            _event_rx: event_rx,
            _temp: temp,
        }
    }

    #[tokio::test]
    async fn test_cold_load_fetches_and_backfills_both_tiers() {
        let h = harness_with(MockFetcher::new(PAYLOAD)).await;
        let url = "https://x/img1.png";
        let key = CacheKey::from_url(url);

        let loaded = h.loader.load(url).await.unwrap();

        assert_eq!(loaded.bytes.as_ref(), PAYLOAD);
        assert_eq!(loaded.source, ImageSource::Network);
        assert_eq!(h.memory.get(&key).await, Some(Bytes::from_static(PAYLOAD)));
        assert_eq!(h.disk.get(&key).await, Some(Bytes::from_static(PAYLOAD)));
    }

    #[tokio::test]
    async fn test_memory_hit_short_circuits_network() {
        let h = harness_with(MockFetcher::new(PAYLOAD)).await;
        let url = "https://x/img1.png";
        let key = CacheKey::from_url(url);

        h.memory
            .put(key.clone(), Bytes::from_static(PAYLOAD))
            .await;
        h.fetcher.disable();

        let loaded = h.loader.load(url).await.unwrap();

        assert_eq!(loaded.source, ImageSource::MemoryCache);
        assert_eq!(h.fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_disk_hit_promotes_to_memory() {
        let h = harness_with(MockFetcher::new(PAYLOAD)).await;
        let url = "https://x/img1.png";
        let key = CacheKey::from_url(url);

        h.disk.put(&key, PAYLOAD).await.unwrap();
        h.fetcher.disable();

        let loaded = h.loader.load(url).await.unwrap();

        assert_eq!(loaded.source, ImageSource::DiskCache);
        assert_eq!(h.memory.get(&key).await, Some(Bytes::from_static(PAYLOAD)));
    }

    #[tokio::test]
    async fn test_fetch_failure_populates_neither_tier() {
        let h = harness_with(MockFetcher::failing()).await;
        let url = "https://x/broken.png";
        let key = CacheKey::from_url(url);

        let result = h.loader.load(url).await;

        assert!(result.is_err());
        assert!(h.memory.get(&key).await.is_none());
        assert!(h.disk.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_second_load_served_from_memory_with_fetcher_disabled() {
        let h = harness_with(MockFetcher::new(PAYLOAD)).await;
        let url = "https://x/img1.png";

        let first = h.loader.load(url).await.unwrap();
        assert_eq!(first.source, ImageSource::Network);

        h.fetcher.disable();

        let second = h.loader.load(url).await.unwrap();
        assert_eq!(second.source, ImageSource::MemoryCache);
        assert_eq!(second.bytes, first.bytes);
    }

    #[tokio::test]
    async fn test_concurrent_loads_coalesce_into_one_fetch() {
        let h = harness_with(MockFetcher::new(PAYLOAD)).await;
        let url = "https://x/img1.png";
        let loader = Arc::new(h.loader);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let loader = loader.clone();
            handles.push(tokio::spawn(
                async move { loader.load(url).await },
            ));
        }

        for handle in handles {
            let loaded = handle.await.unwrap().unwrap();
            assert_eq!(loaded.bytes.as_ref(), PAYLOAD);
        }

        assert_eq!(h.fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_follower_reports_the_tier_that_served_the_owner() {
        let h = harness_with(MockFetcher::new(PAYLOAD)).await;
        let url = "https://x/img1.png";
        let key = CacheKey::from_url(url);

        // Stand in for an owner that ends up serving from memory.
        let (tx, _) = broadcast::channel(1);
        h.loader
            .core
            .in_flight
            .lock()
            .await
            .insert(key.clone(), tx.clone());

        let follower = {
            let core = h.loader.core.clone();
            let key = key.clone();
            tokio::spawn(async move { core.load_keyed(&key, url).await })
        };

        while tx.receiver_count() == 0 {
            tokio::task::yield_now().await;
        }

        h.loader.core.in_flight.lock().await.remove(&key);
        tx.send(Ok((Bytes::from_static(PAYLOAD), ImageSource::MemoryCache)))
            .unwrap();

        let loaded = follower.await.unwrap().unwrap();
        assert_eq!(loaded.source, ImageSource::MemoryCache);
        assert_eq!(loaded.bytes.as_ref(), PAYLOAD);
    }

    #[tokio::test]
    async fn test_background_load_delivers_event() {
        let temp = TempDir::new().unwrap();
        let memory = Arc::new(MemoryImageCache::new(10));
        let disk = Arc::new(
            DiskImageCache::new(temp.path().to_path_buf(), 1024 * 1024)
                .await
                .unwrap(),
        );
        let fetcher = Arc::new(MockFetcher::new(PAYLOAD));
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let loader = ImageLoader::new(
            ImageLoaderConfig::default(),
            &event_tx,
            memory,
            disk,
            fetcher,
        );

        let url = "https://x/img1.png";
        let key = CacheKey::from_url(url);
        loader.load_async(key.clone(), url.to_string());

        let event = event_rx.recv().await.unwrap();
        assert_eq!(event.key, key);
        let loaded = event.result.unwrap();
        assert_eq!(loaded.bytes.as_ref(), PAYLOAD);
    }

    #[tokio::test]
    async fn test_pending_tracking_starts_empty() {
        let h = harness_with(MockFetcher::new(PAYLOAD)).await;
        assert_eq!(h.loader.pending_count().await, 0);
    }
}
