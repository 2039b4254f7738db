//! HTTP network fetcher for raw image bytes.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::ports::FetcherPort;

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Bounded retries on transient failures. Zero reproduces the
    /// original no-retry behavior.
    pub retry_attempts: u32,
    /// Base backoff between retries in milliseconds, scaled linearly
    /// by attempt number.
    pub retry_backoff_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retry_attempts: 0,
            retry_backoff_ms: 500,
        }
    }
}

/// Fetches image bytes over plain HTTP GET through a shared
/// `reqwest` client (ambient connection pool).
pub struct HttpFetcher {
    client: Client,
    config: FetcherConfig,
}

/// Failure of a single fetch attempt, before retry policy is applied.
struct AttemptError {
    error: CacheError,
    transient: bool,
}

impl HttpFetcher {
    /// Creates a new fetcher.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: FetcherConfig) -> CacheResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CacheError::fetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Creates a fetcher around an existing client, sharing its
    /// connection pool.
    #[must_use]
    pub fn with_client(client: Client, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    async fn fetch_once(&self, url: &str) -> Result<Bytes, AttemptError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                format!("failed to connect: {e}")
            } else {
                format!("request failed: {e}")
            };
            AttemptError {
                error: CacheError::fetch(message),
                transient: e.is_timeout() || e.is_connect(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, url));
        }

        let bytes = response.bytes().await.map_err(|e| AttemptError {
            error: CacheError::fetch(format!("Failed to read body: {e}")),
            transient: true,
        })?;

        Ok(bytes)
    }

    fn status_error(status: StatusCode, url: &str) -> AttemptError {
        let error = match status {
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                CacheError::not_found(format!("resource missing at {url}"))
            }
            _ => CacheError::fetch(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )),
        };
        AttemptError {
            error,
            transient: status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

#[async_trait::async_trait]
impl FetcherPort for HttpFetcher {
    async fn fetch(&self, url: &str) -> CacheResult<Bytes> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_once(url).await {
                Ok(bytes) => {
                    debug!(url = %url, size = bytes.len(), "Downloaded payload");
                    return Ok(bytes);
                }
                Err(failure) if failure.transient && attempt < self.config.retry_attempts => {
                    attempt += 1;
                    let backoff = std::time::Duration::from_millis(
                        self.config.retry_backoff_ms * u64::from(attempt),
                    );
                    warn!(
                        url = %url,
                        attempt = attempt,
                        error = %failure.error,
                        "Transient fetch failure, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_maps_not_found() {
        let failure = HttpFetcher::status_error(StatusCode::NOT_FOUND, "https://x/missing.png");
        assert!(matches!(failure.error, CacheError::NotFound(_)));
        assert!(!failure.transient);
    }

    #[test]
    fn test_status_error_maps_server_error_transient() {
        let failure = HttpFetcher::status_error(StatusCode::BAD_GATEWAY, "https://x/img.png");
        assert!(failure.error.is_fetch());
        assert!(failure.transient);
    }

    #[test]
    fn test_default_config_has_no_retries() {
        let config = FetcherConfig::default();
        assert_eq!(config.retry_attempts, 0);
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_error() {
        let fetcher = HttpFetcher::new(FetcherConfig {
            timeout_secs: 2,
            ..FetcherConfig::default()
        })
        .unwrap();

        // Reserved port with nothing listening.
        let result = fetcher.fetch("http://127.0.0.1:9/img.png").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().is_fetch());
    }
}
