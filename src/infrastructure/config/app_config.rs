//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "artvault";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "seonghun";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Cache subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum payloads held in the memory tier.
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: usize,

    /// Directory backing the disk tier. Defaults to the platform
    /// cache directory when unset.
    #[serde(default)]
    pub disk_dir: Option<PathBuf>,

    /// Maximum disk tier size in bytes.
    #[serde(default = "default_disk_max_bytes")]
    pub disk_max_bytes: u64,

    /// Maximum concurrent downloads.
    #[serde(default = "default_max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,

    /// Network request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bounded retries on transient fetch failures. Zero disables
    /// retrying entirely.
    #[serde(default)]
    pub retry_attempts: u32,

    /// Base retry backoff in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl CacheConfig {
    /// Returns the effective disk tier directory.
    #[must_use]
    pub fn effective_disk_dir(&self) -> PathBuf {
        self.disk_dir.clone().unwrap_or_else(default_disk_dir)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_capacity: default_memory_capacity(),
            disk_dir: None,
            disk_max_bytes: default_disk_max_bytes(),
            max_concurrent_downloads: default_max_concurrent_downloads(),
            timeout_secs: default_timeout_secs(),
            retry_attempts: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Remote backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the auth service.
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,

    /// Base URL of the document database.
    #[serde(default = "default_database_base_url")]
    pub database_base_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            auth_base_url: default_auth_base_url(),
            database_base_url: default_database_base_url(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Cache subsystem configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Remote backend configuration.
    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_memory_capacity() -> usize {
    50
}

fn default_disk_max_bytes() -> u64 {
    200 * 1024 * 1024
}

fn default_max_concurrent_downloads() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_auth_base_url() -> String {
    "https://auth.example.com/v1".to_string()
}

fn default_database_base_url() -> String {
    "https://db.example.com".to_string()
}

fn default_disk_dir() -> PathBuf {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
        || std::env::temp_dir().join("artvault").join("images"),
        |dirs| dirs.cache_dir().join("images"),
    )
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(memory_capacity) = args.memory_capacity {
            self.cache.memory_capacity = memory_capacity;
        }
        if let Some(disk_dir) = args.disk_dir {
            self.cache.disk_dir = Some(disk_dir);
        }
        if let Some(disk_max_bytes) = args.disk_max_bytes {
            self.cache.disk_max_bytes = disk_max_bytes;
        }
        if let Some(concurrency) = args.max_concurrent_downloads {
            self.cache.max_concurrent_downloads = concurrency;
        }
        if let Some(timeout) = args.timeout_secs {
            self.cache.timeout_secs = timeout;
        }
        if let Some(retries) = args.retry_attempts {
            self.cache.retry_attempts = retries;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("artvault.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            cache: CacheConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_with_cache_section() {
        let toml_content = r#"
            log_level = "debug"

            [cache]
            memory_capacity = 10
            disk_max_bytes = 1048576
            retry_attempts = 2

            [remote]
            auth_base_url = "https://auth.local/v1"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.cache.memory_capacity, 10);
        assert_eq!(config.cache.disk_max_bytes, 1_048_576);
        assert_eq!(config.cache.retry_attempts, 2);
        assert_eq!(config.remote.auth_base_url, "https://auth.local/v1");
        // Untouched fields keep their defaults.
        assert_eq!(config.cache.max_concurrent_downloads, 4);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.cache.memory_capacity, 50);
        assert_eq!(config.cache.retry_attempts, 0);
        assert!(config.cache.disk_dir.is_none());
    }

    #[test]
    fn test_merge_with_args_overrides_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            log_path: None,
            log_level: Some(LogLevel::Trace),
            memory_capacity: Some(5),
            disk_dir: Some(PathBuf::from("/tmp/cache")),
            disk_max_bytes: None,
            max_concurrent_downloads: Some(1),
            timeout_secs: None,
            retry_attempts: Some(3),
            urls: Vec::new(),
            output_dir: None,
            clear_cache: false,
        };

        config.merge_with_args(args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.cache.memory_capacity, 5);
        assert_eq!(config.cache.disk_dir, Some(PathBuf::from("/tmp/cache")));
        assert_eq!(config.cache.max_concurrent_downloads, 1);
        assert_eq!(config.cache.retry_attempts, 3);
        // Unset args leave file values alone.
        assert_eq!(config.cache.timeout_secs, 30);
    }
}
