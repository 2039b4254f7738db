use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "artvault",
    version,
    about = "Two-tier image cache and async loader",
    long_about = None
)]
pub struct CliArgs {
    /// Image URLs to load.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Directory to write fetched payloads into.
    #[arg(short, long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Clear both cache tiers and exit.
    #[arg(long)]
    pub clear_cache: bool,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Maximum payloads held in the memory tier.
    #[arg(long)]
    pub memory_capacity: Option<usize>,

    /// Directory backing the disk tier.
    #[arg(long, value_name = "PATH")]
    pub disk_dir: Option<PathBuf>,

    /// Maximum disk tier size in bytes.
    #[arg(long)]
    pub disk_max_bytes: Option<u64>,

    /// Maximum concurrent downloads.
    #[arg(long)]
    pub max_concurrent_downloads: Option<usize>,

    /// Network request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Bounded retries on transient fetch failures.
    #[arg(long)]
    pub retry_attempts: Option<u32>,
}
