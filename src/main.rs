use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use artvault::domain::entities::CacheKey;
use artvault::domain::ports::ImageLoaderPort;
use artvault::infrastructure::{AppConfig, CacheFactory, CliArgs, StorageManager};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, CliArgs)> {
    let args = CliArgs::parse();

    let storage = StorageManager::new()?;
    let config = storage.load_config(args.config.as_deref())?;

    Ok((config, args))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (mut config, args) = load_config()?;

    let urls = args.urls.clone();
    let output_dir = args.output_dir.clone();
    let clear_cache = args.clear_cache;
    config.merge_with_args(args);

    init_logging(&config)?;

    info!(version = artvault::VERSION, "Starting artvault");

    let factory = CacheFactory::new(config.cache.clone());
    let (loader, _events) = factory.build_loader().await?;

    if clear_cache {
        loader.clear_all().await;
        println!("cleared cache at {}", factory.disk_dir().display());
        return Ok(());
    }

    let loader = std::sync::Arc::new(loader);
    let mut tasks = Vec::new();
    for url in urls {
        let loader = loader.clone();
        tasks.push(tokio::spawn(async move {
            let result = loader.load(&url).await;
            (url, result)
        }));
    }

    let mut failures = 0usize;
    for outcome in futures_util::future::join_all(tasks).await {
        let (url, result) = outcome?;
        match result {
            Ok(loaded) => {
                println!(
                    "{url}: {} bytes via {} (key {})",
                    loaded.bytes.len(),
                    loaded.source,
                    loaded.key
                );
                if let Some(dir) = &output_dir {
                    tokio::fs::create_dir_all(dir).await?;
                    let path = dir.join(format!("{}.img", CacheKey::from_url(&url)));
                    tokio::fs::write(&path, &loaded.bytes).await?;
                    println!("  wrote {}", path.display());
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("{url}: {e}");
            }
        }
    }

    println!("{}", loader.memory_cache_stats());

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
