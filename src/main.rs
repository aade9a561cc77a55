mod api;
mod commands;
mod gateway;
mod texts;

use anyhow::Context as _;
use chrono::Utc;
use clap::{Parser, Subcommand};
use mimwatch_channels::telegram::TelegramChannel;
use mimwatch_core::{
    config::{self, Config, WatchConfig},
    shellexpand,
    traits::{Extractor, PageSource, Persistence},
    AppState,
};
use mimwatch_memory::Store;
use mimwatch_source::{MimExtractor, PageFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "mimwatch",
    version,
    about = "MiM Watcher — USR Lombardia news notifications on Telegram"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the watcher daemon.
    Start,
    /// Show configuration and stored state.
    Status,
    /// Fetch the page once and print the latest item. Changes nothing.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    let rejected = cfg.apply_env_overrides(|key| std::env::var(key).ok());

    let _log_guard = init_tracing(&cfg.watch)?;
    for msg in rejected {
        warn!("{msg}");
    }

    match cli.command {
        Commands::Start => {
            cfg.validate()?;

            let store = Store::new(&cfg.memory).await?;
            // Starting empty would overwrite the stored subscribers on the
            // first save.
            let snapshot = store.load().await.context("loading stored state")?;
            let state = Arc::new(AppState::restore(snapshot, Utc::now()));

            let channel = TelegramChannel::new(
                &cfg.telegram,
                cfg.source.request_timeout(),
                cfg.schedule.long_poll_timeout_secs,
            )?;
            let fetcher = PageFetcher::new(&cfg.source)?;
            let extractor = MimExtractor::new(&cfg.source.url)?;

            info!(
                "{} starting | {} subscribers | {} seen | health: {}",
                cfg.watch.name,
                state.registry.len(),
                state.seen.len(),
                if cfg.api.enabled {
                    format!("{}:{}", cfg.api.host, cfg.api.port)
                } else {
                    "disabled".to_string()
                },
            );

            let gw = gateway::Gateway::new(
                Arc::new(channel),
                Arc::new(fetcher),
                Arc::new(extractor),
                Arc::new(store),
                state,
                cfg.schedule.clone(),
                cfg.api.clone(),
            );
            gw.run().await?;
        }
        Commands::Status => print_status(&cli.config, &cfg).await,
        Commands::Check => {
            let fetcher = PageFetcher::new(&cfg.source)?;
            let extractor = MimExtractor::new(&cfg.source.url)?;

            let html = fetcher
                .fetch()
                .await
                .with_context(|| format!("fetching {}", fetcher.url()))?;
            match extractor.extract_latest(&html) {
                Some(item) => {
                    println!("Latest item on {}:\n", fetcher.url());
                    println!("  title: {}", item.title());
                    println!("  url:   {}", item.url());
                    println!("  key:   {}", item.key());
                }
                None => println!("No news item found on {}", fetcher.url()),
            }
        }
    }

    Ok(())
}

/// Install the stdout subscriber and, when enabled, a daily rolling file.
///
/// `RUST_LOG` wins over the configured level. The returned guard must live
/// until exit so buffered file output gets flushed.
fn init_tracing(watch: &WatchConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&watch.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    if !watch.log_to_file {
        registry.init();
        return Ok(None);
    }

    let dir = log_dir(watch)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, "mimwatch.log"));
    registry
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}

/// Create `{data_dir}/logs` and return it.
fn log_dir(watch: &WatchConfig) -> anyhow::Result<PathBuf> {
    let dir = PathBuf::from(shellexpand(&watch.data_dir)).join("logs");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    Ok(dir)
}

async fn print_status(config_path: &str, cfg: &Config) {
    println!("MiM Watcher — Status\n");
    println!("Config:          {config_path}");
    println!("Source:          {}", cfg.source.url);
    println!(
        "Check interval:  {}s (commands every {}s)",
        cfg.schedule.news_interval_secs, cfg.schedule.poll_interval_secs
    );
    println!(
        "Telegram:        {}",
        if cfg.telegram.bot_token.is_empty() {
            "missing bot_token"
        } else {
            "configured"
        }
    );
    println!(
        "Health endpoint: {}",
        if cfg.api.enabled {
            format!("{}:{}", cfg.api.host, cfg.api.port)
        } else {
            "disabled".to_string()
        }
    );
    println!();

    match Store::new(&cfg.memory).await {
        Ok(store) => match store.load().await {
            Ok(snapshot) => {
                println!("Subscribers:     {}", snapshot.subscribers.len());
                println!("Seen items:      {}", snapshot.seen.len());
                if let Some(latest) = snapshot.seen.first() {
                    println!("Latest seen:     {latest}");
                }
                if let Some(stats) = snapshot.stats {
                    println!("News sent:       {}", stats.total_news_sent);
                    println!("Commands:        {}", stats.total_commands_processed);
                }
            }
            Err(e) => println!("State:           unreadable ({e})"),
        },
        Err(e) => println!("State:           unavailable ({e})"),
    }
}
