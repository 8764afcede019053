//! Drug Shortage Tracker CLI
//!
//! Fetches one window of shortage records, diffs it against the stored
//! snapshot and prints a summary to stdout.

use std::path::{Path, PathBuf};

use clap::Parser;
use shortage_tracker::{
    error::{AppError, Result},
    models::Config,
    pipeline::{self, TrackOptions},
    services::ShortageClient,
    storage::LocalStorage,
};

/// Track drug shortage updates from openFDA
#[derive(Parser, Debug)]
#[command(name = "shortage-tracker", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "tracker.toml")]
    config: PathBuf,

    /// Shortage endpoint URL
    #[arg(long)]
    base_url: Option<String>,

    /// Search query passed through to the endpoint
    #[arg(long)]
    search: Option<String>,

    /// Max records per request (must be > 0)
    #[arg(long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Result offset (must be >= 0)
    #[arg(long, allow_negative_numbers = true)]
    skip: Option<i64>,

    /// Path to the local snapshot file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Do not write the snapshot to disk
    #[arg(long)]
    no_save: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer command-line flags over the file configuration.
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            config.source.base_url = base_url.clone();
        }
        if let Some(search) = &self.search {
            config.source.search = Some(search.clone());
        }
        if let Some(limit) = self.limit {
            if limit <= 0 {
                return Err(AppError::validation("--limit must be > 0"));
            }
            config.source.limit = u32::try_from(limit)
                .map_err(|_| AppError::validation(format!("--limit {limit} is too large")))?;
        }
        if let Some(skip) = self.skip {
            config.source.skip =
                u64::try_from(skip).map_err(|_| AppError::validation("--skip must be >= 0"))?;
        }
        if let Some(path) = &self.snapshot {
            config.store.snapshot_path = path.clone();
        }
        if self.no_save {
            config.store.save = false;
        }
        if let Some(timeout) = self.timeout {
            config.source.timeout_secs = timeout;
        }
        config.validate()
    }
}

/// Read the config file, or fall back to defaults when it is absent.
fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        log::debug!("Loading configuration from {}", path.display());
        Config::load(path)
    } else {
        log::warn!("No config at {}, using defaults", path.display());
        Ok(Config::default())
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(&cli.config)?;
    cli.apply(&mut config)?;

    let client = ShortageClient::new(&config.source)?;
    let store = LocalStorage::new(&config.store.snapshot_path);
    let options = TrackOptions::from(&config);

    let outcome = pipeline::run_tracker(&client, &store, &options).await?;

    println!(
        "{}",
        pipeline::format_report(
            outcome.fetched,
            &outcome.diff,
            config.report.max_preview_items
        )
    );

    if outcome.saved {
        log::info!("Snapshot saved to {}", store.path().display());
    }

    Ok(())
}
