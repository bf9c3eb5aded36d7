//! Match Harvester main entry point
//!
//! This is the command-line interface for the sequential match ingester.

use anyhow::Context;
use clap::Parser;
use match_harvester::config::{load_config_with_hash, resolve_api_key, Config};
use match_harvester::output::{load_statistics, print_plan, print_statistics};
use match_harvester::provider::RiotProvider;
use match_harvester::storage::open_storage;
use match_harvester::{Crawler, HarvestError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when the not-found gap passes the exit threshold
const EXIT_GAP_EXCEEDED: u8 = 3;

/// Match Harvester: a sequential match-record ingester
///
/// Walks a platform's match id space one index at a time, fetching each
/// match summary and timeline and storing them as a normalized entity graph
/// in SQLite.
#[derive(Parser, Debug)]
#[command(name = "match-harvester")]
#[command(version)]
#[command(about = "A sequential match-record ingester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured start index
    #[arg(long, value_name = "N")]
    start_index: Option<u64>,

    /// Stop after this many indices instead of running until a fatal stop
    #[arg(long, value_name = "N")]
    count: Option<u64>,

    /// Validate config and show the crawl plan without fetching anything
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            exit_code_for(&e)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(start) = cli.start_index {
        config.crawler.start_index = start;
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_crawl(config, cli.count).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("match_harvester=info,warn"),
            1 => EnvFilter::new("match_harvester=debug,info"),
            2 => EnvFilter::new("match_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn exit_code_for(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<HarvestError>() {
        Some(HarvestError::NotFoundGapExceeded { .. }) => ExitCode::from(EXIT_GAP_EXCEEDED),
        _ => ExitCode::FAILURE,
    }
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    resolve_api_key(&config.provider)?;
    let provider = RiotProvider::new(&config.provider, "dry-run")?;

    print_plan(config, provider.base_url().as_str());

    println!("\n✓ Configuration is valid");
    println!("✓ API key resolved");

    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.storage.database_path);

    let storage = open_storage(Path::new(&config.storage.database_path))
        .context("Failed to open database")?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, count: Option<u64>) -> anyhow::Result<()> {
    let api_key = resolve_api_key(&config.provider)?;
    let provider = RiotProvider::new(&config.provider, &api_key)?;
    tracing::info!(
        "Platform {} via {}",
        config.provider.platform,
        provider.base_url()
    );

    let storage = open_storage(Path::new(&config.storage.database_path))
        .with_context(|| format!("Failed to open database {}", config.storage.database_path))?;

    let mut crawler = Crawler::new(&config, provider, storage);
    let result = match count {
        Some(n) => crawler.run_for(n).await,
        None => crawler.run().await,
    };

    match result {
        Ok(()) => {
            tracing::info!("Crawl completed, next index {}", crawler.index());
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "Crawl stopped at index {} (last found {})",
                crawler.index(),
                crawler.last_found()
            );
            Err(e.into())
        }
    }
}
