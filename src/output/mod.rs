//! Output module for human-readable reports
//!
//! This module handles:
//! - Printing the crawl plan for dry runs
//! - Loading and printing store statistics

pub mod stats;

pub use stats::{load_statistics, print_statistics, StoreStatistics};

use crate::config::Config;

/// Prints what a crawl with this configuration would do
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `base_url` - The host requests would go to
pub fn print_plan(config: &Config, base_url: &str) {
    let platform = config.provider.platform;

    println!("=== Crawl Plan ===\n");
    println!("  Platform: {} ({})", platform, platform.region_code());
    println!("  API host: {}", base_url);
    println!(
        "  First match id: {}",
        platform.match_id(config.crawler.start_index)
    );
    println!(
        "  Max consecutive errors: {}",
        config.crawler.max_consecutive_errors
    );
    println!(
        "  Retry: {} attempts (rate limits {}, Retry-After {})",
        config.retry.max_attempts,
        if config.retry.retry_rate_limited {
            "retried"
        } else {
            "skipped"
        },
        if config.retry.respect_retry_after {
            "honored"
        } else {
            "ignored"
        }
    );
    println!(
        "  Not-found thresholds: warn > {}, error > {}, exit > {}",
        config.not_found.warn, config.not_found.error, config.not_found.exit
    );
    println!("  Database: {}", config.storage.database_path);
}
