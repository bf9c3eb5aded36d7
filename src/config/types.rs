use crate::region::Platform;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Match Harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(rename = "not-found", default)]
    pub not_found: NotFoundConfig,
    pub storage: StorageConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Platform whose match ids are crawled (e.g. "RU", "EUW1")
    pub platform: Platform,

    /// API key given inline
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    /// File holding the API key (whitespace is trimmed)
    #[serde(rename = "api-key-file")]
    pub api_key_file: Option<PathBuf>,

    /// Overrides the regional routing host
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Crawl cursor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// First numeric match index to visit
    #[serde(rename = "start-index")]
    pub start_index: u64,

    /// Unexpected errors in a row tolerated before the crawl stops
    #[serde(rename = "max-consecutive-errors", default = "default_max_errors")]
    pub max_consecutive_errors: u32,
}

/// Retry behavior for transient upstream failures
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Attempts per retrieval, including the first one
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Retry rate-limited responses instead of treating them as absent
    #[serde(rename = "retry-rate-limited", default = "default_true")]
    pub retry_rate_limited: bool,

    /// Sleep for the upstream Retry-After before retrying
    #[serde(rename = "respect-retry-after", default = "default_true")]
    pub respect_retry_after: bool,
}

/// Not-found gap thresholds, measured in indices since the last hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NotFoundConfig {
    #[serde(default = "default_warn")]
    pub warn: u64,

    #[serde(default = "default_error")]
    pub error: u64,

    #[serde(default = "default_exit")]
    pub exit: u64,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_rate_limited: true,
            respect_retry_after: true,
        }
    }
}

impl Default for NotFoundConfig {
    fn default() -> Self {
        Self {
            warn: default_warn(),
            error: default_error(),
            exit: default_exit(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_errors() -> u32 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_warn() -> u64 {
    100
}

fn default_error() -> u64 {
    250
}

fn default_exit() -> u64 {
    500
}
