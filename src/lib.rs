//! Match Harvester: a sequential match-record ingester
//!
//! This crate walks a platform's numeric match id space one identifier at a
//! time, retrieves each match summary and event timeline from the upstream
//! API, normalizes the pair into a relational entity graph and stores it
//! atomically in SQLite.

pub mod config;
pub mod harvest;
pub mod model;
pub mod output;
pub mod provider;
pub mod region;
pub mod storage;
pub mod transform;
pub mod upstream;

use thiserror::Error;

/// Main error type for Match Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to decode upstream record {match_id}: {source}")]
    Decode {
        match_id: String,
        source: serde_json::Error,
    },

    #[error("Upstream rejected request for {match_id} with HTTP {status}")]
    UpstreamRejected { match_id: String, status: u16 },

    #[error("{label} retrieval failed after {attempts} attempts: {reason}")]
    RetriesExhausted {
        label: String,
        attempts: u32,
        reason: String,
    },

    #[error("Not-found gap exceeded: last found = {last_found}, index = {index}")]
    NotFoundGapExceeded { last_found: u64, index: u64 },

    #[error("Consecutive error limit exceeded: {count} errors in a row")]
    ErrorLimitExceeded { count: u32 },
}

impl HarvestError {
    /// Returns true if this error must stop the crawl loop
    ///
    /// Everything else is scoped to a single iteration.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotFoundGapExceeded { .. } | Self::ErrorLimitExceeded { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("No API key configured (set RIOT_API_KEY, api-key or api-key-file)")]
    MissingApiKey,
}

/// Errors raised while turning an upstream record pair into an entity graph
///
/// Any of these abandons the whole match; no partial graph is produced.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Participant id {0} appears more than once")]
    DuplicateParticipant(u32),

    #[error("Participant id {0} is outside 1..={max}", max = transform::MAX_PARTICIPANT_ID)]
    ParticipantOutOfRange(u32),

    #[error("Expected 2 teams, got {0}")]
    TeamCount(usize),

    #[error("Team id {0} appears more than once")]
    DuplicateTeam(i64),

    #[error("Challenge '{0}' was not resolved by the store")]
    UnknownChallenge(String),

    #[error("Participant frame references unknown participant {0}")]
    UnknownFrameParticipant(u32),

    #[error("Match id mismatch: expected {expected}, found {found}")]
    MatchIdMismatch { expected: String, found: String },

    #[error("Storage error during transform: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Result type alias for Match Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{Crawler, RetrievalPolicy, StepOutcome};
pub use model::MatchGraph;
pub use region::Platform;
pub use storage::{Gateway, SqliteStorage};
pub use transform::transform;
