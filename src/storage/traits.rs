//! Storage traits and error types
//!
//! This module defines the gateway interface the crawler and transformer
//! persist through, and the associated error types.

use crate::model::{ChallengeId, MatchGraph};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Challenge '{0}' could not be resolved after upsert")]
    ChallengeNotResolved(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Tables whose row counts are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Matches,
    Teams,
    Bans,
    Participants,
    Perks,
    Missions,
    Challenges,
    ChallengeLinks,
    Frames,
    ParticipantFrames,
    Events,
    EventAssists,
    VictimDamageDealt,
    VictimDamageReceived,
}

impl Table {
    pub const ALL: [Table; 14] = [
        Table::Matches,
        Table::Teams,
        Table::Bans,
        Table::Participants,
        Table::Perks,
        Table::Missions,
        Table::Challenges,
        Table::ChallengeLinks,
        Table::Frames,
        Table::ParticipantFrames,
        Table::Events,
        Table::EventAssists,
        Table::VictimDamageDealt,
        Table::VictimDamageReceived,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Matches => "matches",
            Self::Teams => "teams",
            Self::Bans => "bans",
            Self::Participants => "participants",
            Self::Perks => "perks",
            Self::Missions => "missions",
            Self::Challenges => "challenges",
            Self::ChallengeLinks => "challenge_participant_links",
            Self::Frames => "frames",
            Self::ParticipantFrames => "participant_frames",
            Self::Events => "events",
            Self::EventAssists => "event_assists",
            Self::VictimDamageDealt => "victim_damage_dealt",
            Self::VictimDamageReceived => "victim_damage_received",
        }
    }
}

/// Persistence gateway for match graphs
///
/// Implementations own their connection; all calls happen on the single
/// crawl task.
pub trait Gateway {
    /// Returns true if a match with this global id is already stored
    fn exists(&self, match_id: &str) -> StorageResult<bool>;

    /// Ensures one catalog row per challenge name and returns their ids
    ///
    /// Idempotent: names already present resolve to their existing rows.
    ///
    /// # Arguments
    ///
    /// * `names` - Distinct challenge names referenced by a match
    ///
    /// # Returns
    ///
    /// A map from every requested name to its challenge id
    fn dedupe_challenges(
        &mut self,
        names: &BTreeSet<String>,
    ) -> StorageResult<HashMap<String, ChallengeId>>;

    /// Persists a whole match graph atomically
    ///
    /// Either every entity of the graph is written or none is. Storing a
    /// match id that is already present fails.
    ///
    /// # Returns
    ///
    /// The row id of the stored match
    fn store(&mut self, graph: &MatchGraph) -> StorageResult<i64>;

    /// Counts the rows of one table
    fn count_rows(&self, table: Table) -> StorageResult<u64>;

    /// Gets the most recently stored match id
    fn latest_match_id(&self) -> StorageResult<Option<String>>;
}
