//! Normalized entity graph for one ingested match
//!
//! The graph is built in memory by the transformer and handed to the store as
//! a single unit. Cross references between entities are arena indices into
//! the graph's own vectors (`ParticipantRef`, `TeamRef`), never pointers, so
//! the graph stays acyclic and every reference is scoped to its match.
//!
//! The one exception is `ChallengeId`: challenges are a global lookup table
//! and are resolved against the store before the graph is built.

mod enums;
mod stats;

pub use enums::{GameMode, GameType, Lane, Role};
pub use stats::{ChampionStats, DamageStats, Missions, ParticipantStats};

use chrono::{DateTime, Utc};

/// Index of a participant inside `MatchGraph::participants`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantRef(pub usize);

/// Index of a team inside `MatchGraph::teams`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamRef(pub usize);

/// Row id of a globally deduplicated challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChallengeId(pub i64);

/// A fully assembled match, ready to be stored atomically
#[derive(Debug, Clone, PartialEq)]
pub struct MatchGraph {
    pub game: Match,
    pub participants: Vec<Participant>,
    pub teams: Vec<Team>,
    pub frames: Vec<Frame>,
}

impl MatchGraph {
    pub fn team(&self, r: TeamRef) -> Option<&Team> {
        self.teams.get(r.0)
    }

    /// Total number of events across all frames
    pub fn event_count(&self) -> usize {
        self.frames.iter().map(|f| f.events.len()).sum()
    }
}

/// Match-level metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Global identifier, `{PLATFORM}_{index}`
    pub match_id: String,
    pub data_version: Option<String>,
    pub end_of_game_result: Option<String>,
    pub game_creation: Option<DateTime<Utc>>,
    pub game_duration: Option<i64>,
    pub game_end_timestamp: Option<DateTime<Utc>>,
    pub game_id: Option<i64>,
    pub game_mode: Option<GameMode>,
    pub game_name: Option<String>,
    pub game_start_timestamp: Option<DateTime<Utc>>,
    pub game_type: Option<GameType>,
    pub game_version: Option<String>,
    pub map_id: Option<i64>,
    pub platform_id: Option<String>,
    pub queue_id: Option<i64>,
    pub tournament_code: Option<String>,
    /// Timeline sampling interval in milliseconds
    pub frame_interval: Option<i64>,
    pub inserted_at: DateTime<Utc>,
}

/// One player of a match
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Upstream participant id, 1..=10
    pub participant_id: u32,
    /// Upstream team-affinity id (100 / 200)
    pub team_id: Option<i64>,
    pub team: Option<TeamRef>,
    pub individual_position: Option<Lane>,
    pub lane: Option<Lane>,
    pub team_position: Option<Lane>,
    pub role: Option<Role>,
    pub stats: ParticipantStats,
    pub defense_stat: Option<i64>,
    pub flex_stat: Option<i64>,
    pub offense_stat: Option<i64>,
    pub perks: Vec<Perk>,
    pub missions: Option<Missions>,
    pub challenges: Vec<ChallengeLink>,
}

/// A rune selection, tagged with the style it was picked from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perk {
    pub style: Option<i64>,
    pub description: Option<String>,
    pub perk: Option<i64>,
    pub var1: Option<i64>,
    pub var2: Option<i64>,
    pub var3: Option<i64>,
}

/// A participant's value for one challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeLink {
    pub challenge: ChallengeId,
    /// Upstream value rendered as JSON text
    pub value: String,
}

/// One side of a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub team_id: i64,
    pub win: Option<bool>,
    pub objectives: Objectives,
    pub bans: Vec<Ban>,
    /// Participants whose team-affinity id matches this team
    pub members: Vec<ParticipantRef>,
}

/// Flattened objective summary of a team
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Objectives {
    pub baron_first: Option<bool>,
    pub baron_kills: Option<i64>,
    pub champion_first: Option<bool>,
    pub champion_kills: Option<i64>,
    pub dragon_first: Option<bool>,
    pub dragon_kills: Option<i64>,
    pub horde_first: Option<bool>,
    pub horde_kills: Option<i64>,
    pub inhibitor_first: Option<bool>,
    pub inhibitor_kills: Option<i64>,
    pub rift_herald_first: Option<bool>,
    pub rift_herald_kills: Option<i64>,
    pub tower_first: Option<bool>,
    pub tower_kills: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ban {
    pub champion_id: Option<i64>,
    pub pick_turn: Option<i64>,
}

/// One periodic timeline snapshot; events keep their retrieved order
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestamp: i64,
    pub events: Vec<Event>,
    pub participant_frames: Vec<ParticipantFrame>,
}

/// A participant's state at one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantFrame {
    pub participant: ParticipantRef,
    pub current_gold: Option<i64>,
    pub gold_per_second: Option<i64>,
    pub jungle_minions_killed: Option<i64>,
    pub level: Option<i64>,
    pub minions_killed: Option<i64>,
    pub time_enemy_spent_controlled: Option<i64>,
    pub total_gold: Option<i64>,
    pub xp: Option<i64>,
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub champion_stats: ChampionStats,
    pub damage_stats: DamageStats,
}

/// One timeline occurrence with all references resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Upstream type tag, e.g. `CHAMPION_KILL`
    pub event_type: String,
    pub timestamp: i64,
    pub real_timestamp: Option<DateTime<Utc>>,
    pub fields: EventFields,
    pub participant: Option<ParticipantRef>,
    pub creator: Option<ParticipantRef>,
    pub killer: Option<ParticipantRef>,
    pub victim: Option<ParticipantRef>,
    pub team: Option<TeamRef>,
    pub killer_team: Option<TeamRef>,
    pub winning_team: Option<TeamRef>,
    /// Distinct assisting participants, first-seen order
    pub assisting: Vec<ParticipantRef>,
    pub damage_dealt: Vec<VictimDamage>,
    pub damage_received: Vec<VictimDamage>,
}

/// Type-dependent scalar fields of an event, as stored
///
/// Only the fields meaningful for the event's type are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub item_id: Option<i64>,
    pub level_up_type: Option<String>,
    pub skill_slot: Option<i64>,
    pub level: Option<i64>,
    pub ward_type: Option<String>,
    pub kill_streak_length: Option<i64>,
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub bounty: Option<i64>,
    pub shutdown_bounty: Option<i64>,
    pub building_type: Option<String>,
    pub tower_type: Option<String>,
    pub lane_type: Option<String>,
    pub kill_type: Option<String>,
    pub multi_kill_length: Option<i64>,
    pub monster_type: Option<String>,
    pub monster_sub_type: Option<String>,
    pub after_id: Option<i64>,
    pub before_id: Option<i64>,
    pub gold_gain: Option<i64>,
    pub actual_start_time: Option<i64>,
    pub name: Option<String>,
    pub transform_type: Option<String>,
    pub game_id: Option<i64>,
}

/// One itemized damage source on a champion kill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictimDamage {
    /// None when the source was not a participant (upstream id 0)
    pub participant: Option<ParticipantRef>,
    pub basic: Option<bool>,
    pub magic_damage: Option<i64>,
    pub name: Option<String>,
    pub physical_damage: Option<i64>,
    pub spell_name: Option<String>,
    pub spell_slot: Option<i64>,
    pub true_damage: Option<i64>,
    pub damage_type: Option<String>,
}
