use crate::model::{Missions, ParticipantStats};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Match summary as returned by the match endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub data_version: Option<String>,
    pub match_id: String,
    /// Participant PUUIDs
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    pub end_of_game_result: Option<String>,
    /// Unix millis
    pub game_creation: Option<i64>,
    pub game_duration: Option<i64>,
    /// Unix millis
    pub game_end_timestamp: Option<i64>,
    pub game_id: Option<i64>,
    pub game_mode: Option<String>,
    pub game_name: Option<String>,
    /// Unix millis
    pub game_start_timestamp: Option<i64>,
    pub game_type: Option<String>,
    pub game_version: Option<String>,
    pub map_id: Option<i64>,
    pub participants: Vec<ParticipantDto>,
    pub platform_id: Option<String>,
    pub queue_id: Option<i64>,
    pub teams: Vec<TeamDto>,
    pub tournament_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub participant_id: u32,
    pub team_id: Option<i64>,
    pub individual_position: Option<String>,
    pub lane: Option<String>,
    pub team_position: Option<String>,
    pub role: Option<String>,
    pub perks: PerksDto,
    pub missions: Option<Missions>,
    /// Challenge name to value; values are mostly numbers, a few are arrays
    pub challenges: Option<BTreeMap<String, Value>>,

    #[serde(flatten)]
    pub stats: ParticipantStats,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerksDto {
    pub stat_perks: PerkStatsDto,
    pub styles: Vec<PerkStyleDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerkStatsDto {
    pub defense: Option<i64>,
    pub flex: Option<i64>,
    pub offense: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerkStyleDto {
    pub description: Option<String>,
    #[serde(default)]
    pub selections: Vec<PerkStyleSelectionDto>,
    pub style: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerkStyleSelectionDto {
    pub perk: Option<i64>,
    pub var1: Option<i64>,
    pub var2: Option<i64>,
    pub var3: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    #[serde(default)]
    pub bans: Vec<BanDto>,
    pub objectives: ObjectivesDto,
    pub team_id: i64,
    pub win: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanDto {
    pub champion_id: Option<i64>,
    pub pick_turn: Option<i64>,
}

/// Objective summary; `horde` only exists in some game versions and modes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectivesDto {
    pub baron: ObjectiveDto,
    pub champion: ObjectiveDto,
    pub dragon: ObjectiveDto,
    pub horde: Option<ObjectiveDto>,
    pub inhibitor: ObjectiveDto,
    pub rift_herald: ObjectiveDto,
    pub tower: ObjectiveDto,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObjectiveDto {
    pub first: Option<bool>,
    pub kills: Option<i64>,
}
