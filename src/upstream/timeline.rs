use crate::model::{ChampionStats, DamageStats};
use crate::upstream::event::EventDto;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Match timeline as returned by the timeline endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineDto {
    pub metadata: TimelineMetadataDto,
    pub info: TimelineInfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMetadataDto {
    pub data_version: Option<String>,
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineInfoDto {
    pub end_of_game_result: Option<String>,
    pub frame_interval: Option<i64>,
    pub game_id: Option<i64>,
    #[serde(default)]
    pub participants: Vec<TimelineParticipantDto>,
    pub frames: Vec<FrameDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineParticipantDto {
    pub participant_id: u32,
    pub puuid: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDto {
    #[serde(default)]
    pub events: Vec<EventDto>,
    /// Keyed by participant id ("1".."10")
    #[serde(default)]
    pub participant_frames: BTreeMap<u32, ParticipantFrameDto>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFrameDto {
    pub champion_stats: ChampionStats,
    pub current_gold: Option<i64>,
    pub damage_stats: DamageStats,
    pub gold_per_second: Option<i64>,
    pub jungle_minions_killed: Option<i64>,
    pub level: Option<i64>,
    pub minions_killed: Option<i64>,
    pub participant_id: u32,
    pub position: PositionDto,
    pub time_enemy_spent_controlled: Option<i64>,
    pub total_gold: Option<i64>,
    pub xp: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PositionDto {
    pub x: i64,
    pub y: i64,
}
