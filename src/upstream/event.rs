//! Timeline events
//!
//! Upstream events are sparse records keyed by a `type` tag. Each known type
//! is a variant of `EventDetail` carrying exactly the fields that type can
//! have. Types this crate does not know yet land in `Unrecognized`; their
//! participant, team and position fields are still read into
//! `UntypedEventDto` so references survive.

use crate::upstream::timeline::PositionDto;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One timeline event
#[derive(Debug, Clone, PartialEq)]
pub struct EventDto {
    /// Raw type tag, kept even for unrecognized types
    pub event_type: String,
    pub timestamp: i64,
    /// Unix millis, only reported by a few types
    pub real_timestamp: Option<i64>,
    pub detail: EventDetail,
    /// Common fields, only read when `detail` is `Unrecognized`
    pub untyped: Option<UntypedEventDto>,
}

/// Loosely typed fields shared by most event types
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntypedEventDto {
    pub participant_id: Option<u32>,
    pub creator_id: Option<u32>,
    pub killer_id: Option<u32>,
    pub victim_id: Option<u32>,
    pub team_id: Option<i64>,
    pub killer_team_id: Option<i64>,
    pub position: Option<PositionDto>,
    #[serde(default)]
    pub assisting_participant_ids: Vec<u32>,
}

/// Type-specific payload of an event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum EventDetail {
    PauseEnd {},
    LevelUp {
        level: Option<i64>,
        participant_id: u32,
    },
    SkillLevelUp {
        level_up_type: Option<String>,
        participant_id: u32,
        skill_slot: Option<i64>,
    },
    ItemPurchased {
        item_id: Option<i64>,
        participant_id: u32,
    },
    ItemSold {
        item_id: Option<i64>,
        participant_id: u32,
    },
    ItemDestroyed {
        item_id: Option<i64>,
        participant_id: u32,
    },
    ItemUndo {
        after_id: Option<i64>,
        before_id: Option<i64>,
        gold_gain: Option<i64>,
        participant_id: u32,
    },
    WardPlaced {
        creator_id: u32,
        ward_type: Option<String>,
    },
    WardKill {
        killer_id: u32,
        ward_type: Option<String>,
    },
    ChampionKill {
        #[serde(default)]
        assisting_participant_ids: Vec<u32>,
        bounty: Option<i64>,
        kill_streak_length: Option<i64>,
        killer_id: u32,
        position: Option<PositionDto>,
        shutdown_bounty: Option<i64>,
        #[serde(default)]
        victim_damage_dealt: Vec<VictimDamageDto>,
        #[serde(default)]
        victim_damage_received: Vec<VictimDamageDto>,
        victim_id: u32,
    },
    ChampionSpecialKill {
        kill_type: Option<String>,
        killer_id: u32,
        multi_kill_length: Option<i64>,
        position: Option<PositionDto>,
    },
    EliteMonsterKill {
        #[serde(default)]
        assisting_participant_ids: Vec<u32>,
        bounty: Option<i64>,
        killer_id: u32,
        killer_team_id: Option<i64>,
        monster_sub_type: Option<String>,
        monster_type: Option<String>,
        position: Option<PositionDto>,
    },
    BuildingKill {
        #[serde(default)]
        assisting_participant_ids: Vec<u32>,
        bounty: Option<i64>,
        building_type: Option<String>,
        killer_id: u32,
        lane_type: Option<String>,
        position: Option<PositionDto>,
        team_id: Option<i64>,
        tower_type: Option<String>,
    },
    TurretPlateDestroyed {
        killer_id: u32,
        lane_type: Option<String>,
        position: Option<PositionDto>,
        team_id: Option<i64>,
    },
    DragonSoulGiven {
        name: Option<String>,
        team_id: Option<i64>,
    },
    ObjectiveBountyPrestart {
        actual_start_time: Option<i64>,
        team_id: Option<i64>,
    },
    ObjectiveBountyFinish {
        team_id: Option<i64>,
    },
    ChampionTransform {
        participant_id: u32,
        transform_type: Option<String>,
    },
    GameEnd {
        game_id: Option<i64>,
        winning_team: Option<i64>,
    },
    #[serde(other)]
    Unrecognized,
}

/// One damage source on a champion kill
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictimDamageDto {
    pub basic: Option<bool>,
    pub magic_damage: Option<i64>,
    pub name: Option<String>,
    /// 0 when the source is not a participant (minion, turret, monster)
    pub participant_id: u32,
    pub physical_damage: Option<i64>,
    pub spell_name: Option<String>,
    pub spell_slot: Option<i64>,
    pub true_damage: Option<i64>,
    #[serde(rename = "type")]
    pub damage_type: Option<String>,
}

impl<'de> Deserialize<'de> for EventDto {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;

        let event_type = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("type"))?
            .to_string();
        let timestamp = raw
            .get("timestamp")
            .and_then(Value::as_i64)
            .ok_or_else(|| D::Error::missing_field("timestamp"))?;
        let real_timestamp = raw.get("realTimestamp").and_then(Value::as_i64);

        let raw = Value::Object(raw);
        let detail = EventDetail::deserialize(&raw)
            .map_err(|e| D::Error::custom(format!("{} event: {}", event_type, e)))?;

        let untyped = match detail {
            EventDetail::Unrecognized => Some(
                UntypedEventDto::deserialize(&raw)
                    .map_err(|e| D::Error::custom(format!("{} event: {}", event_type, e)))?,
            ),
            _ => None,
        };

        Ok(Self {
            event_type,
            timestamp,
            real_timestamp,
            detail,
            untyped,
        })
    }
}
