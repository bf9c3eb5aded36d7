//! Scalar statistic bundles
//!
//! These are plain value bags that arrive from upstream already in the shape
//! they are stored in, so they deserialize straight into the model.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Per-player end-of-game statistics
///
/// The named fields get their own columns; everything else the upstream
/// reports is kept verbatim in `extra` and stored as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStats {
    pub puuid: Option<String>,
    pub summoner_name: Option<String>,
    pub riot_id_game_name: Option<String>,
    pub riot_id_tagline: Option<String>,
    pub summoner_level: Option<i64>,
    pub champion_id: Option<i64>,
    pub champion_name: Option<String>,
    pub champ_level: Option<i64>,
    pub champ_experience: Option<i64>,
    pub kills: Option<i64>,
    pub deaths: Option<i64>,
    pub assists: Option<i64>,
    pub largest_multi_kill: Option<i64>,
    pub gold_earned: Option<i64>,
    pub gold_spent: Option<i64>,
    pub total_damage_dealt: Option<i64>,
    pub total_damage_dealt_to_champions: Option<i64>,
    pub total_damage_taken: Option<i64>,
    pub damage_self_mitigated: Option<i64>,
    pub damage_dealt_to_objectives: Option<i64>,
    pub total_heal: Option<i64>,
    pub total_minions_killed: Option<i64>,
    pub neutral_minions_killed: Option<i64>,
    pub vision_score: Option<i64>,
    pub wards_placed: Option<i64>,
    pub wards_killed: Option<i64>,
    pub item0: Option<i64>,
    pub item1: Option<i64>,
    pub item2: Option<i64>,
    pub item3: Option<i64>,
    pub item4: Option<i64>,
    pub item5: Option<i64>,
    pub item6: Option<i64>,
    pub summoner1_id: Option<i64>,
    pub summoner2_id: Option<i64>,
    pub first_blood_kill: Option<bool>,
    pub first_tower_kill: Option<bool>,
    pub time_played: Option<i64>,
    pub game_ended_in_surrender: Option<bool>,
    pub win: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Progression score counters attached to a participant
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Missions {
    pub player_score0: Option<f64>,
    pub player_score1: Option<f64>,
    pub player_score2: Option<f64>,
    pub player_score3: Option<f64>,
    pub player_score4: Option<f64>,
    pub player_score5: Option<f64>,
    pub player_score6: Option<f64>,
    pub player_score7: Option<f64>,
    pub player_score8: Option<f64>,
    pub player_score9: Option<f64>,
    pub player_score10: Option<f64>,
    pub player_score11: Option<f64>,
}

impl Missions {
    /// Scores in slot order, `playerScore0` first
    pub fn scores(&self) -> [Option<f64>; 12] {
        [
            self.player_score0,
            self.player_score1,
            self.player_score2,
            self.player_score3,
            self.player_score4,
            self.player_score5,
            self.player_score6,
            self.player_score7,
            self.player_score8,
            self.player_score9,
            self.player_score10,
            self.player_score11,
        ]
    }
}

/// Champion attribute snapshot inside a participant frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampionStats {
    pub ability_haste: Option<i64>,
    pub ability_power: Option<i64>,
    pub armor: Option<i64>,
    pub armor_pen: Option<i64>,
    pub armor_pen_percent: Option<i64>,
    pub attack_damage: Option<i64>,
    pub attack_speed: Option<i64>,
    pub bonus_armor_pen_percent: Option<i64>,
    pub bonus_magic_pen_percent: Option<i64>,
    pub cc_reduction: Option<i64>,
    pub cooldown_reduction: Option<i64>,
    pub health: Option<i64>,
    pub health_max: Option<i64>,
    pub health_regen: Option<i64>,
    pub lifesteal: Option<i64>,
    pub magic_pen: Option<i64>,
    pub magic_pen_percent: Option<i64>,
    pub magic_resist: Option<i64>,
    pub movement_speed: Option<i64>,
    pub omnivamp: Option<i64>,
    pub physical_vamp: Option<i64>,
    pub power: Option<i64>,
    pub power_max: Option<i64>,
    pub power_regen: Option<i64>,
    pub spell_vamp: Option<i64>,
}

/// Cumulative damage counters inside a participant frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageStats {
    pub magic_damage_done: Option<i64>,
    pub magic_damage_done_to_champions: Option<i64>,
    pub magic_damage_taken: Option<i64>,
    pub physical_damage_done: Option<i64>,
    pub physical_damage_done_to_champions: Option<i64>,
    pub physical_damage_taken: Option<i64>,
    pub total_damage_done: Option<i64>,
    pub total_damage_done_to_champions: Option<i64>,
    pub total_damage_taken: Option<i64>,
    pub true_damage_done: Option<i64>,
    pub true_damage_done_to_champions: Option<i64>,
    pub true_damage_taken: Option<i64>,
}
