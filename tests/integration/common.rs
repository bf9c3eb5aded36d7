//! Shared fixtures for the integration tests
//!
//! Builds upstream-shaped summary and timeline documents with `json!` so
//! tests can tweak individual fields before decoding them.

#![allow(dead_code)]

use match_harvester::config::{
    Config, CrawlerConfig, NotFoundConfig, ProviderConfig, RetryConfig, StorageConfig,
};
use match_harvester::upstream::{MatchDto, TimelineDto};
use match_harvester::Platform;
use serde_json::{json, Value};

/// Creates a test configuration pointed at `base_url`
pub fn create_test_config(base_url: Option<&str>, db_path: &str, start_index: u64) -> Config {
    Config {
        provider: ProviderConfig {
            platform: Platform::Ru,
            api_key: Some("test-key".to_string()),
            api_key_file: None,
            base_url: base_url.map(str::to_string),
            request_timeout_secs: 5,
        },
        crawler: CrawlerConfig {
            start_index,
            max_consecutive_errors: 10,
        },
        retry: RetryConfig {
            max_attempts: 3,
            retry_rate_limited: true,
            respect_retry_after: true,
        },
        not_found: NotFoundConfig::default(),
        storage: StorageConfig {
            database_path: db_path.to_string(),
        },
    }
}

fn objective(first: bool, kills: i64) -> Value {
    json!({"first": first, "kills": kills})
}

fn participant(id: u32) -> Value {
    let team_id = if id <= 5 { 100 } else { 200 };
    let position = ["TOP", "JUNGLE", "MIDDLE", "BOTTOM", "UTILITY"][(id as usize - 1) % 5];

    let mut p = json!({
        "participantId": id,
        "teamId": team_id,
        "puuid": format!("puuid-{}", id),
        "riotIdGameName": format!("player{}", id),
        "riotIdTagline": "RU1",
        "championId": 100 + id,
        "championName": format!("Champion{}", id),
        "individualPosition": position,
        "lane": position,
        "teamPosition": position,
        "role": "SOLO",
        "kills": id,
        "deaths": 10 - id,
        "assists": 3,
        "goldEarned": 10000 + id * 100,
        "win": team_id == 200,
        "allInPings": 0,
        "spell1Casts": 40 + id,
        "perks": {
            "statPerks": {"defense": 5001, "flex": 5008, "offense": 5005},
            "styles": [
                {
                    "description": "primaryStyle",
                    "selections": [
                        {"perk": 8112, "var1": 1, "var2": 0, "var3": 0},
                        {"perk": 8139, "var1": 2, "var2": 0, "var3": 0},
                        {"perk": 8138, "var1": 3, "var2": 0, "var3": 0},
                        {"perk": 8135, "var1": 4, "var2": 0, "var3": 0}
                    ],
                    "style": 8100
                },
                {
                    "description": "subStyle",
                    "selections": [
                        {"perk": 8345, "var1": 5, "var2": 0, "var3": 0},
                        {"perk": 8347, "var1": 6, "var2": 0, "var3": 0}
                    ],
                    "style": 8300
                }
            ]
        }
    });

    if id == 1 {
        p["missions"] = json!({"playerScore0": 1.0, "playerScore11": 11.5});
        p["challenges"] = json!({"soloKills": 2});
    }

    p
}

/// A ten-player summary; participant 1 carries missions and one challenge
pub fn summary_json(match_id: &str) -> Value {
    json!({
        "metadata": {
            "dataVersion": "2",
            "matchId": match_id,
            "participants": (1..=10).map(|i| format!("puuid-{}", i)).collect::<Vec<_>>()
        },
        "info": {
            "endOfGameResult": "GameComplete",
            "gameCreation": 1717000000000i64,
            "gameDuration": 1800,
            "gameEndTimestamp": 1717001900000i64,
            "gameId": 506604852,
            "gameMode": "CLASSIC",
            "gameName": "teambuilder-match-506604852",
            "gameStartTimestamp": 1717000100000i64,
            "gameType": "MATCHED_GAME",
            "gameVersion": "14.11.589.9418",
            "mapId": 11,
            "platformId": "RU",
            "queueId": 420,
            "tournamentCode": "",
            "participants": (1..=10).map(participant).collect::<Vec<_>>(),
            "teams": [
                {
                    "bans": [
                        {"championId": 55, "pickTurn": 1},
                        {"championId": 238, "pickTurn": 2}
                    ],
                    "objectives": {
                        "baron": objective(false, 0),
                        "champion": objective(true, 20),
                        "dragon": objective(true, 2),
                        "horde": objective(true, 4),
                        "inhibitor": objective(false, 0),
                        "riftHerald": objective(false, 0),
                        "tower": objective(false, 3)
                    },
                    "teamId": 100,
                    "win": false
                },
                {
                    "bans": [
                        {"championId": 157, "pickTurn": 6}
                    ],
                    "objectives": {
                        "baron": objective(true, 1),
                        "champion": objective(false, 25),
                        "dragon": objective(false, 3),
                        "inhibitor": objective(true, 2),
                        "riftHerald": objective(true, 1),
                        "tower": objective(true, 9)
                    },
                    "teamId": 200,
                    "win": true
                }
            ]
        }
    })
}

fn participant_frame(id: u32, gold: i64) -> Value {
    json!({
        "championStats": {"armor": 30, "health": 600, "healthMax": 600, "movementSpeed": 345},
        "currentGold": gold,
        "damageStats": {"totalDamageDone": 0, "totalDamageTaken": 0},
        "goldPerSecond": 0,
        "jungleMinionsKilled": 0,
        "level": 1,
        "minionsKilled": 0,
        "participantId": id,
        "position": {"x": 500 + id as i64, "y": 400},
        "timeEnemySpentControlled": 0,
        "totalGold": gold,
        "xp": 0
    })
}

fn participant_frames(gold: i64) -> Value {
    let mut frames = serde_json::Map::new();
    for id in 1..=10u32 {
        frames.insert(id.to_string(), participant_frame(id, gold));
    }
    Value::Object(frames)
}

/// Three frames with a representative mix of events
///
/// Frame 1 holds a champion kill by participant 3 on participant 7 with
/// assists `[2, 2, 4]` and one damage source from a minion (id 0) and one
/// from participant 3.
pub fn timeline_json(match_id: &str) -> Value {
    json!({
        "metadata": {
            "dataVersion": "2",
            "matchId": match_id,
            "participants": (1..=10).map(|i| format!("puuid-{}", i)).collect::<Vec<_>>()
        },
        "info": {
            "endOfGameResult": "GameComplete",
            "frameInterval": 60000,
            "gameId": 506604852,
            "participants": (1..=10)
                .map(|i| json!({"participantId": i, "puuid": format!("puuid-{}", i)}))
                .collect::<Vec<_>>(),
            "frames": [
                {
                    "events": [
                        {"type": "PAUSE_END", "timestamp": 0, "realTimestamp": 1717000100000i64},
                        {"type": "ITEM_PURCHASED", "timestamp": 1500, "itemId": 1055, "participantId": 1},
                        {"type": "WARD_PLACED", "timestamp": 2500, "creatorId": 5, "wardType": "YELLOW_TRINKET"}
                    ],
                    "participantFrames": participant_frames(500),
                    "timestamp": 0
                },
                {
                    "events": [
                        {"type": "SKILL_LEVEL_UP", "timestamp": 61000, "levelUpType": "NORMAL", "participantId": 3, "skillSlot": 1},
                        {
                            "type": "CHAMPION_KILL",
                            "timestamp": 90000,
                            "assistingParticipantIds": [2, 2, 4],
                            "bounty": 300,
                            "killStreakLength": 0,
                            "killerId": 3,
                            "position": {"x": 7000, "y": 7100},
                            "shutdownBounty": 0,
                            "victimDamageReceived": [
                                {
                                    "basic": true,
                                    "magicDamage": 0,
                                    "name": "SRU_ChaosMinionMelee",
                                    "participantId": 0,
                                    "physicalDamage": 12,
                                    "spellName": "sru_chaosminionmeleebasicattack",
                                    "spellSlot": 64,
                                    "trueDamage": 0,
                                    "type": "MINION"
                                },
                                {
                                    "basic": false,
                                    "magicDamage": 250,
                                    "name": "Champion3",
                                    "participantId": 3,
                                    "physicalDamage": 0,
                                    "spellName": "spell3q",
                                    "spellSlot": 0,
                                    "trueDamage": 0,
                                    "type": "OTHER"
                                }
                            ],
                            "victimId": 7
                        },
                        {
                            "type": "ELITE_MONSTER_KILL",
                            "timestamp": 95000,
                            "bounty": 0,
                            "killerId": 2,
                            "killerTeamId": 100,
                            "monsterSubType": "FIRE_DRAGON",
                            "monsterType": "DRAGON",
                            "position": {"x": 9866, "y": 4414}
                        }
                    ],
                    "participantFrames": participant_frames(1500),
                    "timestamp": 60000
                },
                {
                    "events": [
                        {
                            "type": "BUILDING_KILL",
                            "timestamp": 1790000,
                            "assistingParticipantIds": [7, 8],
                            "bounty": 0,
                            "buildingType": "INHIBITOR_BUILDING",
                            "killerId": 6,
                            "laneType": "MID_LANE",
                            "position": {"x": 3203, "y": 3208},
                            "teamId": 100
                        },
                        {"type": "FEAT_UPDATE", "timestamp": 1795000, "featType": 2, "featValue": 1, "teamId": 200},
                        {
                            "type": "GAME_END",
                            "timestamp": 1800000,
                            "realTimestamp": 1717001900000i64,
                            "gameId": 506604852,
                            "winningTeam": 200
                        }
                    ],
                    "participantFrames": participant_frames(9000),
                    "timestamp": 1800000
                }
            ]
        }
    })
}

pub fn summary(match_id: &str) -> MatchDto {
    serde_json::from_value(summary_json(match_id)).unwrap()
}

pub fn timeline(match_id: &str) -> TimelineDto {
    serde_json::from_value(timeline_json(match_id)).unwrap()
}
