//! Integration tests for record transformation and storage of the graph

mod common;

use common::{summary, summary_json, timeline, timeline_json};
use match_harvester::model::{GameMode, Lane, ParticipantRef, TeamRef};
use match_harvester::storage::{Gateway, SqliteStorage, Table};
use match_harvester::upstream::{MatchDto, TimelineDto};
use match_harvester::{transform, TransformError};
use serde_json::{json, Value};

fn decode_summary(value: Value) -> MatchDto {
    serde_json::from_value(value).unwrap()
}

fn decode_timeline(value: Value) -> TimelineDto {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_champion_kill_references() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = transform(&summary("RU_100"), &timeline("RU_100"), &mut storage).unwrap();

    let kill = &graph.frames[1].events[1];
    assert_eq!(kill.event_type, "CHAMPION_KILL");
    assert_eq!(kill.killer, Some(ParticipantRef(2)));
    assert_eq!(kill.victim, Some(ParticipantRef(6)));
    assert_eq!(kill.assisting, vec![ParticipantRef(1), ParticipantRef(3)]);
    assert_eq!(kill.fields.bounty, Some(300));
    assert_eq!(kill.fields.x, Some(7000));

    // A minion is not a participant
    assert_eq!(kill.damage_received.len(), 2);
    assert_eq!(kill.damage_received[0].participant, None);
    assert_eq!(kill.damage_received[1].participant, Some(ParticipantRef(2)));
    assert_eq!(kill.damage_received[1].magic_damage, Some(250));
}

#[test]
fn test_team_references_resolve() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = transform(&summary("RU_100"), &timeline("RU_100"), &mut storage).unwrap();

    let monster = &graph.frames[1].events[2];
    assert_eq!(monster.killer_team, Some(TeamRef(0)));
    assert_eq!(monster.fields.monster_sub_type.as_deref(), Some("FIRE_DRAGON"));

    let building = &graph.frames[2].events[0];
    assert_eq!(building.team, Some(TeamRef(0)));
    assert_eq!(building.killer, Some(ParticipantRef(5)));

    let end = &graph.frames[2].events[2];
    assert_eq!(end.winning_team, Some(TeamRef(1)));
    assert!(end.real_timestamp.is_some());

    let team = graph.team(TeamRef(1)).unwrap();
    assert_eq!(team.team_id, 200);
    assert_eq!(team.members.len(), 5);
    assert!(team.members.contains(&ParticipantRef(9)));
}

#[test]
fn test_frames_and_events_keep_order() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = transform(&summary("RU_100"), &timeline("RU_100"), &mut storage).unwrap();

    let timestamps: Vec<i64> = graph.frames.iter().map(|f| f.timestamp).collect();
    assert_eq!(timestamps, vec![0, 60000, 1800000]);

    let types: Vec<&str> = graph.frames[0]
        .events
        .iter()
        .map(|e| e.event_type.as_str())
        .collect();
    assert_eq!(types, vec!["PAUSE_END", "ITEM_PURCHASED", "WARD_PLACED"]);

    storage.store(&graph).unwrap();

    let conn = storage.connection();
    let mut stmt = conn
        .prepare(
            "SELECT e.event_type FROM events e
             JOIN frames f ON e.frame_row_id = f.id
             ORDER BY f.frame_index, e.event_index",
        )
        .unwrap();
    let stored: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        stored,
        vec![
            "PAUSE_END",
            "ITEM_PURCHASED",
            "WARD_PLACED",
            "SKILL_LEVEL_UP",
            "CHAMPION_KILL",
            "ELITE_MONSTER_KILL",
            "BUILDING_KILL",
            "FEAT_UPDATE",
            "GAME_END",
        ]
    );
}

#[test]
fn test_unknown_event_is_kept() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = transform(&summary("RU_100"), &timeline("RU_100"), &mut storage).unwrap();

    let feat = &graph.frames[2].events[1];
    assert_eq!(feat.event_type, "FEAT_UPDATE");
    assert_eq!(feat.timestamp, 1795000);
    assert_eq!(feat.participant, None);
    assert_eq!(feat.team, Some(TeamRef(1)));
}

#[test]
fn test_unknown_event_team_is_stored() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = transform(&summary("RU_100"), &timeline("RU_100"), &mut storage).unwrap();
    storage.store(&graph).unwrap();

    let (team_id, match_id): (i64, String) = storage
        .connection()
        .query_row(
            "SELECT t.team_id, m.match_id FROM events e
             JOIN teams t ON t.id = e.team_row_id
             JOIN matches m ON m.id = e.match_row_id
             WHERE e.event_type = 'FEAT_UPDATE'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();

    assert_eq!(team_id, 200);
    assert_eq!(match_id, "RU_100");
}

#[test]
fn test_participant_details() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = transform(&summary("RU_100"), &timeline("RU_100"), &mut storage).unwrap();

    assert_eq!(graph.participants.len(), 10);
    assert_eq!(graph.game.game_mode, Some(GameMode::Classic));
    assert_eq!(graph.game.frame_interval, Some(60000));

    let first = &graph.participants[0];
    assert_eq!(first.team, Some(TeamRef(0)));
    assert_eq!(first.individual_position, Some(Lane::TopLane));
    assert_eq!(first.offense_stat, Some(5005));
    assert_eq!(first.perks.len(), 6);
    assert_eq!(first.perks[0].style, Some(8100));
    assert_eq!(first.perks[5].style, Some(8300));
    assert_eq!(first.perks[5].description.as_deref(), Some("subStyle"));

    let missions = first.missions.as_ref().unwrap();
    assert_eq!(missions.player_score0, Some(1.0));
    assert_eq!(missions.player_score1, None);
    assert_eq!(missions.player_score11, Some(11.5));
    assert_eq!(first.challenges.len(), 1);
    assert_eq!(first.challenges[0].value, "2");

    assert!(graph.participants[1].missions.is_none());
    assert!(graph.participants[1].challenges.is_empty());
    assert_eq!(graph.participants[9].team, Some(TeamRef(1)));
}

#[test]
fn test_horde_is_optional() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = transform(&summary("RU_100"), &timeline("RU_100"), &mut storage).unwrap();

    assert_eq!(graph.teams[0].objectives.horde_kills, Some(4));
    assert_eq!(graph.teams[0].objectives.horde_first, Some(true));
    assert_eq!(graph.teams[1].objectives.horde_kills, None);
    assert_eq!(graph.teams[1].objectives.tower_kills, Some(9));
    assert_eq!(graph.teams[0].bans.len(), 2);
    assert_eq!(graph.teams[1].bans.len(), 1);
}

#[test]
fn test_extra_stats_are_stored_as_json() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let graph = transform(&summary("RU_100"), &timeline("RU_100"), &mut storage).unwrap();
    storage.store(&graph).unwrap();

    let extra: String = storage
        .connection()
        .query_row(
            "SELECT extra_stats FROM participants WHERE participant_id = 2",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let extra: Value = serde_json::from_str(&extra).unwrap();

    assert_eq!(extra["allInPings"], json!(0));
    assert_eq!(extra["spell1Casts"], json!(42));
    assert!(extra.get("kills").is_none());
}

#[test]
fn test_challenges_are_shared_across_matches() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();

    for match_id in ["RU_100", "RU_101"] {
        let graph = transform(&summary(match_id), &timeline(match_id), &mut storage).unwrap();
        storage.store(&graph).unwrap();
    }

    assert_eq!(storage.count_rows(Table::Matches).unwrap(), 2);
    assert_eq!(storage.count_rows(Table::Challenges).unwrap(), 1);
    assert_eq!(storage.count_rows(Table::ChallengeLinks).unwrap(), 2);
    assert_eq!(storage.latest_match_id().unwrap().as_deref(), Some("RU_101"));
}

#[test]
fn test_match_id_mismatch() {
    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let result = transform(&summary("RU_100"), &timeline("RU_101"), &mut storage);

    assert!(matches!(
        result,
        Err(TransformError::MatchIdMismatch { ref expected, ref found })
            if expected == "RU_100" && found == "RU_101"
    ));
}

#[test]
fn test_duplicate_participant() {
    let mut raw = summary_json("RU_100");
    raw["info"]["participants"][1]["participantId"] = json!(1);

    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let result = transform(&decode_summary(raw), &timeline("RU_100"), &mut storage);

    assert!(matches!(result, Err(TransformError::DuplicateParticipant(1))));
}

#[test]
fn test_participant_out_of_range() {
    let mut raw = summary_json("RU_100");
    raw["info"]["participants"][9]["participantId"] = json!(11);

    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let result = transform(&decode_summary(raw), &timeline("RU_100"), &mut storage);

    assert!(matches!(result, Err(TransformError::ParticipantOutOfRange(11))));
}

#[test]
fn test_wrong_team_count() {
    let mut raw = summary_json("RU_100");
    raw["info"]["teams"].as_array_mut().unwrap().pop();

    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let result = transform(&decode_summary(raw), &timeline("RU_100"), &mut storage);

    assert!(matches!(result, Err(TransformError::TeamCount(1))));
}

#[test]
fn test_frame_for_unknown_participant() {
    let mut raw = timeline_json("RU_100");
    let frames = raw["info"]["frames"][0]["participantFrames"]
        .as_object_mut()
        .unwrap();
    let mut stray = frames["1"].clone();
    stray["participantId"] = json!(11);
    frames.insert("11".to_string(), stray);

    let mut storage = SqliteStorage::new_in_memory().unwrap();
    let result = transform(&summary("RU_100"), &decode_timeline(raw), &mut storage);

    assert!(matches!(
        result,
        Err(TransformError::UnknownFrameParticipant(11))
    ));
}

#[test]
fn test_failed_transform_stores_nothing() {
    let mut raw = summary_json("RU_100");
    raw["info"]["participants"][4]["participantId"] = json!(3);

    let mut storage = SqliteStorage::new_in_memory().unwrap();
    assert!(transform(&decode_summary(raw), &timeline("RU_100"), &mut storage).is_err());

    assert!(!storage.exists("RU_100").unwrap());
    assert_eq!(storage.count_rows(Table::Participants).unwrap(), 0);
    assert_eq!(storage.count_rows(Table::Events).unwrap(), 0);
}
