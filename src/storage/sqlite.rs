//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Gateway trait.

use crate::model::{
    ChallengeId, Event, Frame, MatchGraph, Participant, ParticipantRef, Team, TeamRef,
    VictimDamage,
};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Gateway, StorageError, StorageResult, Table};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
            PRAGMA mmap_size = 268435456;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing and dry runs)
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection for ad-hoc queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Row ids assigned to the graph's arena entries during one store
struct RowIds {
    participants: Vec<i64>,
    teams: Vec<i64>,
}

impl RowIds {
    fn participant(&self, r: Option<ParticipantRef>) -> StorageResult<Option<i64>> {
        match r {
            None => Ok(None),
            Some(r) => self.participants.get(r.0).copied().map(Some).ok_or_else(|| {
                StorageError::Database(format!("dangling participant reference {}", r.0))
            }),
        }
    }

    fn team(&self, r: Option<TeamRef>) -> StorageResult<Option<i64>> {
        match r {
            None => Ok(None),
            Some(r) => self
                .teams
                .get(r.0)
                .copied()
                .map(Some)
                .ok_or_else(|| StorageError::Database(format!("dangling team reference {}", r.0))),
        }
    }
}

fn rfc3339(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.to_rfc3339())
}

fn insert_team(tx: &Transaction<'_>, match_row_id: i64, team: &Team) -> StorageResult<i64> {
    let o = &team.objectives;
    tx.prepare_cached(
        "INSERT INTO teams (match_row_id, team_id, win, baron_first, baron_kills, champion_first,
         champion_kills, dragon_first, dragon_kills, horde_first, horde_kills, inhibitor_first,
         inhibitor_kills, rift_herald_first, rift_herald_kills, tower_first, tower_kills)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
    )?
    .execute(params![
        match_row_id,
        team.team_id,
        team.win,
        o.baron_first,
        o.baron_kills,
        o.champion_first,
        o.champion_kills,
        o.dragon_first,
        o.dragon_kills,
        o.horde_first,
        o.horde_kills,
        o.inhibitor_first,
        o.inhibitor_kills,
        o.rift_herald_first,
        o.rift_herald_kills,
        o.tower_first,
        o.tower_kills,
    ])?;
    let team_row_id = tx.last_insert_rowid();

    let mut stmt = tx.prepare_cached(
        "INSERT INTO bans (team_row_id, ban_index, champion_id, pick_turn) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (i, ban) in team.bans.iter().enumerate() {
        stmt.execute(params![team_row_id, i as i64, ban.champion_id, ban.pick_turn])?;
    }

    Ok(team_row_id)
}

fn insert_participant(
    tx: &Transaction<'_>,
    match_row_id: i64,
    team_row_id: Option<i64>,
    p: &Participant,
) -> StorageResult<i64> {
    let s = &p.stats;
    let extra_stats =
        serde_json::to_string(&s.extra).map_err(|e| StorageError::Serialization(e.to_string()))?;

    tx.prepare_cached(
        "INSERT INTO participants (match_row_id, team_row_id, participant_id, team_id,
         individual_position, lane, team_position, role, defense_stat, flex_stat, offense_stat,
         puuid, summoner_name, riot_id_game_name, riot_id_tagline, summoner_level, champion_id,
         champion_name, champ_level, champ_experience, kills, deaths, assists, largest_multi_kill,
         gold_earned, gold_spent, total_damage_dealt, total_damage_dealt_to_champions,
         total_damage_taken, damage_self_mitigated, damage_dealt_to_objectives, total_heal,
         total_minions_killed, neutral_minions_killed, vision_score, wards_placed, wards_killed,
         item0, item1, item2, item3, item4, item5, item6, summoner1_id, summoner2_id,
         first_blood_kill, first_tower_kill, time_played, game_ended_in_surrender, win, extra_stats)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18,
         ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32, ?33, ?34, ?35, ?36,
         ?37, ?38, ?39, ?40, ?41, ?42, ?43, ?44, ?45, ?46, ?47, ?48, ?49, ?50, ?51, ?52)",
    )?
    .execute(params![
        match_row_id,
        team_row_id,
        p.participant_id,
        p.team_id,
        p.individual_position.map(|l| l.to_db_string()),
        p.lane.map(|l| l.to_db_string()),
        p.team_position.map(|l| l.to_db_string()),
        p.role.map(|r| r.to_db_string()),
        p.defense_stat,
        p.flex_stat,
        p.offense_stat,
        s.puuid,
        s.summoner_name,
        s.riot_id_game_name,
        s.riot_id_tagline,
        s.summoner_level,
        s.champion_id,
        s.champion_name,
        s.champ_level,
        s.champ_experience,
        s.kills,
        s.deaths,
        s.assists,
        s.largest_multi_kill,
        s.gold_earned,
        s.gold_spent,
        s.total_damage_dealt,
        s.total_damage_dealt_to_champions,
        s.total_damage_taken,
        s.damage_self_mitigated,
        s.damage_dealt_to_objectives,
        s.total_heal,
        s.total_minions_killed,
        s.neutral_minions_killed,
        s.vision_score,
        s.wards_placed,
        s.wards_killed,
        s.item0,
        s.item1,
        s.item2,
        s.item3,
        s.item4,
        s.item5,
        s.item6,
        s.summoner1_id,
        s.summoner2_id,
        s.first_blood_kill,
        s.first_tower_kill,
        s.time_played,
        s.game_ended_in_surrender,
        s.win,
        extra_stats,
    ])?;
    let participant_row_id = tx.last_insert_rowid();

    let mut stmt = tx.prepare_cached(
        "INSERT INTO perks (participant_row_id, perk_index, style, description, perk, var1, var2, var3)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for (i, perk) in p.perks.iter().enumerate() {
        stmt.execute(params![
            participant_row_id,
            i as i64,
            perk.style,
            perk.description,
            perk.perk,
            perk.var1,
            perk.var2,
            perk.var3,
        ])?;
    }

    if let Some(missions) = &p.missions {
        let sc = missions.scores();
        tx.prepare_cached(
            "INSERT INTO missions (participant_row_id, player_score0, player_score1, player_score2,
             player_score3, player_score4, player_score5, player_score6, player_score7,
             player_score8, player_score9, player_score10, player_score11)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )?
        .execute(params![
            participant_row_id,
            sc[0],
            sc[1],
            sc[2],
            sc[3],
            sc[4],
            sc[5],
            sc[6],
            sc[7],
            sc[8],
            sc[9],
            sc[10],
            sc[11],
        ])?;
    }

    let mut stmt = tx.prepare_cached(
        "INSERT INTO challenge_participant_links (challenge_row_id, participant_row_id, value)
         VALUES (?1, ?2, ?3)",
    )?;
    for link in &p.challenges {
        stmt.execute(params![link.challenge.0, participant_row_id, link.value])?;
    }

    Ok(participant_row_id)
}

fn insert_frame(
    tx: &Transaction<'_>,
    match_row_id: i64,
    frame_index: usize,
    frame: &Frame,
    rows: &RowIds,
) -> StorageResult<()> {
    tx.prepare_cached(
        "INSERT INTO frames (match_row_id, frame_index, timestamp) VALUES (?1, ?2, ?3)",
    )?
    .execute(params![match_row_id, frame_index as i64, frame.timestamp])?;
    let frame_row_id = tx.last_insert_rowid();

    let mut stmt = tx.prepare_cached(
        "INSERT INTO participant_frames (frame_row_id, participant_row_id, current_gold,
         gold_per_second, jungle_minions_killed, level, minions_killed,
         time_enemy_spent_controlled, total_gold, xp, x, y, ability_haste, ability_power, armor,
         armor_pen, armor_pen_percent, attack_damage, attack_speed, bonus_armor_pen_percent,
         bonus_magic_pen_percent, cc_reduction, cooldown_reduction, health, health_max,
         health_regen, lifesteal, magic_pen, magic_pen_percent, magic_resist, movement_speed,
         omnivamp, physical_vamp, power, power_max, power_regen, spell_vamp, magic_damage_done,
         magic_damage_done_to_champions, magic_damage_taken, physical_damage_done,
         physical_damage_done_to_champions, physical_damage_taken, total_damage_done,
         total_damage_done_to_champions, total_damage_taken, true_damage_done,
         true_damage_done_to_champions, true_damage_taken)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18,
         ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32, ?33, ?34, ?35, ?36,
         ?37, ?38, ?39, ?40, ?41, ?42, ?43, ?44, ?45, ?46, ?47, ?48, ?49)",
    )?;
    for pf in &frame.participant_frames {
        let owner = rows.participant(Some(pf.participant))?;
        let c = &pf.champion_stats;
        let d = &pf.damage_stats;
        stmt.execute(params![
            frame_row_id,
            owner,
            pf.current_gold,
            pf.gold_per_second,
            pf.jungle_minions_killed,
            pf.level,
            pf.minions_killed,
            pf.time_enemy_spent_controlled,
            pf.total_gold,
            pf.xp,
            pf.x,
            pf.y,
            c.ability_haste,
            c.ability_power,
            c.armor,
            c.armor_pen,
            c.armor_pen_percent,
            c.attack_damage,
            c.attack_speed,
            c.bonus_armor_pen_percent,
            c.bonus_magic_pen_percent,
            c.cc_reduction,
            c.cooldown_reduction,
            c.health,
            c.health_max,
            c.health_regen,
            c.lifesteal,
            c.magic_pen,
            c.magic_pen_percent,
            c.magic_resist,
            c.movement_speed,
            c.omnivamp,
            c.physical_vamp,
            c.power,
            c.power_max,
            c.power_regen,
            c.spell_vamp,
            d.magic_damage_done,
            d.magic_damage_done_to_champions,
            d.magic_damage_taken,
            d.physical_damage_done,
            d.physical_damage_done_to_champions,
            d.physical_damage_taken,
            d.total_damage_done,
            d.total_damage_done_to_champions,
            d.total_damage_taken,
            d.true_damage_done,
            d.true_damage_done_to_champions,
            d.true_damage_taken,
        ])?;
    }

    for (i, event) in frame.events.iter().enumerate() {
        insert_event(tx, match_row_id, frame_row_id, i, event, rows)?;
    }

    Ok(())
}

fn insert_event(
    tx: &Transaction<'_>,
    match_row_id: i64,
    frame_row_id: i64,
    event_index: usize,
    event: &Event,
    rows: &RowIds,
) -> StorageResult<()> {
    let f = &event.fields;
    tx.prepare_cached(
        "INSERT INTO events (match_row_id, frame_row_id, event_index, event_type, timestamp,
         real_timestamp, participant_row_id, creator_row_id, killer_row_id, victim_row_id,
         team_row_id, killer_team_row_id, winning_team_row_id, item_id, level_up_type,
         skill_slot, level, ward_type, kill_streak_length, x, y, bounty, shutdown_bounty,
         building_type, tower_type, lane_type, kill_type, multi_kill_length, monster_type,
         monster_sub_type, after_id, before_id, gold_gain, actual_start_time, name,
         transform_type, game_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18,
         ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32, ?33, ?34, ?35, ?36,
         ?37)",
    )?
    .execute(params![
        match_row_id,
        frame_row_id,
        event_index as i64,
        event.event_type,
        event.timestamp,
        rfc3339(event.real_timestamp),
        rows.participant(event.participant)?,
        rows.participant(event.creator)?,
        rows.participant(event.killer)?,
        rows.participant(event.victim)?,
        rows.team(event.team)?,
        rows.team(event.killer_team)?,
        rows.team(event.winning_team)?,
        f.item_id,
        f.level_up_type,
        f.skill_slot,
        f.level,
        f.ward_type,
        f.kill_streak_length,
        f.x,
        f.y,
        f.bounty,
        f.shutdown_bounty,
        f.building_type,
        f.tower_type,
        f.lane_type,
        f.kill_type,
        f.multi_kill_length,
        f.monster_type,
        f.monster_sub_type,
        f.after_id,
        f.before_id,
        f.gold_gain,
        f.actual_start_time,
        f.name,
        f.transform_type,
        f.game_id,
    ])?;
    let event_row_id = tx.last_insert_rowid();

    let mut stmt = tx.prepare_cached(
        "INSERT INTO event_assists (event_row_id, participant_row_id, assist_index)
         VALUES (?1, ?2, ?3)",
    )?;
    for (i, assist) in event.assisting.iter().enumerate() {
        stmt.execute(params![
            event_row_id,
            rows.participant(Some(*assist))?,
            i as i64
        ])?;
    }

    insert_damage(tx, "victim_damage_dealt", event_row_id, &event.damage_dealt, rows)?;
    insert_damage(
        tx,
        "victim_damage_received",
        event_row_id,
        &event.damage_received,
        rows,
    )?;

    Ok(())
}

fn insert_damage(
    tx: &Transaction<'_>,
    table: &'static str,
    event_row_id: i64,
    items: &[VictimDamage],
    rows: &RowIds,
) -> StorageResult<()> {
    if items.is_empty() {
        return Ok(());
    }

    let sql = format!(
        "INSERT INTO {} (event_row_id, damage_index, participant_row_id, basic, magic_damage,
         name, physical_damage, spell_name, spell_slot, true_damage, damage_type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        table
    );
    let mut stmt = tx.prepare_cached(&sql)?;
    for (i, d) in items.iter().enumerate() {
        stmt.execute(params![
            event_row_id,
            i as i64,
            rows.participant(d.participant)?,
            d.basic,
            d.magic_damage,
            d.name,
            d.physical_damage,
            d.spell_name,
            d.spell_slot,
            d.true_damage,
            d.damage_type,
        ])?;
    }

    Ok(())
}

impl Gateway for SqliteStorage {
    fn exists(&self, match_id: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM matches WHERE match_id = ?1",
                params![match_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn dedupe_challenges(
        &mut self,
        names: &BTreeSet<String>,
    ) -> StorageResult<HashMap<String, ChallengeId>> {
        let tx = self.conn.transaction()?;
        let mut resolved = HashMap::with_capacity(names.len());
        {
            let mut upsert = tx.prepare_cached(
                "INSERT INTO challenges (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            )?;
            let mut select = tx.prepare_cached("SELECT id FROM challenges WHERE name = ?1")?;

            for name in names {
                upsert.execute(params![name])?;
                let id: Option<i64> = select
                    .query_row(params![name], |row| row.get(0))
                    .optional()?;
                let id = id.ok_or_else(|| StorageError::ChallengeNotResolved(name.clone()))?;
                resolved.insert(name.clone(), ChallengeId(id));
            }
        }
        tx.commit()?;
        Ok(resolved)
    }

    fn store(&mut self, graph: &MatchGraph) -> StorageResult<i64> {
        let tx = self.conn.transaction()?;
        let m = &graph.game;

        tx.execute(
            "INSERT INTO matches (match_id, data_version, end_of_game_result, game_creation,
             game_duration, game_end_timestamp, game_id, game_mode, game_name,
             game_start_timestamp, game_type, game_version, map_id, platform_id, queue_id,
             tournament_code, frame_interval, inserted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                m.match_id,
                m.data_version,
                m.end_of_game_result,
                rfc3339(m.game_creation),
                m.game_duration,
                rfc3339(m.game_end_timestamp),
                m.game_id,
                m.game_mode.as_ref().map(|g| g.as_str()),
                m.game_name,
                rfc3339(m.game_start_timestamp),
                m.game_type.as_ref().map(|g| g.as_str()),
                m.game_version,
                m.map_id,
                m.platform_id,
                m.queue_id,
                m.tournament_code,
                m.frame_interval,
                m.inserted_at.to_rfc3339(),
            ],
        )?;
        let match_row_id = tx.last_insert_rowid();

        let mut rows = RowIds {
            participants: Vec::with_capacity(graph.participants.len()),
            teams: Vec::with_capacity(graph.teams.len()),
        };

        for team in &graph.teams {
            rows.teams.push(insert_team(&tx, match_row_id, team)?);
        }

        for participant in &graph.participants {
            let team_row_id = rows.team(participant.team)?;
            rows.participants
                .push(insert_participant(&tx, match_row_id, team_row_id, participant)?);
        }

        for (i, frame) in graph.frames.iter().enumerate() {
            insert_frame(&tx, match_row_id, i, frame, &rows)?;
        }

        tx.commit()?;
        Ok(match_row_id)
    }

    fn count_rows(&self, table: Table) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.table_name()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn latest_match_id(&self) -> StorageResult<Option<String>> {
        let latest = self
            .conn
            .query_row(
                "SELECT match_id FROM matches ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(latest)
    }
}
