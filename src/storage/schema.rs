//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the match store. Every
//! child table points at its parent through a `*_row_id` column; ordered
//! collections carry an explicit index column so retrieval order survives.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per ingested match
CREATE TABLE IF NOT EXISTS matches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id TEXT NOT NULL UNIQUE,
    data_version TEXT,
    end_of_game_result TEXT,
    game_creation TEXT,
    game_duration INTEGER,
    game_end_timestamp TEXT,
    game_id INTEGER,
    game_mode TEXT,
    game_name TEXT,
    game_start_timestamp TEXT,
    game_type TEXT,
    game_version TEXT,
    map_id INTEGER,
    platform_id TEXT,
    queue_id INTEGER,
    tournament_code TEXT,
    frame_interval INTEGER,
    inserted_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_row_id INTEGER NOT NULL REFERENCES matches(id),
    team_id INTEGER NOT NULL,
    win INTEGER,
    baron_first INTEGER,
    baron_kills INTEGER,
    champion_first INTEGER,
    champion_kills INTEGER,
    dragon_first INTEGER,
    dragon_kills INTEGER,
    horde_first INTEGER,
    horde_kills INTEGER,
    inhibitor_first INTEGER,
    inhibitor_kills INTEGER,
    rift_herald_first INTEGER,
    rift_herald_kills INTEGER,
    tower_first INTEGER,
    tower_kills INTEGER,
    UNIQUE(match_row_id, team_id)
);

CREATE INDEX IF NOT EXISTS idx_teams_match ON teams(match_row_id);

CREATE TABLE IF NOT EXISTS bans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    team_row_id INTEGER NOT NULL REFERENCES teams(id),
    ban_index INTEGER NOT NULL,
    champion_id INTEGER,
    pick_turn INTEGER
);

CREATE INDEX IF NOT EXISTS idx_bans_team ON bans(team_row_id);

CREATE TABLE IF NOT EXISTS participants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_row_id INTEGER NOT NULL REFERENCES matches(id),
    team_row_id INTEGER REFERENCES teams(id),
    participant_id INTEGER NOT NULL,
    team_id INTEGER,
    individual_position TEXT,
    lane TEXT,
    team_position TEXT,
    role TEXT,
    defense_stat INTEGER,
    flex_stat INTEGER,
    offense_stat INTEGER,
    puuid TEXT,
    summoner_name TEXT,
    riot_id_game_name TEXT,
    riot_id_tagline TEXT,
    summoner_level INTEGER,
    champion_id INTEGER,
    champion_name TEXT,
    champ_level INTEGER,
    champ_experience INTEGER,
    kills INTEGER,
    deaths INTEGER,
    assists INTEGER,
    largest_multi_kill INTEGER,
    gold_earned INTEGER,
    gold_spent INTEGER,
    total_damage_dealt INTEGER,
    total_damage_dealt_to_champions INTEGER,
    total_damage_taken INTEGER,
    damage_self_mitigated INTEGER,
    damage_dealt_to_objectives INTEGER,
    total_heal INTEGER,
    total_minions_killed INTEGER,
    neutral_minions_killed INTEGER,
    vision_score INTEGER,
    wards_placed INTEGER,
    wards_killed INTEGER,
    item0 INTEGER,
    item1 INTEGER,
    item2 INTEGER,
    item3 INTEGER,
    item4 INTEGER,
    item5 INTEGER,
    item6 INTEGER,
    summoner1_id INTEGER,
    summoner2_id INTEGER,
    first_blood_kill INTEGER,
    first_tower_kill INTEGER,
    time_played INTEGER,
    game_ended_in_surrender INTEGER,
    win INTEGER,
    -- Remaining upstream statistics as one JSON object
    extra_stats TEXT NOT NULL DEFAULT '{}',
    UNIQUE(match_row_id, participant_id)
);

CREATE INDEX IF NOT EXISTS idx_participants_match ON participants(match_row_id);
CREATE INDEX IF NOT EXISTS idx_participants_puuid ON participants(puuid);

CREATE TABLE IF NOT EXISTS perks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_row_id INTEGER NOT NULL REFERENCES participants(id),
    perk_index INTEGER NOT NULL,
    style INTEGER,
    description TEXT,
    perk INTEGER,
    var1 INTEGER,
    var2 INTEGER,
    var3 INTEGER
);

CREATE INDEX IF NOT EXISTS idx_perks_participant ON perks(participant_row_id);

CREATE TABLE IF NOT EXISTS missions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_row_id INTEGER NOT NULL UNIQUE REFERENCES participants(id),
    player_score0 REAL,
    player_score1 REAL,
    player_score2 REAL,
    player_score3 REAL,
    player_score4 REAL,
    player_score5 REAL,
    player_score6 REAL,
    player_score7 REAL,
    player_score8 REAL,
    player_score9 REAL,
    player_score10 REAL,
    player_score11 REAL
);

-- Global challenge catalog, shared by all matches
CREATE TABLE IF NOT EXISTS challenges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS challenge_participant_links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    challenge_row_id INTEGER NOT NULL REFERENCES challenges(id),
    participant_row_id INTEGER NOT NULL REFERENCES participants(id),
    value TEXT NOT NULL,
    UNIQUE(challenge_row_id, participant_row_id)
);

CREATE INDEX IF NOT EXISTS idx_challenge_links_participant ON challenge_participant_links(participant_row_id);

CREATE TABLE IF NOT EXISTS frames (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_row_id INTEGER NOT NULL REFERENCES matches(id),
    frame_index INTEGER NOT NULL,
    timestamp INTEGER NOT NULL,
    UNIQUE(match_row_id, frame_index)
);

CREATE TABLE IF NOT EXISTS participant_frames (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    frame_row_id INTEGER NOT NULL REFERENCES frames(id),
    participant_row_id INTEGER NOT NULL REFERENCES participants(id),
    current_gold INTEGER,
    gold_per_second INTEGER,
    jungle_minions_killed INTEGER,
    level INTEGER,
    minions_killed INTEGER,
    time_enemy_spent_controlled INTEGER,
    total_gold INTEGER,
    xp INTEGER,
    x INTEGER,
    y INTEGER,
    ability_haste INTEGER,
    ability_power INTEGER,
    armor INTEGER,
    armor_pen INTEGER,
    armor_pen_percent INTEGER,
    attack_damage INTEGER,
    attack_speed INTEGER,
    bonus_armor_pen_percent INTEGER,
    bonus_magic_pen_percent INTEGER,
    cc_reduction INTEGER,
    cooldown_reduction INTEGER,
    health INTEGER,
    health_max INTEGER,
    health_regen INTEGER,
    lifesteal INTEGER,
    magic_pen INTEGER,
    magic_pen_percent INTEGER,
    magic_resist INTEGER,
    movement_speed INTEGER,
    omnivamp INTEGER,
    physical_vamp INTEGER,
    power INTEGER,
    power_max INTEGER,
    power_regen INTEGER,
    spell_vamp INTEGER,
    magic_damage_done INTEGER,
    magic_damage_done_to_champions INTEGER,
    magic_damage_taken INTEGER,
    physical_damage_done INTEGER,
    physical_damage_done_to_champions INTEGER,
    physical_damage_taken INTEGER,
    total_damage_done INTEGER,
    total_damage_done_to_champions INTEGER,
    total_damage_taken INTEGER,
    true_damage_done INTEGER,
    true_damage_done_to_champions INTEGER,
    true_damage_taken INTEGER,
    UNIQUE(frame_row_id, participant_row_id)
);

CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_row_id INTEGER NOT NULL REFERENCES matches(id),
    frame_row_id INTEGER NOT NULL REFERENCES frames(id),
    event_index INTEGER NOT NULL,
    event_type TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    real_timestamp TEXT,
    participant_row_id INTEGER REFERENCES participants(id),
    creator_row_id INTEGER REFERENCES participants(id),
    killer_row_id INTEGER REFERENCES participants(id),
    victim_row_id INTEGER REFERENCES participants(id),
    team_row_id INTEGER REFERENCES teams(id),
    killer_team_row_id INTEGER REFERENCES teams(id),
    winning_team_row_id INTEGER REFERENCES teams(id),
    item_id INTEGER,
    level_up_type TEXT,
    skill_slot INTEGER,
    level INTEGER,
    ward_type TEXT,
    kill_streak_length INTEGER,
    x INTEGER,
    y INTEGER,
    bounty INTEGER,
    shutdown_bounty INTEGER,
    building_type TEXT,
    tower_type TEXT,
    lane_type TEXT,
    kill_type TEXT,
    multi_kill_length INTEGER,
    monster_type TEXT,
    monster_sub_type TEXT,
    after_id INTEGER,
    before_id INTEGER,
    gold_gain INTEGER,
    actual_start_time INTEGER,
    name TEXT,
    transform_type TEXT,
    game_id INTEGER,
    UNIQUE(frame_row_id, event_index)
);

CREATE INDEX IF NOT EXISTS idx_events_type ON events(event_type);
CREATE INDEX IF NOT EXISTS idx_events_match ON events(match_row_id);

CREATE TABLE IF NOT EXISTS event_assists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_row_id INTEGER NOT NULL REFERENCES events(id),
    participant_row_id INTEGER NOT NULL REFERENCES participants(id),
    assist_index INTEGER NOT NULL,
    UNIQUE(event_row_id, participant_row_id)
);

CREATE TABLE IF NOT EXISTS victim_damage_dealt (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_row_id INTEGER NOT NULL REFERENCES events(id),
    damage_index INTEGER NOT NULL,
    participant_row_id INTEGER REFERENCES participants(id),
    basic INTEGER,
    magic_damage INTEGER,
    name TEXT,
    physical_damage INTEGER,
    spell_name TEXT,
    spell_slot INTEGER,
    true_damage INTEGER,
    damage_type TEXT
);

CREATE TABLE IF NOT EXISTS victim_damage_received (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_row_id INTEGER NOT NULL REFERENCES events(id),
    damage_index INTEGER NOT NULL,
    participant_row_id INTEGER REFERENCES participants(id),
    basic INTEGER,
    magic_damage INTEGER,
    name TEXT,
    physical_damage INTEGER,
    spell_name TEXT,
    spell_slot INTEGER,
    true_damage INTEGER,
    damage_type TEXT
);
"#;

/// Initializes the database schema
///
/// Every statement is `IF NOT EXISTS`, so this is safe on an existing store.
pub fn initialize_schema(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
