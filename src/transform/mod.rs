//! Record-to-graph transformation
//!
//! This module turns one retrieved summary/timeline pair into a `MatchGraph`:
//! - Validates participant and team identity
//! - Resolves challenge names through the gateway's catalog
//! - Flattens perks, objectives and sparse timeline events
//! - Resolves every participant and team reference to an arena index
//!
//! Failures abandon the whole match; no partial graph is ever returned.

mod participants;
mod teams;
mod timeline;

use crate::model::{
    ChallengeId, GameMode, GameType, Match, MatchGraph, ParticipantRef, TeamRef,
};
use crate::storage::Gateway;
use crate::upstream::{MatchDto, TimelineDto};
use crate::TransformError;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{BTreeSet, HashMap};

/// Highest participant id a match can carry
pub const MAX_PARTICIPANT_ID: u32 = 10;

/// Number of teams in a match
const TEAM_COUNT: usize = 2;

/// Identity maps from upstream ids to arena indices
///
/// These are the only way upstream ids become references. An id that is not
/// in the map (including the non-participant sentinel 0) has no reference.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    participants: HashMap<u32, ParticipantRef>,
    teams: HashMap<i64, TeamRef>,
}

impl Arena {
    pub(crate) fn participant(&self, id: u32) -> Option<ParticipantRef> {
        self.participants.get(&id).copied()
    }

    pub(crate) fn team(&self, id: i64) -> Option<TeamRef> {
        self.teams.get(&id).copied()
    }
}

/// Transforms a summary and timeline into a match graph
///
/// The only side effect is the challenge catalog upsert done through
/// `gateway`, which is idempotent.
///
/// # Arguments
///
/// * `summary` - The match summary record
/// * `timeline` - The event timeline of the same match
/// * `gateway` - Store used to resolve challenge ids
///
/// # Returns
///
/// * `Ok(MatchGraph)` - A complete graph ready to store
/// * `Err(TransformError)` - The records are inconsistent or malformed
pub fn transform<G: Gateway + ?Sized>(
    summary: &MatchDto,
    timeline: &TimelineDto,
    gateway: &mut G,
) -> Result<MatchGraph, TransformError> {
    if timeline.metadata.match_id != summary.metadata.match_id {
        return Err(TransformError::MatchIdMismatch {
            expected: summary.metadata.match_id.clone(),
            found: timeline.metadata.match_id.clone(),
        });
    }

    let arena = build_arena(summary)?;
    let challenges = resolve_challenges(summary, gateway)?;

    let participants = summary
        .info
        .participants
        .iter()
        .map(|p| participants::build(p, &arena, &challenges))
        .collect::<Result<Vec<_>, _>>()?;

    let teams = summary
        .info
        .teams
        .iter()
        .map(|t| teams::build(t, &participants, &arena))
        .collect();

    let frames = timeline::build_frames(&timeline.info.frames, &arena)?;

    let graph = MatchGraph {
        game: build_match(summary, timeline),
        participants,
        teams,
        frames,
    };

    tracing::debug!(
        "Transformed {}: {} participants, {} frames, {} events",
        graph.game.match_id,
        graph.participants.len(),
        graph.frames.len(),
        graph.event_count()
    );

    Ok(graph)
}

fn build_arena(summary: &MatchDto) -> Result<Arena, TransformError> {
    let mut arena = Arena::default();

    for (i, p) in summary.info.participants.iter().enumerate() {
        if p.participant_id == 0 || p.participant_id > MAX_PARTICIPANT_ID {
            return Err(TransformError::ParticipantOutOfRange(p.participant_id));
        }
        if arena
            .participants
            .insert(p.participant_id, ParticipantRef(i))
            .is_some()
        {
            return Err(TransformError::DuplicateParticipant(p.participant_id));
        }
    }

    if summary.info.teams.len() != TEAM_COUNT {
        return Err(TransformError::TeamCount(summary.info.teams.len()));
    }
    for (i, t) in summary.info.teams.iter().enumerate() {
        if arena.teams.insert(t.team_id, TeamRef(i)).is_some() {
            return Err(TransformError::DuplicateTeam(t.team_id));
        }
    }

    Ok(arena)
}

fn resolve_challenges<G: Gateway + ?Sized>(
    summary: &MatchDto,
    gateway: &mut G,
) -> Result<HashMap<String, ChallengeId>, TransformError> {
    let names: BTreeSet<String> = summary
        .info
        .participants
        .iter()
        .filter_map(|p| p.challenges.as_ref())
        .flat_map(|c| c.keys().cloned())
        .collect();

    if names.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(gateway.dedupe_challenges(&names)?)
}

fn build_match(summary: &MatchDto, timeline: &TimelineDto) -> Match {
    let info = &summary.info;
    Match {
        match_id: summary.metadata.match_id.clone(),
        data_version: summary.metadata.data_version.clone(),
        end_of_game_result: info.end_of_game_result.clone(),
        game_creation: from_millis(info.game_creation),
        game_duration: info.game_duration,
        game_end_timestamp: from_millis(info.game_end_timestamp),
        game_id: info.game_id,
        game_mode: info.game_mode.as_deref().map(GameMode::from_upstream),
        game_name: info.game_name.clone(),
        game_start_timestamp: from_millis(info.game_start_timestamp),
        game_type: info.game_type.as_deref().map(GameType::from_upstream),
        game_version: info.game_version.clone(),
        map_id: info.map_id,
        platform_id: info.platform_id.clone(),
        queue_id: info.queue_id,
        tournament_code: info.tournament_code.clone(),
        frame_interval: timeline.info.frame_interval,
        inserted_at: Utc::now(),
    }
}

/// Converts upstream unix millis; out-of-range values become `None`
pub(crate) fn from_millis(ms: Option<i64>) -> Option<DateTime<Utc>> {
    ms.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}
