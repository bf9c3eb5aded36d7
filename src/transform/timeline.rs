use crate::model::{Event, EventFields, Frame, ParticipantFrame, ParticipantRef, VictimDamage};
use crate::transform::{from_millis, Arena};
use crate::upstream::{
    EventDetail, EventDto, FrameDto, ParticipantFrameDto, PositionDto, UntypedEventDto,
    VictimDamageDto,
};
use crate::TransformError;

/// Upstream ids carried by one event, before resolution
#[derive(Debug, Default)]
struct RawRefs<'a> {
    participant: Option<u32>,
    creator: Option<u32>,
    killer: Option<u32>,
    victim: Option<u32>,
    team: Option<i64>,
    killer_team: Option<i64>,
    winning_team: Option<i64>,
    assisting: &'a [u32],
    damage_dealt: &'a [VictimDamageDto],
    damage_received: &'a [VictimDamageDto],
}

/// Builds frames in retrieved order, events in retrieved order within each
pub(crate) fn build_frames(frames: &[FrameDto], arena: &Arena) -> Result<Vec<Frame>, TransformError> {
    frames
        .iter()
        .map(|frame| {
            let participant_frames = frame
                .participant_frames
                .values()
                .map(|pf| build_participant_frame(pf, arena))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Frame {
                timestamp: frame.timestamp,
                events: frame.events.iter().map(|e| build_event(e, arena)).collect(),
                participant_frames,
            })
        })
        .collect()
}

fn build_participant_frame(
    dto: &ParticipantFrameDto,
    arena: &Arena,
) -> Result<ParticipantFrame, TransformError> {
    let participant = arena
        .participant(dto.participant_id)
        .ok_or(TransformError::UnknownFrameParticipant(dto.participant_id))?;

    Ok(ParticipantFrame {
        participant,
        current_gold: dto.current_gold,
        gold_per_second: dto.gold_per_second,
        jungle_minions_killed: dto.jungle_minions_killed,
        level: dto.level,
        minions_killed: dto.minions_killed,
        time_enemy_spent_controlled: dto.time_enemy_spent_controlled,
        total_gold: dto.total_gold,
        xp: dto.xp,
        x: Some(dto.position.x),
        y: Some(dto.position.y),
        champion_stats: dto.champion_stats.clone(),
        damage_stats: dto.damage_stats.clone(),
    })
}

fn build_event(dto: &EventDto, arena: &Arena) -> Event {
    let (mut fields, mut raw) = flatten(&dto.detail);
    if let Some(untyped) = &dto.untyped {
        flatten_untyped(untyped, &mut fields, &mut raw);
    }

    Event {
        event_type: dto.event_type.clone(),
        timestamp: dto.timestamp,
        real_timestamp: from_millis(dto.real_timestamp),
        fields,
        participant: raw.participant.and_then(|id| arena.participant(id)),
        creator: raw.creator.and_then(|id| arena.participant(id)),
        killer: raw.killer.and_then(|id| arena.participant(id)),
        victim: raw.victim.and_then(|id| arena.participant(id)),
        team: raw.team.and_then(|id| arena.team(id)),
        killer_team: raw.killer_team.and_then(|id| arena.team(id)),
        winning_team: raw.winning_team.and_then(|id| arena.team(id)),
        assisting: resolve_assists(raw.assisting, arena),
        damage_dealt: raw.damage_dealt.iter().map(|d| build_damage(d, arena)).collect(),
        damage_received: raw
            .damage_received
            .iter()
            .map(|d| build_damage(d, arena))
            .collect(),
    }
}

/// Distinct assisting participants in first-seen order
fn resolve_assists(ids: &[u32], arena: &Arena) -> Vec<ParticipantRef> {
    let mut resolved: Vec<ParticipantRef> = Vec::with_capacity(ids.len());
    for r in ids.iter().filter_map(|id| arena.participant(*id)) {
        if !resolved.contains(&r) {
            resolved.push(r);
        }
    }
    resolved
}

fn build_damage(dto: &VictimDamageDto, arena: &Arena) -> VictimDamage {
    VictimDamage {
        participant: arena.participant(dto.participant_id),
        basic: dto.basic,
        magic_damage: dto.magic_damage,
        name: dto.name.clone(),
        physical_damage: dto.physical_damage,
        spell_name: dto.spell_name.clone(),
        spell_slot: dto.spell_slot,
        true_damage: dto.true_damage,
        damage_type: dto.damage_type.clone(),
    }
}

fn at(position: &Option<PositionDto>, fields: &mut EventFields) {
    if let Some(p) = position {
        fields.x = Some(p.x);
        fields.y = Some(p.y);
    }
}

/// Takes the common fields of an event type without its own variant
fn flatten_untyped<'a>(u: &'a UntypedEventDto, f: &mut EventFields, r: &mut RawRefs<'a>) {
    at(&u.position, f);
    r.participant = u.participant_id;
    r.creator = u.creator_id;
    r.killer = u.killer_id;
    r.victim = u.victim_id;
    r.team = u.team_id;
    r.killer_team = u.killer_team_id;
    r.assisting = u.assisting_participant_ids.as_slice();
}

/// Splits a typed event into stored scalar fields and unresolved references
fn flatten(detail: &EventDetail) -> (EventFields, RawRefs<'_>) {
    let mut f = EventFields::default();
    let mut r = RawRefs::default();

    match detail {
        EventDetail::PauseEnd {} | EventDetail::Unrecognized => {}
        EventDetail::LevelUp {
            level,
            participant_id,
        } => {
            f.level = *level;
            r.participant = Some(*participant_id);
        }
        EventDetail::SkillLevelUp {
            level_up_type,
            participant_id,
            skill_slot,
        } => {
            f.level_up_type = level_up_type.clone();
            f.skill_slot = *skill_slot;
            r.participant = Some(*participant_id);
        }
        EventDetail::ItemPurchased {
            item_id,
            participant_id,
        }
        | EventDetail::ItemSold {
            item_id,
            participant_id,
        }
        | EventDetail::ItemDestroyed {
            item_id,
            participant_id,
        } => {
            f.item_id = *item_id;
            r.participant = Some(*participant_id);
        }
        EventDetail::ItemUndo {
            after_id,
            before_id,
            gold_gain,
            participant_id,
        } => {
            f.after_id = *after_id;
            f.before_id = *before_id;
            f.gold_gain = *gold_gain;
            r.participant = Some(*participant_id);
        }
        EventDetail::WardPlaced {
            creator_id,
            ward_type,
        } => {
            f.ward_type = ward_type.clone();
            r.creator = Some(*creator_id);
        }
        EventDetail::WardKill {
            killer_id,
            ward_type,
        } => {
            f.ward_type = ward_type.clone();
            r.killer = Some(*killer_id);
        }
        EventDetail::ChampionKill {
            assisting_participant_ids,
            bounty,
            kill_streak_length,
            killer_id,
            position,
            shutdown_bounty,
            victim_damage_dealt,
            victim_damage_received,
            victim_id,
        } => {
            f.bounty = *bounty;
            f.kill_streak_length = *kill_streak_length;
            f.shutdown_bounty = *shutdown_bounty;
            at(position, &mut f);
            r.killer = Some(*killer_id);
            r.victim = Some(*victim_id);
            r.assisting = assisting_participant_ids.as_slice();
            r.damage_dealt = victim_damage_dealt.as_slice();
            r.damage_received = victim_damage_received.as_slice();
        }
        EventDetail::ChampionSpecialKill {
            kill_type,
            killer_id,
            multi_kill_length,
            position,
        } => {
            f.kill_type = kill_type.clone();
            f.multi_kill_length = *multi_kill_length;
            at(position, &mut f);
            r.killer = Some(*killer_id);
        }
        EventDetail::EliteMonsterKill {
            assisting_participant_ids,
            bounty,
            killer_id,
            killer_team_id,
            monster_sub_type,
            monster_type,
            position,
        } => {
            f.bounty = *bounty;
            f.monster_sub_type = monster_sub_type.clone();
            f.monster_type = monster_type.clone();
            at(position, &mut f);
            r.killer = Some(*killer_id);
            r.killer_team = *killer_team_id;
            r.assisting = assisting_participant_ids.as_slice();
        }
        EventDetail::BuildingKill {
            assisting_participant_ids,
            bounty,
            building_type,
            killer_id,
            lane_type,
            position,
            team_id,
            tower_type,
        } => {
            f.bounty = *bounty;
            f.building_type = building_type.clone();
            f.lane_type = lane_type.clone();
            f.tower_type = tower_type.clone();
            at(position, &mut f);
            r.killer = Some(*killer_id);
            r.team = *team_id;
            r.assisting = assisting_participant_ids.as_slice();
        }
        EventDetail::TurretPlateDestroyed {
            killer_id,
            lane_type,
            position,
            team_id,
        } => {
            f.lane_type = lane_type.clone();
            at(position, &mut f);
            r.killer = Some(*killer_id);
            r.team = *team_id;
        }
        EventDetail::DragonSoulGiven { name, team_id } => {
            f.name = name.clone();
            r.team = *team_id;
        }
        EventDetail::ObjectiveBountyPrestart {
            actual_start_time,
            team_id,
        } => {
            f.actual_start_time = *actual_start_time;
            r.team = *team_id;
        }
        EventDetail::ObjectiveBountyFinish { team_id } => {
            r.team = *team_id;
        }
        EventDetail::ChampionTransform {
            participant_id,
            transform_type,
        } => {
            f.transform_type = transform_type.clone();
            r.participant = Some(*participant_id);
        }
        EventDetail::GameEnd {
            game_id,
            winning_team,
        } => {
            f.game_id = *game_id;
            r.winning_team = *winning_team;
        }
    }

    (f, r)
}
