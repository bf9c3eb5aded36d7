use crate::model::{Ban, Objectives, Participant, ParticipantRef, Team};
use crate::transform::Arena;
use crate::upstream::{ObjectivesDto, TeamDto};

/// Builds one team entity; members are the participants sharing its team id
pub(crate) fn build(dto: &TeamDto, participants: &[Participant], arena: &Arena) -> Team {
    let members = participants
        .iter()
        .filter(|p| p.team_id == Some(dto.team_id))
        .filter_map(|p| arena.participant(p.participant_id))
        .collect::<Vec<ParticipantRef>>();

    Team {
        team_id: dto.team_id,
        win: dto.win,
        objectives: flatten_objectives(&dto.objectives),
        bans: dto
            .bans
            .iter()
            .map(|b| Ban {
                champion_id: b.champion_id,
                pick_turn: b.pick_turn,
            })
            .collect(),
        members,
    }
}

fn flatten_objectives(o: &ObjectivesDto) -> Objectives {
    Objectives {
        baron_first: o.baron.first,
        baron_kills: o.baron.kills,
        champion_first: o.champion.first,
        champion_kills: o.champion.kills,
        dragon_first: o.dragon.first,
        dragon_kills: o.dragon.kills,
        horde_first: o.horde.and_then(|h| h.first),
        horde_kills: o.horde.and_then(|h| h.kills),
        inhibitor_first: o.inhibitor.first,
        inhibitor_kills: o.inhibitor.kills,
        rift_herald_first: o.rift_herald.first,
        rift_herald_kills: o.rift_herald.kills,
        tower_first: o.tower.first,
        tower_kills: o.tower.kills,
    }
}
