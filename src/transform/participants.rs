use crate::model::{ChallengeId, ChallengeLink, Lane, Participant, Perk, Role};
use crate::transform::Arena;
use crate::upstream::{ParticipantDto, PerksDto};
use crate::TransformError;
use std::collections::HashMap;

/// Builds one participant entity with its perks, missions and challenge links
pub(crate) fn build(
    dto: &ParticipantDto,
    arena: &Arena,
    challenges: &HashMap<String, ChallengeId>,
) -> Result<Participant, TransformError> {
    let links = match &dto.challenges {
        Some(values) => values
            .iter()
            .map(|(name, value)| {
                let challenge = challenges
                    .get(name)
                    .copied()
                    .ok_or_else(|| TransformError::UnknownChallenge(name.clone()))?;
                Ok(ChallengeLink {
                    challenge,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<_>, TransformError>>()?,
        None => Vec::new(),
    };

    Ok(Participant {
        participant_id: dto.participant_id,
        team_id: dto.team_id,
        team: dto.team_id.and_then(|id| arena.team(id)),
        individual_position: dto.individual_position.as_deref().and_then(Lane::from_upstream),
        lane: dto.lane.as_deref().and_then(Lane::from_upstream),
        team_position: dto.team_position.as_deref().and_then(Lane::from_upstream),
        role: dto.role.as_deref().and_then(Role::from_upstream),
        stats: dto.stats.clone(),
        defense_stat: dto.perks.stat_perks.defense,
        flex_stat: dto.perks.stat_perks.flex,
        offense_stat: dto.perks.stat_perks.offense,
        perks: flatten_perks(&dto.perks),
        missions: dto.missions.clone(),
        challenges: links,
    })
}

/// Flattens rune styles into one perk per selection, tagged with its style
fn flatten_perks(perks: &PerksDto) -> Vec<Perk> {
    perks
        .styles
        .iter()
        .flat_map(|style| {
            style.selections.iter().map(move |s| Perk {
                style: style.style,
                description: style.description.clone(),
                perk: s.perk,
                var1: s.var1,
                var2: s.var2,
                var3: s.var3,
            })
        })
        .collect()
}
