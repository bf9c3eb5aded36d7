//! Wire shapes of the upstream match API
//!
//! These types mirror the JSON documents exactly as they arrive. Nothing here
//! is stored directly; `transform` turns a summary and timeline pair into a
//! `MatchGraph`.

pub mod event;
pub mod summary;
pub mod timeline;

pub use event::{EventDetail, EventDto, UntypedEventDto, VictimDamageDto};
pub use summary::{
    BanDto, InfoDto, MatchDto, MetadataDto, ObjectiveDto, ObjectivesDto, ParticipantDto,
    PerkStatsDto, PerkStyleDto, PerkStyleSelectionDto, PerksDto, TeamDto,
};
pub use timeline::{
    FrameDto, ParticipantFrameDto, PositionDto, TimelineDto, TimelineInfoDto,
    TimelineMetadataDto, TimelineParticipantDto,
};
