//! Categorical match attributes and their database representations

use std::fmt;

/// Normalized lane a participant played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    TopLane,
    Jungle,
    MidLane,
    BotLane,
    Utility,
}

impl Lane {
    /// Normalizes an upstream position/lane string
    ///
    /// Upstream mixes `MID`/`MIDDLE` and `BOTTOM`, and reports unknown
    /// positions as `Invalid`, `INVALID`, `NONE` or an empty string. All of
    /// those map to no lane.
    pub fn from_upstream(value: &str) -> Option<Self> {
        match value {
            "TOP" => Some(Self::TopLane),
            "JUNGLE" => Some(Self::Jungle),
            "MID" | "MIDDLE" => Some(Self::MidLane),
            "BOTTOM" => Some(Self::BotLane),
            "UTILITY" => Some(Self::Utility),
            _ => None,
        }
    }

    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::TopLane => "TOP_LANE",
            Self::Jungle => "JUNGLE",
            Self::MidLane => "MID_LANE",
            Self::BotLane => "BOT_LANE",
            Self::Utility => "UTILITY",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "TOP_LANE" => Some(Self::TopLane),
            "JUNGLE" => Some(Self::Jungle),
            "MID_LANE" => Some(Self::MidLane),
            "BOT_LANE" => Some(Self::BotLane),
            "UTILITY" => Some(Self::Utility),
            _ => None,
        }
    }
}

/// Legacy role assignment reported alongside the lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Duo,
    DuoCarry,
    DuoSupport,
    None,
    Solo,
    Carry,
    Support,
}

impl Role {
    pub fn from_upstream(value: &str) -> Option<Self> {
        match value {
            "DUO" => Some(Self::Duo),
            "DUO_CARRY" => Some(Self::DuoCarry),
            "DUO_SUPPORT" => Some(Self::DuoSupport),
            "NONE" => Some(Self::None),
            "SOLO" => Some(Self::Solo),
            "CARRY" => Some(Self::Carry),
            "SUPPORT" => Some(Self::Support),
            _ => None,
        }
    }

    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Duo => "DUO",
            Self::DuoCarry => "DUO_CARRY",
            Self::DuoSupport => "DUO_SUPPORT",
            Self::None => "NONE",
            Self::Solo => "SOLO",
            Self::Carry => "CARRY",
            Self::Support => "SUPPORT",
        }
    }
}

/// Game mode of a match
///
/// Upstream introduces new modes with rotating events, so unrecognized names
/// are kept rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameMode {
    Classic,
    Aram,
    Urf,
    OneForAll,
    NexusBlitz,
    Ultbook,
    Cherry,
    Tutorial,
    PracticeTool,
    Other(String),
}

impl GameMode {
    pub fn from_upstream(value: &str) -> Self {
        match value {
            "CLASSIC" => Self::Classic,
            "ARAM" => Self::Aram,
            "URF" => Self::Urf,
            "ONEFORALL" => Self::OneForAll,
            "NEXUSBLITZ" => Self::NexusBlitz,
            "ULTBOOK" => Self::Ultbook,
            "CHERRY" => Self::Cherry,
            "TUTORIAL" => Self::Tutorial,
            "PRACTICETOOL" => Self::PracticeTool,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Classic => "CLASSIC",
            Self::Aram => "ARAM",
            Self::Urf => "URF",
            Self::OneForAll => "ONEFORALL",
            Self::NexusBlitz => "NEXUSBLITZ",
            Self::Ultbook => "ULTBOOK",
            Self::Cherry => "CHERRY",
            Self::Tutorial => "TUTORIAL",
            Self::PracticeTool => "PRACTICETOOL",
            Self::Other(name) => name,
        }
    }
}

/// Game type of a match
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameType {
    CustomGame,
    TutorialGame,
    MatchedGame,
    Other(String),
}

impl GameType {
    pub fn from_upstream(value: &str) -> Self {
        match value {
            "CUSTOM_GAME" => Self::CustomGame,
            "TUTORIAL_GAME" => Self::TutorialGame,
            "MATCHED_GAME" => Self::MatchedGame,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::CustomGame => "CUSTOM_GAME",
            Self::TutorialGame => "TUTORIAL_GAME",
            Self::MatchedGame => "MATCHED_GAME",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
