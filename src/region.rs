//! Platform and routing definitions
//!
//! Match ids are scoped by platform (`EUW1_6543210`), while the match API
//! itself is served from one of four regional routing hosts.

use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A game platform whose match id space is being crawled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Platform {
    Br1,
    Eun1,
    Euw1,
    Jp1,
    Kr,
    La1,
    La2,
    Na1,
    Oc1,
    Tr1,
    Ru,
    Ph2,
    Sg2,
    Th2,
    Tw2,
    Vn2,
}

/// Regional routing value that serves match-v5 for a set of platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionalRoute {
    Americas,
    Europe,
    Asia,
    Sea,
}

impl Platform {
    pub const ALL: [Platform; 16] = [
        Self::Br1,
        Self::Eun1,
        Self::Euw1,
        Self::Jp1,
        Self::Kr,
        Self::La1,
        Self::La2,
        Self::Na1,
        Self::Oc1,
        Self::Tr1,
        Self::Ru,
        Self::Ph2,
        Self::Sg2,
        Self::Th2,
        Self::Tw2,
        Self::Vn2,
    ];

    /// Platform code as it appears in match ids
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Br1 => "BR1",
            Self::Eun1 => "EUN1",
            Self::Euw1 => "EUW1",
            Self::Jp1 => "JP1",
            Self::Kr => "KR",
            Self::La1 => "LA1",
            Self::La2 => "LA2",
            Self::Na1 => "NA1",
            Self::Oc1 => "OC1",
            Self::Tr1 => "TR1",
            Self::Ru => "RU",
            Self::Ph2 => "PH2",
            Self::Sg2 => "SG2",
            Self::Th2 => "TH2",
            Self::Tw2 => "TW2",
            Self::Vn2 => "VN2",
        }
    }

    /// Short region name players use for this platform
    pub fn region_code(&self) -> &'static str {
        match self {
            Self::Br1 => "BR",
            Self::Eun1 => "EUNE",
            Self::Euw1 => "EUW",
            Self::Jp1 => "JP",
            Self::Kr => "KR",
            Self::La1 => "LAN",
            Self::La2 => "LAS",
            Self::Na1 => "NA",
            Self::Oc1 => "OCE",
            Self::Tr1 => "TR",
            Self::Ru => "RU",
            Self::Ph2 => "PH",
            Self::Sg2 => "SG",
            Self::Th2 => "TH",
            Self::Tw2 => "TW",
            Self::Vn2 => "VN",
        }
    }

    pub fn route(&self) -> RegionalRoute {
        match self {
            Self::Br1 | Self::La1 | Self::La2 | Self::Na1 => RegionalRoute::Americas,
            Self::Eun1 | Self::Euw1 | Self::Tr1 | Self::Ru => RegionalRoute::Europe,
            Self::Jp1 | Self::Kr => RegionalRoute::Asia,
            Self::Oc1 | Self::Ph2 | Self::Sg2 | Self::Th2 | Self::Tw2 | Self::Vn2 => {
                RegionalRoute::Sea
            }
        }
    }

    /// Formats the global match id for a numeric index
    ///
    /// # Example
    ///
    /// ```
    /// use match_harvester::Platform;
    ///
    /// assert_eq!(Platform::Ru.match_id(506604852), "RU_506604852");
    /// ```
    pub fn match_id(&self, index: u64) -> String {
        format!("{}_{}", self.as_str(), index)
    }
}

impl RegionalRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Europe => "europe",
            Self::Asia => "asia",
            Self::Sea => "sea",
        }
    }

    /// Default API host for this route
    pub fn api_base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    /// Accepts either the platform code (`EUW1`) or the region code (`EUW`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted || p.region_code() == wanted)
            .ok_or_else(|| ConfigError::UnknownPlatform(s.to_string()))
    }
}

impl TryFrom<String> for Platform {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
