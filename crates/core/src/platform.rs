//! The fixed set of platforms a game can be released on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    PlayStation,
    Xbox,
    #[serde(rename = "Nintendo Switch")]
    NintendoSwitch,
    #[serde(rename = "PC")]
    Pc,
    Mobile,
    Web,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::PlayStation,
        Platform::Xbox,
        Platform::NintendoSwitch,
        Platform::Pc,
        Platform::Mobile,
        Platform::Web,
    ];

    /// The stored and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::PlayStation => "PlayStation",
            Platform::Xbox => "Xbox",
            Platform::NintendoSwitch => "Nintendo Switch",
            Platform::Pc => "PC",
            Platform::Mobile => "Mobile",
            Platform::Web => "Web",
        }
    }

    /// Comma-separated list of every accepted value, for error messages.
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    /// Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}
