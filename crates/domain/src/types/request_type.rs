//! Moments in a run at which the game asks the Dungeon Master to speak

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happened in the game that triggered a generation request.
///
/// The request type selects the prompt instruction sent to providers and the
/// fallback catalog bucket used when no provider answers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// A new floor was generated and the player stepped onto it
    #[default]
    FloorStart,
    /// The player picked up or equipped a rune
    RuneAcquired,
    /// HP dropped to a dangerous level
    LowHealth,
    /// The player survived a hit that almost ended the run
    NearDeath,
    /// The run ended in death
    Death,
    /// The run ended in victory
    Victory,
    /// The player has been idle for a while
    IdleTaunt,
}

impl RequestType {
    pub fn all() -> &'static [RequestType] {
        &[
            RequestType::FloorStart,
            RequestType::RuneAcquired,
            RequestType::LowHealth,
            RequestType::NearDeath,
            RequestType::Death,
            RequestType::Victory,
            RequestType::IdleTaunt,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::FloorStart => "floor_start",
            RequestType::RuneAcquired => "rune_acquired",
            RequestType::LowHealth => "low_health",
            RequestType::NearDeath => "near_death",
            RequestType::Death => "death",
            RequestType::Victory => "victory",
            RequestType::IdleTaunt => "idle_taunt",
        }
    }

    /// Short description of the moment, used in the user prompt
    pub fn situation(&self) -> &'static str {
        match self {
            RequestType::FloorStart => "The player has just descended to a new floor.",
            RequestType::RuneAcquired => "The player has just acquired a new rune.",
            RequestType::LowHealth => "The player's health is dangerously low.",
            RequestType::NearDeath => "The player barely survived a hit that should have killed them.",
            RequestType::Death => "The player has just died. The run is over.",
            RequestType::Victory => "The player has conquered the dungeon.",
            RequestType::IdleTaunt => "The player has been hesitating for a while without acting.",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        RequestType::all()
            .iter()
            .copied()
            .find(|rt| rt.as_str() == normalized)
            .ok_or_else(|| DomainError::parse(format!("Unknown request type: '{}'", s)))
    }
}
