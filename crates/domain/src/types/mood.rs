//! Dungeon Master mood
//!
//! The mood tag accompanies every line of Dungeon Master dialogue. The UI uses
//! it to pick a portrait and a text color; providers are asked to choose one
//! of exactly these five literals.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional tone of a Dungeon Master response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DmMood {
    /// Entertained by the player's misfortune or antics
    Amused,
    /// Interested in what the player will do next
    Curious,
    /// Grudging respect for a clever play
    Impressed,
    /// Threatening, foreshadowing danger
    Menacing,
    /// Softer tone after a loss or a close call
    Sympathetic,
}

impl DmMood {
    /// All moods, in the order they are listed to providers.
    pub fn all() -> &'static [DmMood] {
        &[
            DmMood::Amused,
            DmMood::Curious,
            DmMood::Impressed,
            DmMood::Menacing,
            DmMood::Sympathetic,
        ]
    }

    /// Wire literal for this mood
    pub fn as_str(&self) -> &'static str {
        match self {
            DmMood::Amused => "amused",
            DmMood::Curious => "curious",
            DmMood::Impressed => "impressed",
            DmMood::Menacing => "menacing",
            DmMood::Sympathetic => "sympathetic",
        }
    }
}

impl fmt::Display for DmMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DmMood {
    type Err = DomainError;

    /// Parses a wire literal. Matching is exact: provider output that uses a
    /// different casing is rejected rather than guessed at.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DmMood::all()
            .iter()
            .copied()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| {
                DomainError::parse(format!(
                    "Unknown mood: '{}'. Valid values: amused, curious, impressed, menacing, sympathetic",
                    s
                ))
            })
    }
}
