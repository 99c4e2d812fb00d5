//! Hint kinds the Dungeon Master may attach to a response

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of an optional hint shown under the dialogue line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintType {
    /// Points at imminent danger (low HP, a risky reveal)
    Warning,
    /// General strategy advice
    Tip,
    /// Flavor about the dungeon, runes or monsters
    Lore,
}

impl HintType {
    pub fn all() -> &'static [HintType] {
        &[HintType::Warning, HintType::Tip, HintType::Lore]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HintType::Warning => "warning",
            HintType::Tip => "tip",
            HintType::Lore => "lore",
        }
    }
}

impl fmt::Display for HintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HintType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HintType::all()
            .iter()
            .copied()
            .find(|hint| hint.as_str() == s)
            .ok_or_else(|| {
                DomainError::parse(format!(
                    "Unknown hint type: '{}'. Valid values: warning, tip, lore",
                    s
                ))
            })
    }
}
