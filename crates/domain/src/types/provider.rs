//! Text-generation provider identifiers

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an external text-generation provider.
///
/// Ordering follows chain priority: the primary provider sorts first, which
/// keeps `BTreeMap<ProviderId, _>` output in the order providers were tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Google Gemini (primary)
    Gemini,
    /// Groq, OpenAI-compatible (secondary)
    Groq,
}

impl ProviderId {
    /// Fixed fallback-chain order: primary first.
    pub fn priority_order() -> &'static [ProviderId] {
        &[ProviderId::Gemini, ProviderId::Groq]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::Groq => "groq",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderId::Gemini),
            "groq" => Ok(ProviderId::Groq),
            _ => Err(DomainError::parse(format!("Unknown provider: '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_sorts_first() {
        let mut ids = vec![ProviderId::Groq, ProviderId::Gemini];
        ids.sort();
        assert_eq!(ids, ProviderId::priority_order());
    }

    #[test]
    fn parse_round_trips_display() {
        for id in ProviderId::priority_order() {
            assert_eq!(id.to_string().parse::<ProviderId>().unwrap(), *id);
        }
    }
}
