//! Bounded context snapshot sent to providers as grounding
//!
//! # Token estimate
//!
//! Size is measured on the compact camelCase JSON form of the snapshot:
//! `ceil(chars / CHARS_PER_TOKEN)`. This is the same 4-characters-per-token
//! approximation used for GPT-style tokenizers; it only needs to be
//! consistent, not exact.

use serde::{Deserialize, Serialize};

use crate::types::RequestType;

/// At most this many favorite runes are reported
pub const MAX_FAVORITE_RUNES: usize = 5;
/// At most this many recent death causes are reported
pub const MAX_RECENT_DEATH_CAUSES: usize = 5;
/// At most this many recent actions are reported
pub const MAX_RECENT_ACTIONS: usize = 10;
/// Characters per token in the size approximation
pub const CHARS_PER_TOKEN: usize = 4;

/// Snapshot of current and historical game state.
///
/// Numeric fields are unsigned, so "never negative" holds by construction.
/// List caps are enforced by the context builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonMasterContext {
    pub total_runs: u64,
    pub best_floor: u64,
    pub favorite_runes: Vec<String>,
    pub recent_death_causes: Vec<String>,
    pub current_floor: u64,
    #[serde(rename = "currentHP")]
    pub current_hp: u64,
    pub current_gold: u64,
    pub equipped_runes: Vec<String>,
    pub recent_actions: Vec<String>,
    pub tiles_revealed: u64,
    pub monsters_remaining: u64,
    pub near_death_moments: u64,
    pub request_type: RequestType,
}

impl DungeonMasterContext {
    /// Compact JSON form, as embedded in prompts
    pub fn to_json(&self) -> String {
        // Plain strings, integers and a unit enum cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// True when every list the builder is allowed to shrink is empty
    pub fn truncatable_lists_empty(&self) -> bool {
        self.recent_actions.is_empty()
            && self.recent_death_causes.is_empty()
            && self.favorite_runes.is_empty()
            && self.equipped_runes.is_empty()
    }
}

/// Estimated token count of a context snapshot.
///
/// Length is measured in UTF-16 code units, so characters outside the Basic
/// Multilingual Plane (emoji) count twice.
pub fn estimate_context_tokens(context: &DungeonMasterContext) -> usize {
    context
        .to_json()
        .encode_utf16()
        .count()
        .div_ceil(CHARS_PER_TOKEN)
}
