//! # Runesweeper Domain
//!
//! Vocabulary and value objects for the Dungeon Master: request types, moods,
//! hint kinds, the bounded context snapshot sent to text-generation providers,
//! historical run records, the normalized response shape and the cooldown gate.
//!
//! Everything here is pure data. No I/O, no async, no ambient clock or RNG.

pub mod error;
pub mod types;
pub mod value_objects;

pub use error::DomainError;

pub use types::{DmMood, HintType, ProviderId, RequestType};

pub use value_objects::{
    estimate_context_tokens, AggregateStats, CooldownState, CurrentGame, DmResponse,
    DungeonMasterContext, GridCell, GridConfig, PlayerStats, RunCounters, RunRecord, RunResult,
    CHARS_PER_TOKEN, MAX_FAVORITE_RUNES, MAX_RECENT_ACTIONS, MAX_RECENT_DEATH_CAUSES,
};
