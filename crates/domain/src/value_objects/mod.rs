//! Value objects - Immutable objects defined by their attributes

mod cooldown;
mod dm_context;
mod dm_response;
mod game_state;
mod run_record;

pub use cooldown::CooldownState;

// Context snapshot and its size estimate
pub use dm_context::{
    estimate_context_tokens, DungeonMasterContext, CHARS_PER_TOKEN, MAX_FAVORITE_RUNES,
    MAX_RECENT_ACTIONS, MAX_RECENT_DEATH_CAUSES,
};

pub use dm_response::{DmResponse, MAX_DIFFICULTY_ADJUSTMENT, MIN_DIFFICULTY_ADJUSTMENT};

// Inputs owned by external collaborators
pub use game_state::{AggregateStats, CurrentGame, GridCell, GridConfig, PlayerStats, RunCounters};
pub use run_record::{RunRecord, RunResult};
