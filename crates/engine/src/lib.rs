//! Runesweeper Engine library.
//!
//! Dungeon Master commentary for Runesweeper: bounded context snapshots,
//! a prioritized provider fallback chain with a cooldown gate, and strict
//! validation of provider output.
//!
//! ## Structure
//!
//! - `use_cases/` - Context building, prompt formatting, orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use infrastructure::settings::DungeonMasterConfig;
pub use use_cases::dungeon_master::{
    assemble_context, build_context, parse_response, DungeonMaster, GenerationOptions,
    GenerationResult, GenerationSource,
};
