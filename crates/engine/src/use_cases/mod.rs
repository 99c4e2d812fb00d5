//! Use cases - User story orchestration.
//!
//! The engine has a single story: the Dungeon Master reacting to a moment in
//! a run. Everything it needs from the outside comes in through ports.

pub mod dungeon_master;

pub use dungeon_master::{
    assemble_context, build_context, parse_response, ContextBuildResult, ContextInput,
    DungeonMaster, FallbackCatalog, GenerationOptions, GenerationResult, GenerationSettings,
    GenerationSource, ProviderSlot, RawResponse, ResponseParseError,
};
