//! Reads a `GameStateSource` once and feeds the pure context builder.

use runesweeper_domain::RequestType;

use super::context_builder::{build_context, ContextBuildResult, ContextInput};
use crate::infrastructure::ports::{GameStateError, GameStateSource};

/// Snapshot the host's game state for one request.
pub fn assemble_context(
    source: &dyn GameStateSource,
    request_type: RequestType,
    token_budget: usize,
) -> Result<ContextBuildResult, GameStateError> {
    let input = ContextInput {
        game: source.current_game()?,
        stats: source.aggregate_stats()?,
        history: source.run_history()?,
        action_log: source.action_log()?,
        request_type,
    };

    Ok(build_context(&input, token_budget))
}
