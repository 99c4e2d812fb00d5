//! External service port traits (text-generation providers, host game state).

use async_trait::async_trait;
use runesweeper_domain::{AggregateStats, CurrentGame, ProviderId, RunRecord};

use super::error::{GameStateError, ProviderError};

// =============================================================================
// Provider Invocation
// =============================================================================

/// One request to a text-generation provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderInvocation {
    pub provider_id: ProviderId,
    pub system_prompt: String,
    pub user_prompt: String,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Upper bound the transport should honor; the orchestrator enforces it too
    pub timeout_ms: u64,
}

/// The single capability the orchestrator needs from a provider: turn a
/// prompt pair into raw text. Implementations must not retry internally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderPort: Send + Sync {
    async fn invoke(&self, invocation: ProviderInvocation) -> Result<String, ProviderError>;
}

// =============================================================================
// Host Game State
// =============================================================================

/// Read access to whatever state store the host application uses.
///
/// The context builder itself never touches this; `assemble_context` reads a
/// source once and hands plain values to the pure builder.
#[cfg_attr(test, mockall::automock)]
pub trait GameStateSource: Send + Sync {
    fn current_game(&self) -> Result<CurrentGame, GameStateError>;
    fn aggregate_stats(&self) -> Result<AggregateStats, GameStateError>;
    /// Finished runs ordered oldest to newest
    fn run_history(&self) -> Result<Vec<RunRecord>, GameStateError>;
    /// Free-text action log, oldest first
    fn action_log(&self) -> Result<Vec<String>, GameStateError>;
}
