//! Error types for port operations.

/// Failure of a single provider invocation.
///
/// Every variant is recoverable from the orchestrator's point of view: the
/// display string is recorded in `provider_errors` and the chain moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Network failure or non-success HTTP status
    #[error("request failed: {0}")]
    RequestFailed(String),
    /// The provider answered but the body could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The call did not complete within the configured timeout
    #[error("timed out after {0}ms")]
    Timeout(u64),
}

impl ProviderError {
    pub fn request_failed(message: impl ToString) -> Self {
        Self::RequestFailed(message.to_string())
    }

    pub fn invalid_response(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }
}

/// Failure reading host game state.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GameStateError {
    #[error("game state unavailable: {0}")]
    Unavailable(String),
}
