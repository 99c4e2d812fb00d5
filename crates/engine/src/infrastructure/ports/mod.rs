//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Text-generation providers (Gemini, Groq, or a scripted stand-in)
//! - Host game state (whatever store the game client uses)
//! - Clock/Random (for testing)

mod error;
mod external;
mod testing;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{GameStateSource, ProviderInvocation, ProviderPort};

#[cfg(test)]
pub use external::{MockGameStateSource, MockProviderPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{GameStateError, ProviderError};
