//! Infrastructure layer - external dependency implementations.
//!
//! Contains:
//! - `ports` - Trait definitions for external dependencies
//! - Provider clients (Gemini, Groq)
//! - Clock/random, configuration and an in-memory game state store

pub mod clock;
pub mod correlation;
pub mod game_state;
pub mod gemini;
pub mod groq;
pub mod ports;
pub mod settings;
