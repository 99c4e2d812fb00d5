//! Dungeon Master configuration.
//!
//! Resolution is a pure function of a key/value map (`from_vars`) so it can be
//! tested without touching the process environment. `from_env` is the thin
//! wrapper used by the binary: it loads `.env` (if any) and snapshots
//! `std::env::vars()`.
//!
//! A provider without credentials is not an error; it simply ends up
//! unconfigured and the orchestrator records `provider_not_configured` for it.

use std::collections::HashMap;

use runesweeper_domain::ProviderId;

use crate::use_cases::dungeon_master::DEFAULT_TOKEN_BUDGET;

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default Groq model.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_COOLDOWN_MS: u64 = 30_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Credentials and model for one provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub id: ProviderId,
    /// `None` when no usable key was supplied
    pub api_key: Option<String>,
    pub model: String,
}

impl ProviderSettings {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DungeonMasterConfig {
    pub gemini: ProviderSettings,
    pub groq: ProviderSettings,
    pub provider_timeout_ms: u64,
    pub cooldown_ms: u64,
    pub temperature: f32,
    pub token_budget: usize,
}

impl Default for DungeonMasterConfig {
    fn default() -> Self {
        Self::from_vars(&HashMap::new())
    }
}

impl DungeonMasterConfig {
    /// Resolve configuration from an explicit key/value map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let gemini = ProviderSettings {
            id: ProviderId::Gemini,
            api_key: non_blank(vars, "GEMINI_API_KEY").or_else(|| non_blank(vars, "GOOGLE_API_KEY")),
            model: non_blank(vars, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
        };
        let groq = ProviderSettings {
            id: ProviderId::Groq,
            api_key: non_blank(vars, "GROQ_API_KEY"),
            model: non_blank(vars, "GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.into()),
        };

        Self {
            gemini,
            groq,
            provider_timeout_ms: parse_or(vars, "DM_PROVIDER_TIMEOUT_MS", DEFAULT_PROVIDER_TIMEOUT_MS),
            cooldown_ms: parse_or(vars, "DM_COOLDOWN_MS", DEFAULT_COOLDOWN_MS),
            temperature: parse_or(vars, "DM_TEMPERATURE", DEFAULT_TEMPERATURE),
            token_budget: parse_or(vars, "DM_TOKEN_BUDGET", DEFAULT_TOKEN_BUDGET),
        }
    }

    /// Resolve configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Provider settings in chain priority order
    pub fn providers(&self) -> [&ProviderSettings; 2] {
        [&self.gemini, &self.groq]
    }
}

fn non_blank(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_or<T>(vars: &HashMap<String, String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match non_blank(vars, key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(
                key = key,
                value = %raw,
                default = %default,
                "Invalid configuration value, using default"
            );
            default
        }),
    }
}
