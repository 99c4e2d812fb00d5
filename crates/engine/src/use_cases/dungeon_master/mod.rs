//! Dungeon Master use case.
//!
//! Builds bounded context snapshots, walks the provider fallback chain and
//! validates whatever comes back. `DungeonMaster::generate` never fails: every
//! outcome is a `GenerationResult`, with canned dialogue when the cooldown gate
//! is closed or no provider produced a valid response.

mod assemble;
mod context_builder;
mod fallback;
mod prompts;
mod response_parser;

pub use assemble::assemble_context;
pub use context_builder::{build_context, ContextBuildResult, ContextInput, DEFAULT_TOKEN_BUDGET};
pub use fallback::FallbackCatalog;
pub use prompts::{system_prompt, user_prompt};
pub use response_parser::{parse_response, RawResponse, ResponseParseError};

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, Serializer};
use tokio::sync::RwLock;
use tracing::Instrument;

use runesweeper_domain::{CooldownState, DmResponse, DungeonMasterContext, ProviderId};

use crate::infrastructure::correlation::CorrelationId;
use crate::infrastructure::ports::{
    ClockPort, ProviderError, ProviderInvocation, ProviderPort, RandomPort,
};
use crate::infrastructure::settings::{
    DungeonMasterConfig, DEFAULT_COOLDOWN_MS, DEFAULT_PROVIDER_TIMEOUT_MS, DEFAULT_TEMPERATURE,
};

/// Error recorded for a provider with no backing client
pub const PROVIDER_NOT_CONFIGURED: &str = "provider_not_configured";

// =============================================================================
// Request / Result Types
// =============================================================================

/// Per-call overrides for prompts and sampling temperature
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub system_prompt: Option<String>,
    pub user_prompt: Option<String>,
    pub temperature: Option<f32>,
}

/// Where a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationSource {
    Provider(ProviderId),
    Fallback,
}

impl GenerationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationSource::Provider(id) => id.as_str(),
            GenerationSource::Fallback => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationSource::Fallback)
    }
}

impl std::fmt::Display for GenerationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for GenerationSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of one `generate` call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub response: DmResponse,
    pub source: GenerationSource,
    /// One entry per provider attempted (or skipped as unconfigured)
    pub provider_errors: BTreeMap<ProviderId, String>,
    pub cooldown_active: bool,
}

// =============================================================================
// Provider Chain
// =============================================================================

/// One position in the fallback chain.
///
/// An unconfigured slot (`port: None`) stays in the chain: it is never
/// invoked, records `provider_not_configured`, and counts toward exhaustion.
#[derive(Clone)]
pub struct ProviderSlot {
    pub id: ProviderId,
    pub port: Option<Arc<dyn ProviderPort>>,
}

impl ProviderSlot {
    pub fn configured(id: ProviderId, port: Arc<dyn ProviderPort>) -> Self {
        Self { id, port: Some(port) }
    }

    pub fn unconfigured(id: ProviderId) -> Self {
        Self { id, port: None }
    }

    pub fn is_configured(&self) -> bool {
        self.port.is_some()
    }
}

impl std::fmt::Debug for ProviderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSlot")
            .field("id", &self.id)
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Timing and sampling knobs for the orchestrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub provider_timeout_ms: u64,
    pub cooldown_ms: u64,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider_timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl From<&DungeonMasterConfig> for GenerationSettings {
    fn from(config: &DungeonMasterConfig) -> Self {
        Self {
            provider_timeout_ms: config.provider_timeout_ms,
            cooldown_ms: config.cooldown_ms,
            temperature: config.temperature,
        }
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Generation orchestrator.
///
/// Owns the cooldown gate; it is only written after a provider response
/// passed validation. Providers are awaited one at a time in priority order.
pub struct DungeonMaster {
    slots: Vec<ProviderSlot>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    catalog: FallbackCatalog,
    settings: GenerationSettings,
    cooldown: RwLock<CooldownState>,
}

impl DungeonMaster {
    pub fn new(
        mut slots: Vec<ProviderSlot>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        settings: GenerationSettings,
    ) -> Self {
        // Priority follows `ProviderId` ordering regardless of input order
        slots.sort_by_key(|slot| slot.id);
        Self {
            slots,
            clock,
            random,
            catalog: FallbackCatalog::new(),
            settings,
            cooldown: RwLock::new(CooldownState::new(settings.cooldown_ms)),
        }
    }

    pub fn with_catalog(mut self, catalog: FallbackCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn settings(&self) -> GenerationSettings {
        self.settings
    }

    /// Ids of slots that have a backing client, in priority order
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        self.slots
            .iter()
            .filter(|slot| slot.is_configured())
            .map(|slot| slot.id)
            .collect()
    }

    pub async fn cooldown_state(&self) -> CooldownState {
        *self.cooldown.read().await
    }

    /// Milliseconds until the next provider call is allowed
    pub async fn cooldown_remaining(&self) -> u64 {
        let now = self.clock.now();
        self.cooldown.read().await.remaining(now)
    }

    /// Produce Dungeon Master dialogue for a context snapshot.
    pub async fn generate(
        &self,
        context: &DungeonMasterContext,
        options: GenerationOptions,
    ) -> GenerationResult {
        let correlation_id = CorrelationId::new();
        let span = tracing::info_span!(
            "dm_generate",
            correlation_id = %correlation_id.short(),
            request_type = %context.request_type,
        );
        self.run_chain(context, options).instrument(span).await
    }

    async fn run_chain(
        &self,
        context: &DungeonMasterContext,
        options: GenerationOptions,
    ) -> GenerationResult {
        let now = self.clock.now();
        let request_type = context.request_type;

        let gate = *self.cooldown.read().await;
        if !gate.can_call(now) {
            tracing::info!(
                remaining_ms = gate.remaining(now),
                "Cooldown active, serving fallback dialogue"
            );
            return self.fallback(context, BTreeMap::new(), true);
        }

        let system = options.system_prompt.unwrap_or_else(system_prompt);
        let user = options.user_prompt.unwrap_or_else(|| user_prompt(context));
        let temperature = options.temperature.unwrap_or(self.settings.temperature);

        let mut provider_errors = BTreeMap::new();

        for slot in &self.slots {
            let Some(port) = &slot.port else {
                tracing::debug!(provider = %slot.id, "Provider not configured, skipping");
                provider_errors.insert(slot.id, PROVIDER_NOT_CONFIGURED.to_string());
                continue;
            };

            let invocation = ProviderInvocation {
                provider_id: slot.id,
                system_prompt: system.clone(),
                user_prompt: user.clone(),
                temperature,
                timeout_ms: self.settings.provider_timeout_ms,
            };

            let raw = match self.invoke_with_timeout(port.as_ref(), invocation).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(provider = %slot.id, error = %e, "Provider call failed");
                    provider_errors.insert(slot.id, e.to_string());
                    continue;
                }
            };

            match parse_response(raw) {
                Ok(response) => {
                    {
                        let mut cooldown = self.cooldown.write().await;
                        *cooldown = cooldown.record_success(now);
                    }
                    tracing::info!(
                        provider = %slot.id,
                        failed_providers = provider_errors.len(),
                        "Dungeon Master response generated"
                    );
                    return GenerationResult {
                        response,
                        source: GenerationSource::Provider(slot.id),
                        provider_errors,
                        cooldown_active: false,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        provider = %slot.id,
                        error = %e,
                        "Provider returned an invalid response"
                    );
                    provider_errors.insert(slot.id, format!("parse_error: {}", e));
                }
            }
        }

        tracing::warn!(
            providers = self.slots.len(),
            "All providers failed, serving fallback dialogue"
        );
        self.fallback(context, provider_errors, false)
    }

    async fn invoke_with_timeout(
        &self,
        port: &dyn ProviderPort,
        invocation: ProviderInvocation,
    ) -> Result<String, ProviderError> {
        let timeout_ms = self.settings.provider_timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), port.invoke(invocation)).await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(timeout_ms)),
        }
    }

    fn fallback(
        &self,
        context: &DungeonMasterContext,
        provider_errors: BTreeMap<ProviderId, String>,
        cooldown_active: bool,
    ) -> GenerationResult {
        let response = self
            .catalog
            .select(context.request_type, || self.random.next_f64());
        GenerationResult {
            response,
            source: GenerationSource::Fallback,
            provider_errors,
            cooldown_active,
        }
    }
}
