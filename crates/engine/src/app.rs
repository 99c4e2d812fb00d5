//! Application state and composition.

use std::sync::Arc;

use runesweeper_domain::ProviderId;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    gemini::GeminiClient,
    groq::GroqClient,
    ports::{ClockPort, ProviderPort, RandomPort},
    settings::{DungeonMasterConfig, ProviderSettings},
};
use crate::use_cases::dungeon_master::{DungeonMaster, GenerationSettings, ProviderSlot};

/// Main application state.
///
/// Holds the resolved configuration and the Dungeon Master built from it.
pub struct App {
    pub config: DungeonMasterConfig,
    pub dungeon_master: DungeonMaster,
}

impl App {
    /// Compose the application with real clients, clock and randomness.
    pub fn new(config: DungeonMasterConfig) -> Self {
        let slots = provider_slots(&config);
        Self::with_slots(
            config,
            slots,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
        )
    }

    /// Compose with explicit provider slots and testability ports.
    pub fn with_slots(
        config: DungeonMasterConfig,
        slots: Vec<ProviderSlot>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let dungeon_master =
            DungeonMaster::new(slots, clock, random, GenerationSettings::from(&config));
        Self {
            config,
            dungeon_master,
        }
    }
}

/// One slot per known provider; a client is only attached when credentials exist.
pub fn provider_slots(config: &DungeonMasterConfig) -> Vec<ProviderSlot> {
    config
        .providers()
        .into_iter()
        .map(|settings| match build_client(settings) {
            Some(port) => {
                tracing::info!(
                    provider = %settings.id,
                    model = %settings.model,
                    "Provider configured"
                );
                ProviderSlot::configured(settings.id, port)
            }
            None => {
                tracing::info!(provider = %settings.id, "Provider has no API key, leaving unconfigured");
                ProviderSlot::unconfigured(settings.id)
            }
        })
        .collect()
}

fn build_client(settings: &ProviderSettings) -> Option<Arc<dyn ProviderPort>> {
    let api_key = settings.api_key.as_deref()?;
    let port: Arc<dyn ProviderPort> = match settings.id {
        ProviderId::Gemini => Arc::new(GeminiClient::new(api_key, &settings.model)),
        ProviderId::Groq => Arc::new(GroqClient::new(api_key, &settings.model)),
    };
    Some(port)
}
