//! End-to-end flow: host state -> snapshot -> provider chain -> result JSON.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use runesweeper_domain::{
    AggregateStats, CurrentGame, PlayerStats, ProviderId, RequestType, RunCounters, RunRecord,
};
use runesweeper_engine::app::App;
use runesweeper_engine::infrastructure::game_state::InMemoryGameState;
use runesweeper_engine::infrastructure::ports::{
    ClockPort, ProviderError, ProviderInvocation, ProviderPort, RandomPort,
};
use runesweeper_engine::use_cases::dungeon_master::{
    assemble_context, GenerationOptions, GenerationSource, ProviderSlot,
};
use runesweeper_engine::DungeonMasterConfig;

/// Replays canned outcomes in order and remembers what it was asked
struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    seen: Mutex<Vec<ProviderInvocation>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    fn last_user_prompt(&self) -> Option<String> {
        self.seen
            .lock()
            .unwrap()
            .last()
            .map(|inv| inv.user_prompt.clone())
    }
}

#[async_trait]
impl ProviderPort for ScriptedProvider {
    async fn invoke(&self, invocation: ProviderInvocation) -> Result<String, ProviderError> {
        self.seen.lock().unwrap().push(invocation);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::request_failed("script exhausted")))
    }
}

struct ManualClock(AtomicI64);

impl ManualClock {
    fn set(&self, millis: i64) {
        self.0.store(millis, Ordering::SeqCst);
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.0.load(Ordering::SeqCst))
            .unwrap()
    }
}

struct ZeroRandom;

impl RandomPort for ZeroRandom {
    fn next_f64(&self) -> f64 {
        0.0
    }
}

fn populated_state() -> InMemoryGameState {
    let ended = Utc.with_ymd_and_hms(2025, 4, 2, 21, 30, 0).unwrap();
    let state = InMemoryGameState::new();
    state
        .push_run(RunRecord::death(3, "mimic", ended).with_runes(["lucky-coin", "hardy"]))
        .unwrap();
    state
        .push_run(RunRecord::victory(8, ended).with_runes(["lucky-coin"]))
        .unwrap();
    state
        .set_aggregate_stats(AggregateStats {
            total_runs: 2,
            highest_level: 8,
        })
        .unwrap();
    state
        .set_current_game(CurrentGame {
            player: PlayerStats {
                hp: 2,
                gold: 55,
                equipped_runes: vec!["lucky-coin".into()],
            },
            counters: RunCounters {
                current_floor: 4,
                tiles_revealed: 31,
                near_death_moments: 1,
            },
            ..CurrentGame::default()
        })
        .unwrap();
    state.push_action("revealed (4,4)").unwrap();
    state
}

#[tokio::test]
async fn host_state_flows_through_chain_and_cooldown() {
    let gemini = ScriptedProvider::new(vec![
        Err(ProviderError::request_failed("503 Service Unavailable")),
        Ok(r#"{"dialogue":"Still alive? Barely.","mood":"amused"}"#.to_string()),
    ]);
    let groq = ScriptedProvider::new(vec![Ok(
        r#"{"dialogue":"Two HP. Bold.","mood":"menacing","difficultyAdjustment":-0.5,"hintType":"warning","hintContent":"Heal before the stairs."}"#
            .to_string(),
    )]);
    let clock = Arc::new(ManualClock(AtomicI64::new(1_000)));

    let app = App::with_slots(
        DungeonMasterConfig::from_vars(&HashMap::new()),
        vec![
            ProviderSlot::configured(ProviderId::Gemini, gemini.clone()),
            ProviderSlot::configured(ProviderId::Groq, groq.clone()),
        ],
        clock.clone(),
        Arc::new(ZeroRandom),
    );

    let built = assemble_context(&populated_state(), RequestType::LowHealth, 2000).unwrap();
    assert_eq!(built.context.favorite_runes, vec!["lucky-coin", "hardy"]);
    assert_eq!(built.context.best_floor, 8);
    assert!(!built.truncated);

    // Primary fails, secondary answers
    let first = app
        .dungeon_master
        .generate(&built.context, GenerationOptions::default())
        .await;
    assert_eq!(first.source, GenerationSource::Provider(ProviderId::Groq));
    assert_eq!(first.response.difficulty_adjustment(), Some(-0.5));
    assert!(gemini
        .last_user_prompt()
        .unwrap()
        .contains("\"currentHP\":2"));

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["source"], "groq");
    assert_eq!(
        json["providerErrors"]["gemini"],
        "request failed: 503 Service Unavailable"
    );
    assert_eq!(json["response"]["hintType"], "warning");

    // Inside the cooldown window nobody is called
    clock.set(2_000);
    let second = app
        .dungeon_master
        .generate(&built.context, GenerationOptions::default())
        .await;
    assert_eq!(second.source, GenerationSource::Fallback);
    assert!(second.cooldown_active);
    assert_eq!(gemini.calls(), 1);
    assert_eq!(groq.calls(), 1);

    // Window elapsed, primary is back in business
    clock.set(31_000);
    let third = app
        .dungeon_master
        .generate(&built.context, GenerationOptions::default())
        .await;
    assert_eq!(third.source, GenerationSource::Provider(ProviderId::Gemini));
    assert!(third.provider_errors.is_empty());
    assert_eq!(gemini.calls(), 2);
    assert_eq!(groq.calls(), 1);
}

#[tokio::test]
async fn unconfigured_app_always_falls_back() {
    let app = App::new(DungeonMasterConfig::from_vars(&HashMap::new()));
    let built = assemble_context(&populated_state(), RequestType::Death, 2000).unwrap();

    let result = app
        .dungeon_master
        .generate(&built.context, GenerationOptions::default())
        .await;

    assert_eq!(result.source, GenerationSource::Fallback);
    assert!(!result.cooldown_active);
    assert_eq!(result.provider_errors.len(), 2);
    assert!(result
        .provider_errors
        .values()
        .all(|e| e == "provider_not_configured"));
    assert!(!result.response.dialogue().is_empty());
}
