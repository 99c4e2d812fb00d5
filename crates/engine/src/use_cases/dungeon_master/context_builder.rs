//! Context builder - bounded snapshot of live and historical game state.
//!
//! Pure: the same input always yields the same snapshot. Size is kept under a
//! token budget by shrinking list fields in a fixed priority order:
//!
//! 1. `recent_actions` (oldest dropped first)
//! 2. `recent_death_causes`
//! 3. `favorite_runes`
//! 4. `equipped_runes`
//!
//! The last three drop from the end. Shrinking stops as soon as the estimate
//! fits or every list is empty; scalar fields are never touched.
//!
//! Rune ids, death causes and actions are trimmed before use and blank
//! entries are skipped, so `"hardy"` and `" hardy"` count as the same rune.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use runesweeper_domain::{
    estimate_context_tokens, AggregateStats, CurrentGame, DungeonMasterContext, RequestType,
    RunRecord, MAX_FAVORITE_RUNES, MAX_RECENT_ACTIONS, MAX_RECENT_DEATH_CAUSES,
};

/// Default token budget for a context snapshot
pub const DEFAULT_TOKEN_BUDGET: usize = 2000;

/// Raw state slices the snapshot is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInput {
    #[serde(default)]
    pub game: CurrentGame,
    #[serde(default)]
    pub stats: AggregateStats,
    /// Finished runs, oldest first
    #[serde(default)]
    pub history: Vec<RunRecord>,
    /// Free-text action log, oldest first
    #[serde(default)]
    pub action_log: Vec<String>,
    #[serde(default)]
    pub request_type: RequestType,
}

impl ContextInput {
    pub fn new(request_type: RequestType) -> Self {
        Self {
            game: CurrentGame::default(),
            stats: AggregateStats::default(),
            history: Vec::new(),
            action_log: Vec::new(),
            request_type,
        }
    }
}

/// Snapshot plus sizing metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBuildResult {
    pub context: DungeonMasterContext,
    /// Estimate of the final (possibly truncated) snapshot
    pub estimated_tokens: usize,
    /// Whether any list was shrunk to fit the budget
    pub truncated: bool,
}

/// Build a bounded context snapshot.
pub fn build_context(input: &ContextInput, token_budget: usize) -> ContextBuildResult {
    let game = &input.game;

    let mut context = DungeonMasterContext {
        total_runs: non_negative(input.stats.total_runs),
        best_floor: best_floor(&input.stats, &input.history),
        favorite_runes: favorite_runes(&input.history),
        recent_death_causes: recent_death_causes(&input.history),
        current_floor: non_negative(game.counters.current_floor),
        current_hp: non_negative(game.player.hp),
        current_gold: non_negative(game.player.gold),
        equipped_runes: game.player.equipped_runes.clone(),
        recent_actions: recent_actions(&input.action_log),
        tiles_revealed: non_negative(game.counters.tiles_revealed),
        monsters_remaining: game.monsters_remaining(),
        near_death_moments: non_negative(game.counters.near_death_moments),
        request_type: input.request_type,
    };

    let mut estimated_tokens = estimate_context_tokens(&context);
    let mut truncated = false;

    while estimated_tokens > token_budget && shrink_once(&mut context) {
        truncated = true;
        estimated_tokens = estimate_context_tokens(&context);
    }

    if truncated {
        tracing::debug!(
            estimated_tokens,
            token_budget,
            recent_actions = context.recent_actions.len(),
            recent_death_causes = context.recent_death_causes.len(),
            favorite_runes = context.favorite_runes.len(),
            equipped_runes = context.equipped_runes.len(),
            "Context snapshot truncated to fit token budget"
        );
    }

    ContextBuildResult {
        context,
        estimated_tokens,
        truncated,
    }
}

/// Remove one element from the highest-priority non-empty list.
/// Returns false when there was nothing left to remove.
fn shrink_once(context: &mut DungeonMasterContext) -> bool {
    if !context.recent_actions.is_empty() {
        context.recent_actions.remove(0);
        return true;
    }
    for list in [
        &mut context.recent_death_causes,
        &mut context.favorite_runes,
        &mut context.equipped_runes,
    ] {
        if list.pop().is_some() {
            return true;
        }
    }
    false
}

fn non_negative(value: i64) -> u64 {
    value.max(0) as u64
}

fn best_floor(stats: &AggregateStats, history: &[RunRecord]) -> u64 {
    let from_history = history.iter().map(|r| r.level).max().unwrap_or(0);
    non_negative(stats.highest_level.max(from_history))
}

/// Most-equipped runes across history: count desc, then id asc, top 5.
/// Ids are counted trimmed; blank ids are ignored.
fn favorite_runes(history: &[RunRecord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for rune in history
        .iter()
        .flat_map(|r| r.equipped_runes.iter())
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
    {
        *counts.entry(rune).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(a_id, a_count), (b_id, b_count)| {
        b_count.cmp(a_count).then_with(|| a_id.cmp(b_id))
    });

    ranked
        .into_iter()
        .take(MAX_FAVORITE_RUNES)
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Death causes, newest first.
fn recent_death_causes(history: &[RunRecord]) -> Vec<String> {
    history
        .iter()
        .rev()
        .filter_map(RunRecord::trimmed_death_cause)
        .take(MAX_RECENT_DEATH_CAUSES)
        .map(str::to_string)
        .collect()
}

/// Last non-blank actions, in original order.
fn recent_actions(log: &[String]) -> Vec<String> {
    let cleaned: Vec<&str> = log
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    let skip = cleaned.len().saturating_sub(MAX_RECENT_ACTIONS);
    cleaned[skip..].iter().map(|a| a.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use runesweeper_domain::{GridCell, GridConfig, PlayerStats, RunCounters};

    fn ended(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, day, 18, 0, 0).unwrap()
    }

    fn input_with_history(history: Vec<RunRecord>) -> ContextInput {
        ContextInput {
            history,
            ..ContextInput::new(RequestType::FloorStart)
        }
    }

    #[test]
    fn favorite_runes_ranked_by_count_then_alphabetically() {
        let history = vec![
            RunRecord::death(2, "slime", ended(1)).with_runes(["lucky-coin", "hardy"]),
            RunRecord::victory(9, ended(2)).with_runes(["lucky-coin", "bargain-hunter"]),
            RunRecord::death(4, "mimic", ended(3)).with_runes(["bargain-hunter"]),
        ];

        let result = build_context(&input_with_history(history), DEFAULT_TOKEN_BUDGET);

        assert_eq!(
            result.context.favorite_runes,
            vec!["bargain-hunter", "lucky-coin", "hardy"]
        );
    }

    #[test]
    fn favorite_runes_ignore_history_order() {
        let a = RunRecord::death(2, "slime", ended(1)).with_runes(["ember", "hardy", "zephyr"]);
        let b = RunRecord::victory(9, ended(2)).with_runes(["ember", "aegis"]);
        let c = RunRecord::death(4, "mimic", ended(3)).with_runes(["aegis", "zephyr", "ember"]);

        let forward = build_context(
            &input_with_history(vec![a.clone(), b.clone(), c.clone()]),
            DEFAULT_TOKEN_BUDGET,
        );
        let shuffled = build_context(&input_with_history(vec![c, a, b]), DEFAULT_TOKEN_BUDGET);

        assert_eq!(
            forward.context.favorite_runes,
            shuffled.context.favorite_runes
        );
        assert_eq!(
            forward.context.favorite_runes,
            vec!["ember", "aegis", "zephyr", "hardy"]
        );
    }

    #[test]
    fn favorite_runes_count_trimmed_ids_and_skip_blank() {
        let history = vec![
            RunRecord::death(1, "bat", ended(1)).with_runes(["hardy", "  ", "ember"]),
            RunRecord::death(2, "bat", ended(2)).with_runes([" hardy ", ""]),
        ];

        let result = build_context(&input_with_history(history), DEFAULT_TOKEN_BUDGET);

        assert_eq!(result.context.favorite_runes, vec!["hardy", "ember"]);
    }

    #[test]
    fn favorite_runes_capped_at_five() {
        let runes = ["a", "b", "c", "d", "e", "f", "g"];
        let history = vec![RunRecord::victory(1, ended(1)).with_runes(runes)];

        let result = build_context(&input_with_history(history), DEFAULT_TOKEN_BUDGET);

        assert_eq!(result.context.favorite_runes, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn recent_death_causes_newest_first_deaths_only() {
        let mut victory = RunRecord::victory(10, ended(1));
        victory.death_cause = Some("should be ignored".into());
        let history = vec![
            RunRecord::death(1, "first", ended(2)),
            victory,
            RunRecord::death(2, "  ", ended(3)),
            RunRecord::death(3, " second ", ended(4)),
            RunRecord::death(4, "third", ended(5)),
            RunRecord::death(5, "fourth", ended(6)),
            RunRecord::death(6, "fifth", ended(7)),
            RunRecord::death(7, "sixth", ended(8)),
        ];

        let result = build_context(&input_with_history(history), DEFAULT_TOKEN_BUDGET);

        assert_eq!(
            result.context.recent_death_causes,
            vec!["sixth", "fifth", "fourth", "third", "second"]
        );
    }

    #[test]
    fn recent_actions_keep_last_ten_in_order() {
        let mut input = ContextInput::new(RequestType::IdleTaunt);
        input.action_log = (1..=14).map(|i| format!("action {}", i)).collect();

        let result = build_context(&input, DEFAULT_TOKEN_BUDGET);
        let actions = &result.context.recent_actions;

        assert_eq!(actions.len(), 10);
        assert_eq!(actions.first().unwrap(), "action 5");
        assert_eq!(actions.last().unwrap(), "action 14");
    }

    #[test]
    fn recent_actions_trimmed_and_blank_dropped() {
        let mut input = ContextInput::new(RequestType::IdleTaunt);
        input.action_log = vec!["  flagged (0,1) ".into(), "".into(), "   ".into(), "moved".into()];

        let result = build_context(&input, DEFAULT_TOKEN_BUDGET);

        assert_eq!(result.context.recent_actions, vec!["flagged (0,1)", "moved"]);
    }

    #[test]
    fn best_floor_uses_max_of_stats_and_history() {
        let mut input = input_with_history(vec![
            RunRecord::death(6, "bat", ended(1)),
            RunRecord::death(3, "bat", ended(2)),
        ]);
        input.stats.highest_level = 4;
        assert_eq!(build_context(&input, DEFAULT_TOKEN_BUDGET).context.best_floor, 6);

        input.stats.highest_level = 11;
        assert_eq!(build_context(&input, DEFAULT_TOKEN_BUDGET).context.best_floor, 11);
    }

    #[test]
    fn counters_are_clamped_to_zero() {
        let mut input = ContextInput::new(RequestType::LowHealth);
        input.stats.total_runs = -1;
        input.game = CurrentGame {
            grid: None,
            grid_config: GridConfig {
                mine_count: -4,
                ..Default::default()
            },
            player: PlayerStats {
                hp: -3,
                gold: -10,
                equipped_runes: vec![],
            },
            counters: RunCounters {
                current_floor: -1,
                tiles_revealed: -2,
                near_death_moments: -5,
            },
        };

        let context = build_context(&input, DEFAULT_TOKEN_BUDGET).context;

        assert_eq!(context.total_runs, 0);
        assert_eq!(context.current_hp, 0);
        assert_eq!(context.current_gold, 0);
        assert_eq!(context.current_floor, 0);
        assert_eq!(context.tiles_revealed, 0);
        assert_eq!(context.near_death_moments, 0);
        assert_eq!(context.monsters_remaining, 0);
    }

    #[test]
    fn monsters_remaining_prefers_grid_over_config() {
        let mut input = ContextInput::new(RequestType::FloorStart);
        input.game.grid = Some(vec![vec![
            GridCell::mine(),
            GridCell::mine().revealed(),
            GridCell::empty(),
        ]]);
        input.game.grid_config.mine_count = 10;

        assert_eq!(
            build_context(&input, DEFAULT_TOKEN_BUDGET)
                .context
                .monsters_remaining,
            1
        );
    }

    #[test]
    fn small_context_is_not_truncated() {
        let result = build_context(&ContextInput::new(RequestType::Victory), DEFAULT_TOKEN_BUDGET);

        assert!(!result.truncated);
        assert_eq!(
            result.estimated_tokens,
            estimate_context_tokens(&result.context)
        );
    }

    fn bulky_input() -> ContextInput {
        let mut input = ContextInput::new(RequestType::Death);
        input.action_log = (0..10)
            .map(|i| format!("action {} {}", i, "x".repeat(60)))
            .collect();
        input.history = (0..5)
            .map(|i| {
                RunRecord::death(i, format!("cause {} {}", i, "y".repeat(40)), ended(1))
                    .with_runes([format!("rune-{}-{}", i, "z".repeat(20))])
            })
            .collect();
        input.game.player.equipped_runes = (0..4).map(|i| format!("equipped-{}", i)).collect();
        input
    }

    #[test]
    fn truncation_drops_oldest_actions_first() {
        let input = bulky_input();
        let full = build_context(&input, usize::MAX);
        // Room for everything except roughly one action
        let budget = full.estimated_tokens - 5;

        let result = build_context(&input, budget);

        assert!(result.truncated);
        assert!(result.estimated_tokens <= budget);
        assert_eq!(result.context.recent_actions.len(), 9);
        assert!(result.context.recent_actions[0].starts_with("action 1 "));
        assert_eq!(result.context.recent_death_causes.len(), 5);
        assert_eq!(result.context.favorite_runes.len(), 5);
        assert_eq!(result.context.equipped_runes.len(), 4);
    }

    #[test]
    fn truncation_moves_on_to_death_causes_then_runes() {
        let input = bulky_input();
        let without_actions = {
            let mut i = input.clone();
            i.action_log.clear();
            build_context(&i, usize::MAX)
        };
        // All actions must go plus at least one death cause
        let budget = without_actions.estimated_tokens - 5;

        let result = build_context(&input, budget);

        assert!(result.truncated);
        assert!(result.context.recent_actions.is_empty());
        assert_eq!(result.context.recent_death_causes.len(), 4);
        // Oldest of the five (dropped from the end) is gone
        assert!(result.context.recent_death_causes[0].starts_with("cause 4 "));
        assert_eq!(result.context.favorite_runes.len(), 5);
        assert_eq!(result.context.equipped_runes.len(), 4);
    }

    fn runes_only_input() -> ContextInput {
        let mut input = ContextInput::new(RequestType::RuneAcquired);
        input.history = vec![RunRecord::victory(3, ended(1)).with_runes(
            ["a", "b", "c", "d", "e"].map(|p| format!("{}-{}", p, "r".repeat(30))),
        )];
        input.game.player.equipped_runes = vec!["ember".into(), "hardy".into(), "zephyr".into()];
        input
    }

    #[test]
    fn favorite_runes_shrink_from_end_before_equipped_runes() {
        let input = runes_only_input();
        let full = build_context(&input, usize::MAX);
        assert_eq!(full.context.favorite_runes.len(), 5);

        let result = build_context(&input, full.estimated_tokens - 1);

        assert!(result.truncated);
        assert_eq!(result.context.favorite_runes.len(), 4);
        assert!(result.context.favorite_runes[3].starts_with("d-"));
        assert_eq!(result.context.equipped_runes, vec!["ember", "hardy", "zephyr"]);
    }

    #[test]
    fn equipped_runes_shrink_from_end_once_favorites_are_gone() {
        let input = runes_only_input();
        let without_favorites = {
            let mut i = input.clone();
            i.history.clear();
            build_context(&i, usize::MAX)
        };

        let result = build_context(&input, without_favorites.estimated_tokens - 1);

        assert!(result.truncated);
        assert!(result.context.favorite_runes.is_empty());
        assert_eq!(result.context.equipped_runes, vec!["ember", "hardy"]);
    }

    #[test]
    fn tiny_budget_empties_every_list_and_reports_truncation() {
        let result = build_context(&bulky_input(), 1);

        assert!(result.truncated);
        assert!(result.context.truncatable_lists_empty());
        // Scalars alone still exceed a 1-token budget
        assert!(result.estimated_tokens > 1);
    }

    #[test]
    fn estimate_never_exceeds_budget_unless_lists_empty() {
        let input = bulky_input();
        for budget in [1, 50, 100, 150, 200, 300, 400, 2000] {
            let result = build_context(&input, budget);
            assert!(
                result.estimated_tokens <= budget || result.context.truncatable_lists_empty(),
                "budget {} produced {} tokens",
                budget,
                result.estimated_tokens
            );
        }
    }

    #[test]
    fn deterministic_for_identical_input() {
        let input = bulky_input();
        assert_eq!(build_context(&input, 300), build_context(&input, 300));
    }

    #[test]
    fn input_deserializes_with_defaults() {
        let input: ContextInput = serde_json::from_str(
            r#"{"game":{"player":{"hp":3,"gold":12,"equippedRunes":["hardy"]}},"actionLog":["moved"]}"#,
        )
        .unwrap();

        assert_eq!(input.request_type, RequestType::FloorStart);
        assert_eq!(input.game.player.hp, 3);
        assert!(input.history.is_empty());

        let context = build_context(&input, DEFAULT_TOKEN_BUDGET).context;
        assert_eq!(context.equipped_runes, vec!["hardy"]);
        assert_eq!(context.recent_actions, vec!["moved"]);
    }
}
