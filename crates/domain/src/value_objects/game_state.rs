//! Live game-state slices consumed by the context builder
//!
//! These mirror what the grid engine and the stats store expose. They are
//! owned by external collaborators; the Dungeon Master only reads them.
//! Counters are signed because the host may hand over transiently negative
//! values (damage applied before clamping, for instance).

use serde::{Deserialize, Serialize};

/// One cell of the minesweeper grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    /// A monster hides under this cell
    #[serde(default)]
    pub is_mine: bool,
    /// The cell has been opened by the player
    #[serde(default)]
    pub is_revealed: bool,
}

impl GridCell {
    pub fn mine() -> Self {
        Self {
            is_mine: true,
            is_revealed: false,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn revealed(mut self) -> Self {
        self.is_revealed = true;
        self
    }

    /// A monster that is still lurking
    pub fn is_hidden_mine(&self) -> bool {
        self.is_mine && !self.is_revealed
    }
}

/// Floor generation parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub cols: u32,
    #[serde(default)]
    pub mine_count: i64,
}

/// Player stats for the current run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default)]
    pub hp: i64,
    #[serde(default)]
    pub gold: i64,
    #[serde(default)]
    pub equipped_runes: Vec<String>,
}

/// Per-run counters maintained by the game loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCounters {
    #[serde(default)]
    pub current_floor: i64,
    #[serde(default)]
    pub tiles_revealed: i64,
    #[serde(default)]
    pub near_death_moments: i64,
}

/// Everything about the run in progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentGame {
    /// Row-major grid; `None` between floors
    #[serde(default)]
    pub grid: Option<Vec<Vec<GridCell>>>,
    #[serde(default)]
    pub grid_config: GridConfig,
    #[serde(default)]
    pub player: PlayerStats,
    #[serde(default)]
    pub counters: RunCounters,
}

impl CurrentGame {
    /// Monsters still hidden on the floor.
    ///
    /// Counts unrevealed mines when a grid exists, otherwise falls back to the
    /// configured mine count (clamped to zero).
    pub fn monsters_remaining(&self) -> u64 {
        match &self.grid {
            Some(rows) => rows
                .iter()
                .flatten()
                .filter(|cell| cell.is_hidden_mine())
                .count() as u64,
            None => clamp_non_negative(self.grid_config.mine_count),
        }
    }
}

/// Lifetime statistics across all runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    #[serde(default)]
    pub total_runs: i64,
    #[serde(default)]
    pub highest_level: i64,
}

fn clamp_non_negative(value: i64) -> u64 {
    value.max(0) as u64
}
