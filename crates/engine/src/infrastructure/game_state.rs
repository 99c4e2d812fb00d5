//! In-memory game state store.
//!
//! A host-side `GameStateSource` for games that keep their state in process.
//! The game loop writes through the `set_*`/`push_*` methods; the Dungeon
//! Master only reads.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use runesweeper_domain::{AggregateStats, CurrentGame, RunRecord};

use crate::infrastructure::ports::{GameStateError, GameStateSource};

#[derive(Debug, Default)]
struct Inner {
    current: CurrentGame,
    stats: AggregateStats,
    history: Vec<RunRecord>,
    actions: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryGameState {
    inner: RwLock<Inner>,
}

impl InMemoryGameState {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, GameStateError> {
        self.inner
            .read()
            .map_err(|e| GameStateError::Unavailable(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, GameStateError> {
        self.inner
            .write()
            .map_err(|e| GameStateError::Unavailable(e.to_string()))
    }

    pub fn set_current_game(&self, game: CurrentGame) -> Result<(), GameStateError> {
        self.write()?.current = game;
        Ok(())
    }

    pub fn set_aggregate_stats(&self, stats: AggregateStats) -> Result<(), GameStateError> {
        self.write()?.stats = stats;
        Ok(())
    }

    /// Append a finished run (history stays oldest to newest)
    pub fn push_run(&self, record: RunRecord) -> Result<(), GameStateError> {
        self.write()?.history.push(record);
        Ok(())
    }

    pub fn push_action(&self, action: impl Into<String>) -> Result<(), GameStateError> {
        self.write()?.actions.push(action.into());
        Ok(())
    }

    /// Forget the action log, typically at the start of a new run
    pub fn clear_actions(&self) -> Result<(), GameStateError> {
        self.write()?.actions.clear();
        Ok(())
    }
}

impl GameStateSource for InMemoryGameState {
    fn current_game(&self) -> Result<CurrentGame, GameStateError> {
        Ok(self.read()?.current.clone())
    }

    fn aggregate_stats(&self) -> Result<AggregateStats, GameStateError> {
        Ok(self.read()?.stats)
    }

    fn run_history(&self) -> Result<Vec<RunRecord>, GameStateError> {
        Ok(self.read()?.history.clone())
    }

    fn action_log(&self) -> Result<Vec<String>, GameStateError> {
        Ok(self.read()?.actions.clone())
    }
}
