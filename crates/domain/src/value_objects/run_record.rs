//! Historical run records
//!
//! Persisted by the run-history collaborator; read-only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunResult {
    Death,
    Victory,
}

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub result: RunResult,
    /// Deepest floor reached
    pub level: i64,
    pub gold: i64,
    #[serde(default)]
    pub equipped_runes: Vec<String>,
    /// Free-text cause, only meaningful for deaths
    #[serde(default)]
    pub death_cause: Option<String>,
    pub ended_at: DateTime<Utc>,
}

impl RunRecord {
    pub fn death(level: i64, cause: impl Into<String>, ended_at: DateTime<Utc>) -> Self {
        Self {
            result: RunResult::Death,
            level,
            gold: 0,
            equipped_runes: Vec::new(),
            death_cause: Some(cause.into()),
            ended_at,
        }
    }

    pub fn victory(level: i64, ended_at: DateTime<Utc>) -> Self {
        Self {
            result: RunResult::Victory,
            level,
            gold: 0,
            equipped_runes: Vec::new(),
            death_cause: None,
            ended_at,
        }
    }

    pub fn with_runes<I, S>(mut self, runes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipped_runes = runes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gold(mut self, gold: i64) -> Self {
        self.gold = gold;
        self
    }

    pub fn is_death(&self) -> bool {
        self.result == RunResult::Death
    }

    /// Trimmed death cause, if this run was a death with a non-blank cause
    pub fn trimmed_death_cause(&self) -> Option<&str> {
        if !self.is_death() {
            return None;
        }
        self.death_cause
            .as_deref()
            .map(str::trim)
            .filter(|cause| !cause.is_empty())
    }
}
