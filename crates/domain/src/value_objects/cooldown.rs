//! Cooldown gate between successful provider calls
//!
//! A value type: the gate is "open" when no call has succeeded yet or when at
//! least `cooldown_ms` have elapsed since the last success. Recording a
//! success returns a new value; the caller replaces its copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time-windowed state tracking the last successful provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownState {
    cooldown_ms: u64,
    last_call_timestamp: Option<DateTime<Utc>>,
}

impl CooldownState {
    /// Idle gate with the given window
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            last_call_timestamp: None,
        }
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    pub fn last_call_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_call_timestamp
    }

    /// Milliseconds since the last success; a clock that went backwards
    /// counts as zero elapsed.
    fn elapsed_ms(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
        (now - last).num_milliseconds().max(0) as u64
    }

    /// True iff no prior success or the window has fully elapsed.
    pub fn can_call(&self, now: DateTime<Utc>) -> bool {
        match self.last_call_timestamp {
            None => true,
            Some(last) => self.elapsed_ms(last, now) >= self.cooldown_ms,
        }
    }

    /// Milliseconds until the gate opens again; 0 if never called.
    pub fn remaining(&self, now: DateTime<Utc>) -> u64 {
        match self.last_call_timestamp {
            None => 0,
            Some(last) => self
                .cooldown_ms
                .saturating_sub(self.elapsed_ms(last, now)),
        }
    }

    /// New state recording a success at `now`. `self` is left untouched.
    #[must_use]
    pub fn record_success(&self, now: DateTime<Utc>) -> Self {
        Self {
            cooldown_ms: self.cooldown_ms,
            last_call_timestamp: Some(now),
        }
    }
}
