//! Per-day completion state and incremental streak counters.
//!
//! The streak for an id moves only on edges: +1 when today's completion goes
//! from not-completed to completed, -1 (floored at 0) on the way back.
//! Re-applying the current value never moves it. Streaks are not recomputed
//! from history, so a day that is skipped without being toggled leaves the
//! counter where it was.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::calendar::is_same_calendar_day;

/// What a toggle did to the completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// not-completed -> completed; streak incremented
    Completed,
    /// completed -> not-completed; streak decremented
    Uncompleted,
    /// Same value as before; streak untouched
    Unchanged,
}

/// Completion map for today plus the streak map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionTracker {
    #[serde(default)]
    completed_today: BTreeMap<String, bool>,
    #[serde(default)]
    streaks: BTreeMap<String, u32>,
    #[serde(default)]
    last_updated: Option<NaiveDateTime>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set today's completion for `id`, moving the streak only on an edge.
    pub fn toggle(&mut self, id: &str, completed: bool) -> ToggleOutcome {
        let previous = self.is_completed(id);
        self.completed_today.insert(id.to_string(), completed);

        match (previous, completed) {
            (false, true) => {
                *self.streaks.entry(id.to_string()).or_insert(0) += 1;
                ToggleOutcome::Completed
            }
            (true, false) => {
                let streak = self.streaks.entry(id.to_string()).or_insert(0);
                *streak = streak.saturating_sub(1);
                ToggleOutcome::Uncompleted
            }
            _ => ToggleOutcome::Unchanged,
        }
    }

    /// Clear today's completions when `now` is on a different calendar day
    /// than the last update (or nothing was ever recorded). Streaks survive.
    ///
    /// Returns true when a reset happened.
    pub fn reset_if_new_day(&mut self, now: NaiveDateTime) -> bool {
        let stale = match self.last_updated {
            Some(last) => !is_same_calendar_day(last, now),
            None => true,
        };
        if stale {
            self.completed_today.clear();
            self.last_updated = Some(now);
        }
        stale
    }

    /// Fraction of `applicable` ids completed today, in `[0, 1]`.
    ///
    /// Duplicate ids count once. An empty set yields `0.0`.
    pub fn completion_rate<'a, I>(&self, applicable: I) -> f64
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: BTreeSet<&str> = applicable.into_iter().collect();
        if ids.is_empty() {
            return 0.0;
        }
        let done = ids.iter().filter(|id| self.is_completed(id)).count();
        done as f64 / ids.len() as f64
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_today.get(id).copied().unwrap_or(false)
    }

    /// Current streak for `id`; 0 for unknown ids.
    pub fn streak(&self, id: &str) -> u32 {
        self.streaks.get(id).copied().unwrap_or(0)
    }

    /// Start tracking `id` with a zero streak.
    pub fn register(&mut self, id: &str) {
        self.streaks.entry(id.to_string()).or_insert(0);
    }

    /// Drop all state for `id`. Unknown ids are ignored.
    pub fn forget(&mut self, id: &str) {
        self.completed_today.remove(id);
        self.streaks.remove(id);
    }

    pub fn last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
    }

    pub fn completed_today(&self) -> &BTreeMap<String, bool> {
        &self.completed_today
    }

    pub fn streaks(&self) -> &BTreeMap<String, u32> {
        &self.streaks
    }
}
