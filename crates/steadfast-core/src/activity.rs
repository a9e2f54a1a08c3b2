//! Activity log and the daily analysis marker.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::calendar::{trailing_days, MAX_WINDOW_DAYS};

/// Category used for entries the app writes on its own.
pub const SYSTEM_CATEGORY: &str = "system";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    pub timestamp: NaiveDateTime,
    pub category: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityStats {
    /// Entries inside the window.
    pub total: usize,
    /// Count per day of the window, including days with no activity.
    pub by_day: BTreeMap<NaiveDate, usize>,
    /// Busiest day; ties go to the most recent. `None` without any activity.
    pub most_active: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Newest first.
    #[serde(default)]
    entries: Vec<ActivityEntry>,
    #[serde(default)]
    last_analysis_date: Option<NaiveDate>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn last_analysis_date(&self) -> Option<NaiveDate> {
        self.last_analysis_date
    }

    pub fn log(&mut self, category: &str, action: &str, now: NaiveDateTime) {
        tracing::debug!(category, action, "activity logged");
        self.entries.insert(
            0,
            ActivityEntry {
                id: Uuid::new_v4().to_string(),
                timestamp: now,
                category: category.to_string(),
                action: action.to_string(),
            },
        );
        self.prune(now.date());
    }

    /// Drop entries older than the longest window [`ActivityLog::stats`]
    /// can cover.
    fn prune(&mut self, today: NaiveDate) {
        let Some(cutoff) = today.checked_sub_days(Days::new((MAX_WINDOW_DAYS - 1).into())) else {
            return;
        };
        let before = self.entries.len();
        self.entries.retain(|entry| entry.timestamp.date() >= cutoff);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!(dropped, "pruned old activity entries");
        }
    }

    /// Activity over the `days` days ending `today`, optionally limited to one
    /// category.
    pub fn stats(&self, category: Option<&str>, days: u32, today: NaiveDate) -> ActivityStats {
        let mut by_day: BTreeMap<NaiveDate, usize> = trailing_days(today, days)
            .into_iter()
            .map(|d| (d, 0))
            .collect();

        let mut total = 0;
        for entry in &self.entries {
            if category.is_some_and(|c| c != entry.category) {
                continue;
            }
            if let Some(count) = by_day.get_mut(&entry.timestamp.date()) {
                *count += 1;
                total += 1;
            }
        }

        let mut most_active: Option<(NaiveDate, usize)> = None;
        for (&day, &count) in by_day.iter().rev() {
            if count > 0 && most_active.map_or(true, |(_, best)| count > best) {
                most_active = Some((day, count));
            }
        }

        ActivityStats {
            total,
            by_day,
            most_active: most_active.map(|(day, _)| day),
        }
    }

    /// Whether the daily analysis has not yet run for `today`.
    pub fn needs_analysis(&self, today: NaiveDate) -> bool {
        self.last_analysis_date != Some(today)
    }

    /// Mark today's analysis as done and log it. Returns false when it had
    /// already run today.
    pub fn run_daily_analysis(&mut self, now: NaiveDateTime) -> bool {
        if !self.needs_analysis(now.date()) {
            return false;
        }
        self.last_analysis_date = Some(now.date());
        self.log(SYSTEM_CATEGORY, "daily_analysis", now);
        true
    }
}
