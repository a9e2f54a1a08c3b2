//! Per-day aggregate completion history for calendar views.
//!
//! One flag per date saying whether that day's applicable disciplines were
//! all done. This is separate from the incremental streak counters in
//! [`crate::discipline::tracker`], which never read or write it.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::trailing_days;

/// How far back [`CompletionHistory::streak_count`] looks.
pub const MAX_STREAK_LOOKBACK_DAYS: u32 = 365;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionHistory {
    days: BTreeMap<NaiveDate, bool>,
}

impl CompletionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, completed: bool) {
        self.days.insert(date, completed);
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.days.get(&date).copied().unwrap_or(false)
    }

    /// Consecutive completed days ending at `today`.
    ///
    /// An incomplete (or missing) `today` yields 0.
    pub fn streak_count(&self, today: NaiveDate) -> u32 {
        let mut streak = 0;
        for back in 0..MAX_STREAK_LOOKBACK_DAYS {
            let Some(date) = today.checked_sub_days(Days::new(back.into())) else {
                break;
            };
            if !self.is_completed(date) {
                break;
            }
            streak += 1;
        }
        streak
    }

    /// Every day in `start..=end` with its flag; missing days are `false`.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, bool)> {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| (d, self.is_completed(d)))
            .collect()
    }

    /// The trailing `days` days ending at `today`, capped like every other
    /// day window (see [`trailing_days`]).
    pub fn window(&self, today: NaiveDate, days: u32) -> Vec<(NaiveDate, bool)> {
        trailing_days(today, days)
            .into_iter()
            .map(|d| (d, self.is_completed(d)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MAX_WINDOW_DAYS;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(CompletionHistory::new().streak_count(ymd(2023, 6, 15)), 0);
    }

    #[test]
    fn streak_counts_back_from_today() {
        let mut h = CompletionHistory::new();
        h.record(ymd(2023, 6, 12), true);
        h.record(ymd(2023, 6, 13), true);
        h.record(ymd(2023, 6, 14), true);
        h.record(ymd(2023, 6, 15), true);
        h.record(ymd(2023, 6, 11), false);
        h.record(ymd(2023, 6, 10), true);
        assert_eq!(h.streak_count(ymd(2023, 6, 15)), 4);
    }

    #[test]
    fn gap_breaks_streak() {
        let mut h = CompletionHistory::new();
        h.record(ymd(2023, 6, 13), true);
        h.record(ymd(2023, 6, 15), true);
        assert_eq!(h.streak_count(ymd(2023, 6, 15)), 1);
        assert_eq!(h.streak_count(ymd(2023, 6, 16)), 0);
    }

    #[test]
    fn streak_spans_month_boundary() {
        let mut h = CompletionHistory::new();
        h.record(ymd(2023, 5, 31), true);
        h.record(ymd(2023, 6, 1), true);
        assert_eq!(h.streak_count(ymd(2023, 6, 1)), 2);
    }

    #[test]
    fn range_fills_missing_days() {
        let mut h = CompletionHistory::new();
        h.record(ymd(2023, 6, 2), true);
        let days = h.range(ymd(2023, 6, 1), ymd(2023, 6, 3));
        assert_eq!(
            days,
            vec![
                (ymd(2023, 6, 1), false),
                (ymd(2023, 6, 2), true),
                (ymd(2023, 6, 3), false),
            ]
        );
        assert!(h.range(ymd(2023, 6, 3), ymd(2023, 6, 1)).is_empty());
    }

    #[test]
    fn window_is_capped_for_huge_day_counts() {
        let mut h = CompletionHistory::new();
        h.record(ymd(2023, 6, 15), true);
        let days = h.window(ymd(2023, 6, 15), 4_000_000_000);
        assert_eq!(days.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(days.last(), Some(&(ymd(2023, 6, 15), true)));
        assert_eq!(h.window(ymd(2023, 6, 15), 2).len(), 2);
    }

    #[test]
    fn serializes_as_date_keyed_map() {
        let mut h = CompletionHistory::new();
        h.record(ymd(2023, 6, 15), true);
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"2023-06-15":true}"#);
    }
}
