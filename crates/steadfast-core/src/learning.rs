//! Learning feed: short lessons grouped by category.
//!
//! Featured lessons (one per category) and the daily list both use the
//! shuffle strategy, so the feed is stable for a whole day. Progress tracks
//! which lessons were completed and on which date; the learning streak is
//! recomputed from those dates.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::calendar::trailing_days;
use crate::selection::select_for_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningItem {
    pub id: String,
    pub category: String,
    pub title: String,
    pub content: String,
}

/// Persisted learning progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningProgress {
    #[serde(default)]
    pub selected_item_id: Option<String>,
    #[serde(default)]
    pub last_selected_date: Option<NaiveDate>,
    /// Item id -> date it was completed.
    #[serde(default)]
    pub completed: BTreeMap<String, NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: String,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_completed: usize,
    pub current_streak: u32,
    /// Last seven days ending today, oldest first.
    pub weekly_progress: Vec<bool>,
    pub category_stats: Vec<CategoryStat>,
}

/// Lesson pool plus the user's progress through it.
#[derive(Debug, Clone, Default)]
pub struct LearningFeed {
    categories: Vec<String>,
    items: Vec<LearningItem>,
    progress: LearningProgress,
}

impl LearningFeed {
    pub fn new(categories: Vec<String>, items: Vec<LearningItem>, progress: LearningProgress) -> Self {
        Self {
            categories,
            items,
            progress,
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn items(&self) -> &[LearningItem] {
        &self.items
    }

    pub fn progress(&self) -> &LearningProgress {
        &self.progress
    }

    pub fn item(&self, id: &str) -> Option<&LearningItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items_in_category(&self, category: &str) -> Vec<LearningItem> {
        self.items
            .iter()
            .filter(|i| i.category == category)
            .cloned()
            .collect()
    }

    /// One lesson per category for `date`, in category order. Empty
    /// categories are skipped.
    pub fn featured_items(&self, date: NaiveDate) -> Vec<LearningItem> {
        self.categories
            .iter()
            .filter_map(|c| {
                select_for_date(&self.items_in_category(c), date, 1)
                    .into_iter()
                    .next()
            })
            .collect()
    }

    /// The day's lesson list across all categories.
    pub fn items_for_date(&self, date: NaiveDate, count: usize) -> Vec<LearningItem> {
        select_for_date(&self.items, date, count)
    }

    /// Clear the selection once the day has changed. Returns true if it did.
    pub fn ensure_daily_selection(&mut self, date: NaiveDate) -> bool {
        if self.progress.last_selected_date == Some(date) {
            return false;
        }
        self.reset_daily_selection(date);
        true
    }

    pub fn reset_daily_selection(&mut self, date: NaiveDate) {
        self.progress.selected_item_id = None;
        self.progress.last_selected_date = Some(date);
    }

    /// Mark a lesson as the one being read today. Unknown ids are ignored.
    pub fn select_item(&mut self, id: &str, date: NaiveDate) -> bool {
        if self.item(id).is_none() {
            return false;
        }
        self.progress.selected_item_id = Some(id.to_string());
        self.progress.last_selected_date = Some(date);
        true
    }

    pub fn selected_item(&self) -> Option<&LearningItem> {
        self.progress
            .selected_item_id
            .as_deref()
            .and_then(|id| self.item(id))
    }

    /// Record a lesson as completed on `date`. Unknown ids are ignored.
    pub fn complete_item(&mut self, id: &str, date: NaiveDate) -> bool {
        if self.item(id).is_none() {
            return false;
        }
        self.progress.completed.insert(id.to_string(), date);
        true
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.progress.completed.contains_key(id)
    }

    pub fn stats(&self, today: NaiveDate) -> LearningStats {
        let dates: BTreeSet<NaiveDate> = self.progress.completed.values().copied().collect();

        let category_stats = self
            .categories
            .iter()
            .map(|category| {
                let in_category: Vec<_> = self
                    .items
                    .iter()
                    .filter(|i| &i.category == category)
                    .collect();
                CategoryStat {
                    category: category.clone(),
                    completed: in_category.iter().filter(|i| self.is_completed(&i.id)).count(),
                    total: in_category.len(),
                }
            })
            .collect();

        LearningStats {
            total_completed: self.progress.completed.len(),
            current_streak: learning_streak(&dates, today),
            weekly_progress: trailing_days(today, 7)
                .into_iter()
                .map(|d| dates.contains(&d))
                .collect(),
            category_stats,
        }
    }
}

/// Consecutive days with at least one completion, ending today.
/// Zero when nothing was completed today.
fn learning_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) && streak < 365 {
        streak += 1;
        day = day - Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: &str, category: &str) -> LearningItem {
        LearningItem {
            id: id.into(),
            category: category.into(),
            title: format!("title {id}"),
            content: String::new(),
        }
    }

    fn feed() -> LearningFeed {
        LearningFeed::new(
            vec!["Leadership".into(), "Finance".into(), "Empty".into()],
            vec![
                item("l1", "Leadership"),
                item("l2", "Leadership"),
                item("l3", "Leadership"),
                item("l4", "Leadership"),
                item("l5", "Leadership"),
                item("f1", "Finance"),
            ],
            LearningProgress::default(),
        )
    }

    #[test]
    fn featured_items_one_per_non_empty_category() {
        let featured = feed().featured_items(ymd(2023, 6, 15));
        let ids: Vec<_> = featured.iter().map(|i| i.id.as_str()).collect();
        // five leadership items shuffle to [l5, l2, l1, l3, l4] on this date
        assert_eq!(ids, vec!["l5", "f1"]);
    }

    #[test]
    fn items_for_date_is_stable() {
        let f = feed();
        let date = ymd(2023, 6, 15);
        assert_eq!(f.items_for_date(date, 3), f.items_for_date(date, 3));
        assert_eq!(f.items_for_date(date, 3).len(), 3);
        assert_eq!(f.items_for_date(date, 20).len(), 6);
    }

    #[test]
    fn streak_requires_completion_today() {
        let mut f = feed();
        f.complete_item("l1", ymd(2023, 6, 13));
        f.complete_item("l2", ymd(2023, 6, 14));
        assert_eq!(f.stats(ymd(2023, 6, 15)).current_streak, 0);

        f.complete_item("l3", ymd(2023, 6, 15));
        assert_eq!(f.stats(ymd(2023, 6, 15)).current_streak, 3);
    }

    #[test]
    fn stats_cover_week_and_categories() {
        let mut f = feed();
        f.complete_item("l1", ymd(2023, 6, 9));
        f.complete_item("f1", ymd(2023, 6, 15));
        let stats = f.stats(ymd(2023, 6, 15));
        assert_eq!(stats.total_completed, 2);
        assert_eq!(
            stats.weekly_progress,
            vec![true, false, false, false, false, false, true]
        );
        assert_eq!(
            stats.category_stats,
            vec![
                CategoryStat { category: "Leadership".into(), completed: 1, total: 5 },
                CategoryStat { category: "Finance".into(), completed: 1, total: 1 },
                CategoryStat { category: "Empty".into(), completed: 0, total: 0 },
            ]
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut f = feed();
        assert!(!f.complete_item("zzz", ymd(2023, 6, 15)));
        assert!(!f.select_item("zzz", ymd(2023, 6, 15)));
        assert_eq!(f.progress(), &LearningProgress::default());
    }

    #[test]
    fn daily_selection_resets_on_new_day() {
        let mut f = feed();
        assert!(f.select_item("l2", ymd(2023, 6, 15)));
        assert!(!f.ensure_daily_selection(ymd(2023, 6, 15)));
        assert_eq!(f.selected_item().unwrap().id, "l2");
        assert!(f.ensure_daily_selection(ymd(2023, 6, 16)));
        assert!(f.selected_item().is_none());
    }
}
