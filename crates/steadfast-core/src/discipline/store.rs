//! Discipline collection plus its completion tracker.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::tracker::{CompletionTracker, ToggleOutcome};
use super::{Discipline, DisciplineCategory, Frequency};
use crate::calendar::format_time;
use crate::error::{Result, ValidationError};

/// Input for [`DisciplineStore::add`].
#[derive(Debug, Clone)]
pub struct NewDiscipline {
    pub name: String,
    pub description: Option<String>,
    pub category: DisciplineCategory,
    pub frequency: Frequency,
    /// `None` uses [`Frequency::default_days`].
    pub scheduled_days: Option<BTreeSet<u8>>,
    pub duration_minutes: Option<u32>,
    pub reminder: Option<String>,
}

impl NewDiscipline {
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: DisciplineCategory::default(),
            frequency,
            scheduled_days: None,
            duration_minutes: None,
            reminder: None,
        }
    }
}

/// Partial update for [`DisciplineStore::update`]. `None` keeps the field.
#[derive(Debug, Clone, Default)]
pub struct DisciplinePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<DisciplineCategory>,
    pub frequency: Option<Frequency>,
    pub scheduled_days: Option<BTreeSet<u8>>,
    pub duration_minutes: Option<u32>,
    pub reminder: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisciplineStore {
    #[serde(default)]
    disciplines: Vec<Discipline>,
    #[serde(default)]
    tracker: CompletionTracker,
}

impl DisciplineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `samples` when the store is empty, then clear yesterday's
    /// completions. Returns true if samples were inserted.
    pub fn initialize(&mut self, now: NaiveDateTime, samples: Vec<Discipline>) -> bool {
        let seeded = self.disciplines.is_empty() && !samples.is_empty();
        if seeded {
            for d in &samples {
                self.tracker.register(&d.id);
            }
            tracing::info!(count = samples.len(), "seeded sample disciplines");
            self.disciplines = samples;
        }
        if self.tracker.reset_if_new_day(now) {
            tracing::info!(date = %now.date(), "daily completions reset");
        }
        seeded
    }

    pub fn add(&mut self, new: NewDiscipline, now: NaiveDateTime) -> Result<String> {
        let name = required_name(&new.name)?;
        let days = new
            .scheduled_days
            .unwrap_or_else(|| new.frequency.default_days());
        validate_schedule(new.frequency, &days)?;
        let reminder = new.reminder.map(|r| validate_reminder(&r)).transpose()?;

        let id = Uuid::new_v4().to_string();
        self.disciplines.push(Discipline {
            id: id.clone(),
            name,
            description: new.description,
            category: new.category,
            frequency: new.frequency,
            scheduled_days: days,
            duration_minutes: new.duration_minutes,
            reminder,
            created_at: now,
            updated_at: now,
            last_completed_at: None,
        });
        self.tracker.register(&id);
        tracing::debug!(%id, "discipline added");
        Ok(id)
    }

    /// Apply `patch`. Returns `Ok(false)` for unknown ids.
    pub fn update(&mut self, id: &str, patch: DisciplinePatch, now: NaiveDateTime) -> Result<bool> {
        let Some(discipline) = self.disciplines.iter_mut().find(|d| d.id == id) else {
            return Ok(false);
        };

        let name = patch.name.as_deref().map(required_name).transpose()?;
        let frequency = patch.frequency.unwrap_or(discipline.frequency);
        let days = patch
            .scheduled_days
            .unwrap_or_else(|| discipline.scheduled_days.clone());
        validate_schedule(frequency, &days)?;
        let reminder = patch
            .reminder
            .as_deref()
            .map(validate_reminder)
            .transpose()?;

        if let Some(name) = name {
            discipline.name = name;
        }
        if let Some(description) = patch.description {
            discipline.description = Some(description);
        }
        if let Some(category) = patch.category {
            discipline.category = category;
        }
        if let Some(minutes) = patch.duration_minutes {
            discipline.duration_minutes = Some(minutes);
        }
        if reminder.is_some() {
            discipline.reminder = reminder;
        }
        discipline.frequency = frequency;
        discipline.scheduled_days = days;
        discipline.updated_at = now;
        Ok(true)
    }

    /// Remove a discipline with its completion and streak. Returns false for
    /// unknown ids.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.disciplines.len();
        self.disciplines.retain(|d| d.id != id);
        if self.disciplines.len() == before {
            return false;
        }
        self.tracker.forget(id);
        tracing::debug!(%id, "discipline deleted");
        true
    }

    /// Record today's completion. Unknown ids are a silent no-op (`None`).
    ///
    /// A toggle on a new calendar day first clears the previous day's
    /// completions, so yesterday's state never carries over.
    pub fn toggle(&mut self, id: &str, completed: bool, now: NaiveDateTime) -> Option<ToggleOutcome> {
        let discipline = self.disciplines.iter_mut().find(|d| d.id == id)?;

        if self.tracker.reset_if_new_day(now) {
            tracing::info!(date = %now.date(), "daily completions reset");
        }
        let outcome = self.tracker.toggle(id, completed);
        if outcome == ToggleOutcome::Completed {
            discipline.last_completed_at = Some(now);
            discipline.updated_at = now;
        }
        tracing::debug!(%id, completed, ?outcome, streak = self.tracker.streak(id), "discipline toggled");
        Some(outcome)
    }

    /// All disciplines, or those in one category.
    pub fn disciplines(&self, category: Option<DisciplineCategory>) -> Vec<&Discipline> {
        self.disciplines
            .iter()
            .filter(|d| category.map_or(true, |c| d.category == c))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Discipline> {
        self.disciplines.iter().find(|d| d.id == id)
    }

    /// Disciplines active on `date`, in insertion order.
    pub fn daily_disciplines(&self, date: NaiveDate) -> Vec<&Discipline> {
        self.disciplines
            .iter()
            .filter(|d| d.is_active_on(date))
            .collect()
    }

    /// Fraction of the disciplines active on `date` completed today.
    pub fn completion_rate(&self, date: NaiveDate) -> f64 {
        self.tracker.completion_rate(
            self.daily_disciplines(date)
                .into_iter()
                .map(|d| d.id.as_str()),
        )
    }

    /// Whether every discipline active on `date` is completed. False when
    /// none are active.
    pub fn all_completed(&self, date: NaiveDate) -> bool {
        let active = self.daily_disciplines(date);
        !active.is_empty() && active.iter().all(|d| self.tracker.is_completed(&d.id))
    }

    pub fn streak(&self, id: &str) -> u32 {
        self.tracker.streak(id)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.tracker.is_completed(id)
    }

    pub fn tracker(&self) -> &CompletionTracker {
        &self.tracker
    }

    pub fn len(&self) -> usize {
        self.disciplines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disciplines.is_empty()
    }
}

fn required_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyField("name".into()).into());
    }
    Ok(name.to_string())
}

fn validate_schedule(frequency: Frequency, days: &BTreeSet<u8>) -> Result<()> {
    if let Some(bad) = days.iter().find(|&&d| d > 6) {
        return Err(ValidationError::InvalidValue {
            field: "scheduled_days".into(),
            message: format!("{bad} is not a weekday index (0=Sun..6=Sat)"),
        }
        .into());
    }
    if frequency != Frequency::Daily && days.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "scheduled_days".into(),
            message: format!("a {frequency} discipline needs at least one day"),
        }
        .into());
    }
    Ok(())
}

fn validate_reminder(reminder: &str) -> Result<String> {
    format_time(reminder)?;
    Ok(reminder.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::seed::sample_disciplines;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn seeded() -> DisciplineStore {
        let mut store = DisciplineStore::new();
        store.initialize(at(15, 7), sample_disciplines());
        store
    }

    #[test]
    fn initialize_seeds_only_when_empty() {
        let mut store = seeded();
        assert_eq!(store.len(), 5);
        assert_eq!(store.streak("1"), 0);
        assert!(!store.initialize(at(15, 8), sample_disciplines()));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn initialize_without_samples_stays_empty() {
        let mut store = DisciplineStore::new();
        assert!(!store.initialize(at(15, 7), Vec::new()));
        assert!(store.is_empty());
    }

    #[test]
    fn add_uses_frequency_default_days() {
        let mut store = DisciplineStore::new();
        let id = store
            .add(NewDiscipline::new("Stretch", Frequency::Custom), at(15, 9))
            .unwrap();
        let d = store.get(&id).unwrap();
        assert_eq!(d.scheduled_days, BTreeSet::from([1, 2, 3, 4, 5]));
        assert_eq!(store.tracker().streaks().get(&id), Some(&0));
    }

    #[test]
    fn add_validates_input() {
        let mut store = DisciplineStore::new();
        assert!(matches!(
            store.add(NewDiscipline::new("  ", Frequency::Daily), at(15, 9)),
            Err(CoreError::Validation(ValidationError::EmptyField(_)))
        ));

        let mut bad_day = NewDiscipline::new("Run", Frequency::Weekly);
        bad_day.scheduled_days = Some(BTreeSet::from([7]));
        assert!(store.add(bad_day, at(15, 9)).is_err());

        let mut no_days = NewDiscipline::new("Run", Frequency::Weekly);
        no_days.scheduled_days = Some(BTreeSet::new());
        assert!(store.add(no_days, at(15, 9)).is_err());

        let mut bad_reminder = NewDiscipline::new("Run", Frequency::Daily);
        bad_reminder.reminder = Some("25:00".into());
        assert!(matches!(
            store.add(bad_reminder, at(15, 9)),
            Err(CoreError::InvalidDate(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_unknown_id_is_a_noop() {
        let mut store = seeded();
        let before = store.clone();
        assert_eq!(store.toggle("missing", true, at(15, 9)), None);
        assert_eq!(store, before);
    }

    #[test]
    fn toggle_sets_last_completed_and_streak() {
        let mut store = seeded();
        assert_eq!(store.toggle("1", true, at(15, 9)), Some(ToggleOutcome::Completed));
        assert_eq!(store.get("1").unwrap().last_completed_at, Some(at(15, 9)));
        assert_eq!(store.streak("1"), 1);
        assert_eq!(store.toggle("1", true, at(15, 10)), Some(ToggleOutcome::Unchanged));
        assert_eq!(store.streak("1"), 1);
    }

    #[test]
    fn toggle_on_new_day_clears_yesterday_first() {
        let mut store = seeded();
        store.toggle("1", true, at(15, 9));
        store.toggle("2", true, at(15, 9));
        store.toggle("2", true, at(16, 9));
        assert!(!store.is_completed("1"));
        assert!(store.is_completed("2"));
        assert_eq!(store.streak("2"), 2);
    }

    #[test]
    fn completion_rate_counts_active_disciplines_only() {
        // 2023-06-15 is a Thursday: the three daily samples are active
        let mut store = seeded();
        let thursday = at(15, 0).date();
        assert_eq!(store.daily_disciplines(thursday).len(), 3);
        store.toggle("1", true, at(15, 9));
        store.toggle("2", true, at(15, 9));
        store.toggle("3", true, at(15, 9)); // exercise, not scheduled today
        assert!((store.completion_rate(thursday) - 2.0 / 3.0).abs() < 1e-12);
        assert!(!store.all_completed(thursday));
        store.toggle("5", true, at(15, 9));
        assert!(store.all_completed(thursday));
    }

    #[test]
    fn delete_drops_tracker_state() {
        let mut store = seeded();
        store.toggle("1", true, at(15, 9));
        assert!(store.delete("1"));
        assert!(!store.delete("1"));
        assert_eq!(store.streak("1"), 0);
        assert!(!store.tracker().completed_today().contains_key("1"));
    }

    #[test]
    fn update_patches_fields() {
        let mut store = seeded();
        let patch = DisciplinePatch {
            name: Some("Evening Run".into()),
            frequency: Some(Frequency::Custom),
            scheduled_days: Some(BTreeSet::from([2, 4])),
            ..Default::default()
        };
        assert!(store.update("3", patch, at(15, 9)).unwrap());
        let d = store.get("3").unwrap();
        assert_eq!(d.name, "Evening Run");
        assert_eq!(d.frequency, Frequency::Custom);
        assert!(d.is_active_on(at(15, 0).date()));
        assert_eq!(d.updated_at, at(15, 9));

        assert!(!store.update("missing", DisciplinePatch::default(), at(15, 9)).unwrap());
        let clear_days = DisciplinePatch {
            scheduled_days: Some(BTreeSet::new()),
            ..Default::default()
        };
        assert!(store.update("3", clear_days, at(15, 9)).is_err());
    }

    #[test]
    fn filter_by_category() {
        let store = seeded();
        let mental = store.disciplines(Some(DisciplineCategory::Mental));
        assert_eq!(mental.len(), 2);
        assert_eq!(store.disciplines(None).len(), 5);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut store = seeded();
        store.toggle("1", true, at(15, 9));
        let json = serde_json::to_string(&store).unwrap();
        let decoded: DisciplineStore = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, store);
    }
}
