//! Application controller.
//!
//! [`App`] owns every store and the persistence collaborator. It is built
//! once at startup and handed around by reference. Each mutating operation
//! updates the in-memory store first and then writes that store's snapshot;
//! persistence failures are logged and never surface to the caller.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::activity::{ActivityLog, SYSTEM_CATEGORY};
use crate::calendar::format_long_date;
use crate::discipline::tracker::ToggleOutcome;
use crate::discipline::{DisciplineCategory, DisciplinePatch, DisciplineStore, NewDiscipline};
use crate::error::{CoreError, Result};
use crate::history::CompletionHistory;
use crate::insights::{
    GrowthPlan, GrowthPlanUpdate, Insight, InsightsStore, PsychologicalProfile,
    PsychologicalProfileUpdate, Recommendation,
};
use crate::journal::{Journal, JournalEntry, JournalPrompt};
use crate::learning::{LearningFeed, LearningItem, LearningProgress, LearningStats};
use crate::profile::{Profile, ProfileSlot, ProfileUpdate, SettingsUpdate};
use crate::seed;
use crate::storage::{keys, load_snapshot, save_snapshot, Config, KeyValueStore};
use crate::subscription::{PremiumFeature, Subscription};
use crate::wisdom::{WisdomEntry, WisdomLibrary};

/// A discipline as shown on the today screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineStatus {
    pub id: String,
    pub name: String,
    pub category: DisciplineCategory,
    pub completed: bool,
    pub streak: u32,
    pub reminder: Option<String>,
}

/// Everything the today screen renders for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayView {
    pub date: NaiveDate,
    pub label: String,
    pub disciplines: Vec<DisciplineStatus>,
    pub completion_rate: f64,
    /// Consecutive fully completed days ending today.
    pub day_streak: u32,
    pub wisdom: Vec<WisdomEntry>,
    pub prompt: Option<JournalPrompt>,
    pub featured_learning: Vec<LearningItem>,
    pub journal_written: bool,
}

pub struct App<S: KeyValueStore> {
    store: S,
    config: Config,
    disciplines: DisciplineStore,
    history: CompletionHistory,
    journal: Journal,
    learning: LearningFeed,
    wisdom: WisdomLibrary,
    subscription: Subscription,
    profile: ProfileSlot,
    activity: ActivityLog,
    insights: InsightsStore,
}

impl<S: KeyValueStore> App<S> {
    /// Build the controller, restoring each store from its snapshot.
    /// Missing or corrupt snapshots fall back to an empty store.
    pub fn new(store: S, config: Config) -> Self {
        let journal_entries: Vec<JournalEntry> =
            load_snapshot(&store, keys::JOURNAL).unwrap_or_default();
        let progress: LearningProgress = load_snapshot(&store, keys::LEARNING).unwrap_or_default();
        let categories = seed::LEARNING_CATEGORIES.iter().map(|c| c.to_string()).collect();

        Self {
            disciplines: load_snapshot(&store, keys::DISCIPLINES).unwrap_or_default(),
            history: load_snapshot(&store, keys::HISTORY).unwrap_or_default(),
            journal: Journal::new(seed::journal_prompts(), journal_entries),
            learning: LearningFeed::new(categories, seed::learning_items(), progress),
            wisdom: WisdomLibrary::new(seed::wisdom_entries()),
            subscription: load_snapshot(&store, keys::SUBSCRIPTION).unwrap_or_default(),
            profile: load_snapshot(&store, keys::PROFILE).unwrap_or_default(),
            activity: load_snapshot(&store, keys::ACTIVITY).unwrap_or_default(),
            insights: load_snapshot(&store, keys::INSIGHTS).unwrap_or_default(),
            store,
            config,
        }
    }

    /// First-run seeding plus the day rollover.
    pub fn initialize(&mut self, now: NaiveDateTime) {
        let samples = if self.config.seed_on_first_run {
            seed::sample_disciplines()
        } else {
            Vec::new()
        };
        if self.disciplines.initialize(now, samples) {
            self.activity.log(SYSTEM_CATEGORY, "seed_disciplines", now);
        }
        self.insights.initialize(now);
        self.roll_over(now);
    }

    /// Clear per-day state left over from a previous day.
    fn roll_over(&mut self, now: NaiveDateTime) {
        // initialize with no samples only performs the daily reset
        self.disciplines.initialize(now, Vec::new());
        self.learning.ensure_daily_selection(now.date());
        self.activity.run_daily_analysis(now);
        self.save_all();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn disciplines(&self) -> &DisciplineStore {
        &self.disciplines
    }

    pub fn history(&self) -> &CompletionHistory {
        &self.history
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn learning(&self) -> &LearningFeed {
        &self.learning
    }

    pub fn wisdom(&self) -> &WisdomLibrary {
        &self.wisdom
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.profile()
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn insights(&self) -> &InsightsStore {
        &self.insights
    }

    pub fn today(&mut self, now: NaiveDateTime) -> TodayView {
        self.roll_over(now);
        let date = now.date();

        let disciplines = self
            .disciplines
            .daily_disciplines(date)
            .into_iter()
            .map(|d| DisciplineStatus {
                id: d.id.clone(),
                name: d.name.clone(),
                category: d.category,
                completed: self.disciplines.is_completed(&d.id),
                streak: self.disciplines.streak(&d.id),
                reminder: d.reminder.clone(),
            })
            .collect();

        TodayView {
            date,
            label: format_long_date(date),
            disciplines,
            completion_rate: self.disciplines.completion_rate(date),
            day_streak: self.history.streak_count(date),
            wisdom: self.wisdom.today_entries(date),
            prompt: self.journal.prompt_for_date(date),
            featured_learning: self.learning.featured_items(date),
            journal_written: self.journal.entry_for_date(date).is_some(),
        }
    }

    // -- disciplines ------------------------------------------------------

    pub fn add_discipline(&mut self, new: NewDiscipline, now: NaiveDateTime) -> Result<String> {
        let id = self.disciplines.add(new, now)?;
        self.activity.log("discipline", "add", now);
        self.after_discipline_change(now);
        Ok(id)
    }

    pub fn update_discipline(
        &mut self,
        id: &str,
        patch: DisciplinePatch,
        now: NaiveDateTime,
    ) -> Result<bool> {
        let updated = self.disciplines.update(id, patch, now)?;
        if updated {
            self.after_discipline_change(now);
        }
        Ok(updated)
    }

    pub fn delete_discipline(&mut self, id: &str, now: NaiveDateTime) -> bool {
        let deleted = self.disciplines.delete(id);
        if deleted {
            self.activity.log("discipline", "delete", now);
            self.after_discipline_change(now);
        }
        deleted
    }

    /// Toggle today's completion. Unknown ids change nothing and persist
    /// nothing.
    pub fn toggle_discipline(
        &mut self,
        id: &str,
        completed: bool,
        now: NaiveDateTime,
    ) -> Option<ToggleOutcome> {
        let outcome = self.disciplines.toggle(id, completed, now)?;
        if outcome != ToggleOutcome::Unchanged {
            let action = if completed { "complete" } else { "uncomplete" };
            self.activity.log("discipline", action, now);
        }
        self.after_discipline_change(now);
        Some(outcome)
    }

    fn after_discipline_change(&mut self, now: NaiveDateTime) {
        let date = now.date();
        self.history.record(date, self.disciplines.all_completed(date));
        save_snapshot(&self.store, keys::DISCIPLINES, &self.disciplines);
        save_snapshot(&self.store, keys::HISTORY, &self.history);
        save_snapshot(&self.store, keys::ACTIVITY, &self.activity);
    }

    // -- journal ----------------------------------------------------------

    pub fn write_journal(&mut self, content: &str, now: NaiveDateTime) -> Result<String> {
        let id = self.journal.write_entry(content, now)?;
        self.activity.log("journal", "write", now);
        self.save_journal();
        Ok(id)
    }

    pub fn update_journal_entry(&mut self, id: &str, content: &str, now: NaiveDateTime) -> Result<bool> {
        let updated = self.journal.update_entry(id, content, now)?;
        if updated {
            self.save_journal();
        }
        Ok(updated)
    }

    pub fn delete_journal_entry(&mut self, id: &str) -> bool {
        let deleted = self.journal.delete_entry(id);
        if deleted {
            self.save_journal();
        }
        deleted
    }

    /// Entries the user may browse: the configured number of recent entries
    /// with journal history unlocked, otherwise only today's.
    pub fn visible_journal_entries(&self, now: NaiveDateTime) -> Vec<&JournalEntry> {
        if self.has_feature(PremiumFeature::JournalHistory, now) {
            self.journal
                .recent_entries(self.config.content.recent_journal_entries)
        } else {
            self.journal.entry_for_date(now.date()).into_iter().collect()
        }
    }

    /// Look up an entry, enforcing the journal history lock for past days.
    pub fn journal_entry(&self, id: &str, now: NaiveDateTime) -> Result<Option<&JournalEntry>> {
        let Some(entry) = self.journal.entry(id) else {
            return Ok(None);
        };
        if entry.day() != now.date() {
            self.require(PremiumFeature::JournalHistory, now)?;
        }
        Ok(Some(entry))
    }

    fn save_journal(&self) {
        save_snapshot(&self.store, keys::JOURNAL, &self.journal.entries());
        save_snapshot(&self.store, keys::ACTIVITY, &self.activity);
    }

    // -- learning ---------------------------------------------------------

    /// The day's lesson list, sized by `content.learning_items_per_day`.
    pub fn learning_for_today(&self, now: NaiveDateTime) -> Vec<LearningItem> {
        self.learning
            .items_for_date(now.date(), self.config.content.learning_items_per_day)
    }

    pub fn select_learning_item(&mut self, id: &str, now: NaiveDateTime) -> bool {
        let selected = self.learning.select_item(id, now.date());
        if selected {
            save_snapshot(&self.store, keys::LEARNING, self.learning.progress());
        }
        selected
    }

    pub fn complete_learning_item(&mut self, id: &str, now: NaiveDateTime) -> bool {
        let completed = self.learning.complete_item(id, now.date());
        if completed {
            self.activity.log("learning", "complete", now);
            save_snapshot(&self.store, keys::LEARNING, self.learning.progress());
            save_snapshot(&self.store, keys::ACTIVITY, &self.activity);
        }
        completed
    }

    /// Learning stats, an analytics feature.
    pub fn learning_stats(&self, now: NaiveDateTime) -> Result<LearningStats> {
        self.require(PremiumFeature::Analytics, now)?;
        Ok(self.learning.stats(now.date()))
    }

    // -- insights ---------------------------------------------------------

    /// Up to `limit` insights, newest first.
    pub fn latest_insights(&self, category: Option<&str>, limit: usize) -> Vec<&Insight> {
        self.insights.latest(category, limit)
    }

    pub fn recommendations(&self, category: Option<&str>, limit: usize) -> Vec<&Recommendation> {
        self.insights.recommendations(category, limit)
    }

    pub fn mark_insight_read(&mut self, id: &str) -> bool {
        let marked = self.insights.mark_read(id);
        if marked {
            save_snapshot(&self.store, keys::INSIGHTS, &self.insights);
        }
        marked
    }

    pub fn growth_plan(&self, now: NaiveDateTime) -> Result<Option<&GrowthPlan>> {
        self.require(PremiumFeature::GrowthPlan, now)?;
        Ok(self.insights.growth_plan())
    }

    pub fn update_growth_plan(&mut self, update: GrowthPlanUpdate, now: NaiveDateTime) -> Result<bool> {
        self.require(PremiumFeature::GrowthPlan, now)?;
        let updated = self.insights.update_growth_plan(update, now)?;
        if updated {
            save_snapshot(&self.store, keys::INSIGHTS, &self.insights);
        }
        Ok(updated)
    }

    pub fn complete_plan_step(&mut self, id: &str, now: NaiveDateTime) -> Result<bool> {
        self.require(PremiumFeature::GrowthPlan, now)?;
        let completed = self.insights.complete_plan_step(id, now);
        if completed {
            self.activity.log("growth", "complete_step", now);
            save_snapshot(&self.store, keys::INSIGHTS, &self.insights);
            save_snapshot(&self.store, keys::ACTIVITY, &self.activity);
        }
        Ok(completed)
    }

    pub fn psychological_profile(&self, now: NaiveDateTime) -> Result<Option<&PsychologicalProfile>> {
        self.require(PremiumFeature::PsychologicalProfile, now)?;
        Ok(self.insights.psychological_profile())
    }

    pub fn update_psychological_profile(
        &mut self,
        update: PsychologicalProfileUpdate,
        now: NaiveDateTime,
    ) -> Result<bool> {
        self.require(PremiumFeature::PsychologicalProfile, now)?;
        let updated = self.insights.update_psychological_profile(update, now)?;
        if updated {
            save_snapshot(&self.store, keys::INSIGHTS, &self.insights);
        }
        Ok(updated)
    }

    // -- subscription -----------------------------------------------------

    pub fn has_feature(&self, feature: PremiumFeature, now: NaiveDateTime) -> bool {
        self.subscription.is_feature_available(feature, now)
    }

    fn require(&self, feature: PremiumFeature, now: NaiveDateTime) -> Result<()> {
        if self.has_feature(feature, now) {
            Ok(())
        } else {
            Err(CoreError::PremiumRequired(feature.to_string()))
        }
    }

    pub fn activate_subscription(&mut self, plan_id: &str, now: NaiveDateTime) -> Result<()> {
        self.subscription.activate(plan_id, now)?;
        save_snapshot(&self.store, keys::SUBSCRIPTION, &self.subscription);
        Ok(())
    }

    pub fn deactivate_subscription(&mut self) {
        self.subscription.deactivate();
        save_snapshot(&self.store, keys::SUBSCRIPTION, &self.subscription);
    }

    // -- profile ----------------------------------------------------------

    pub fn create_profile(&mut self, name: &str, bio: Option<&str>, now: NaiveDateTime) -> Result<Profile> {
        let profile = self
            .profile
            .create(name, bio, &self.config.profile, now)?
            .clone();
        save_snapshot(&self.store, keys::PROFILE, &self.profile);
        Ok(profile)
    }

    pub fn update_profile(&mut self, update: ProfileUpdate, now: NaiveDateTime) -> Result<bool> {
        let updated = self.profile.update(update, now)?;
        if updated {
            save_snapshot(&self.store, keys::PROFILE, &self.profile);
        }
        Ok(updated)
    }

    pub fn update_settings(&mut self, settings: SettingsUpdate, now: NaiveDateTime) -> Result<bool> {
        let updated = self.profile.update_settings(settings, now)?;
        if updated {
            save_snapshot(&self.store, keys::PROFILE, &self.profile);
        }
        Ok(updated)
    }

    pub fn reset_profile(&mut self) {
        self.profile.reset();
        save_snapshot(&self.store, keys::PROFILE, &self.profile);
    }

    fn save_all(&self) {
        save_snapshot(&self.store, keys::DISCIPLINES, &self.disciplines);
        save_snapshot(&self.store, keys::HISTORY, &self.history);
        save_snapshot(&self.store, keys::JOURNAL, &self.journal.entries());
        save_snapshot(&self.store, keys::LEARNING, self.learning.progress());
        save_snapshot(&self.store, keys::SUBSCRIPTION, &self.subscription);
        save_snapshot(&self.store, keys::PROFILE, &self.profile);
        save_snapshot(&self.store, keys::ACTIVITY, &self.activity);
        save_snapshot(&self.store, keys::INSIGHTS, &self.insights);
    }
}
