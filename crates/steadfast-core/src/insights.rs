//! Insights, recommendations, the psychological profile and the growth plan.
//!
//! All of it is static seed content. Nothing here analyses user data: the
//! store only filters, orders and applies user edits.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Observation,
    Recommendation,
    Alert,
    Challenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Positive,
    Neutral,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: InsightKind,
    pub severity: Severity,
    /// Areas this insight talks about; the category filter matches these.
    pub related_areas: Vec<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub action_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub estimated_minutes: u32,
    pub benefits: Vec<String>,
    pub related_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychologicalProfile {
    pub id: String,
    /// Big-five style trait scores in `[0, 1]`.
    pub traits: BTreeMap<String, f64>,
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    pub challenges: Vec<String>,
    pub motivations: Vec<String>,
    pub learning_style: String,
    pub emotional_state: String,
    pub motivation_level: String,
    pub resilience_level: String,
    pub consistency_level: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Profile edits. Trait scores are merged key by key; other fields replace.
#[derive(Debug, Clone, Default)]
pub struct PsychologicalProfileUpdate {
    pub traits: Option<BTreeMap<String, f64>>,
    pub strengths: Option<Vec<String>>,
    pub growth_areas: Option<Vec<String>>,
    pub challenges: Option<Vec<String>>,
    pub motivations: Option<Vec<String>>,
    pub learning_style: Option<String>,
    pub emotional_state: Option<String>,
}

/// A milestone or a challenge inside the growth plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPlan {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Fraction of steps done, in `[0, 1]`.
    pub progress: f64,
    pub focus_areas: Vec<String>,
    pub milestones: Vec<PlanStep>,
    pub challenges: Vec<PlanStep>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl GrowthPlan {
    fn steps_mut(&mut self) -> impl Iterator<Item = &mut PlanStep> {
        self.milestones.iter_mut().chain(self.challenges.iter_mut())
    }

    fn recompute_progress(&mut self) {
        let total = self.milestones.len() + self.challenges.len();
        if total == 0 {
            return;
        }
        let done = self
            .milestones
            .iter()
            .chain(&self.challenges)
            .filter(|s| s.is_completed)
            .count();
        self.progress = done as f64 / total as f64;
    }
}

#[derive(Debug, Clone, Default)]
pub struct GrowthPlanUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<f64>,
    pub focus_areas: Option<Vec<String>>,
}

/// Persisted insights state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsStore {
    #[serde(default)]
    insights: Vec<Insight>,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
    #[serde(default)]
    psychological_profile: Option<PsychologicalProfile>,
    #[serde(default)]
    growth_plan: Option<GrowthPlan>,
}

impl InsightsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every empty part from seed content built around `now`.
    ///
    /// Returns true when anything was seeded.
    pub fn initialize(&mut self, now: NaiveDateTime) -> bool {
        let mut seeded = false;
        if self.insights.is_empty() {
            self.insights = crate::seed::insights(now);
            seeded = true;
        }
        if self.recommendations.is_empty() {
            self.recommendations = crate::seed::recommendations();
            seeded = true;
        }
        if self.psychological_profile.is_none() {
            self.psychological_profile = Some(crate::seed::psychological_profile(now));
            seeded = true;
        }
        if self.growth_plan.is_none() {
            self.growth_plan = Some(crate::seed::growth_plan(now));
            seeded = true;
        }
        if seeded {
            tracing::info!("seeded insights content");
        }
        seeded
    }

    /// Up to `limit` insights, newest first, optionally only those touching
    /// `category`.
    pub fn latest(&self, category: Option<&str>, limit: usize) -> Vec<&Insight> {
        let mut found: Vec<&Insight> = self
            .insights
            .iter()
            .filter(|i| category.map_or(true, |c| i.related_areas.iter().any(|a| a == c)))
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit);
        found
    }

    /// Up to `limit` recommendations in catalog order.
    pub fn recommendations(&self, category: Option<&str>, limit: usize) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .take(limit)
            .collect()
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.insights.iter_mut().find(|i| i.id == id) {
            Some(insight) => {
                insight.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn unread_count(&self) -> usize {
        self.insights.iter().filter(|i| !i.is_read).count()
    }

    pub fn psychological_profile(&self) -> Option<&PsychologicalProfile> {
        self.psychological_profile.as_ref()
    }

    pub fn growth_plan(&self) -> Option<&GrowthPlan> {
        self.growth_plan.as_ref()
    }

    /// Apply `update` to the profile. `Ok(false)` when there is none.
    pub fn update_psychological_profile(
        &mut self,
        update: PsychologicalProfileUpdate,
        now: NaiveDateTime,
    ) -> Result<bool> {
        let Some(profile) = self.psychological_profile.as_mut() else {
            return Ok(false);
        };
        if let Some(traits) = update.traits {
            for (name, score) in &traits {
                check_fraction(&format!("traits.{name}"), *score)?;
            }
            profile.traits.extend(traits);
        }
        if let Some(strengths) = update.strengths {
            profile.strengths = strengths;
        }
        if let Some(growth_areas) = update.growth_areas {
            profile.growth_areas = growth_areas;
        }
        if let Some(challenges) = update.challenges {
            profile.challenges = challenges;
        }
        if let Some(motivations) = update.motivations {
            profile.motivations = motivations;
        }
        if let Some(style) = update.learning_style {
            profile.learning_style = style;
        }
        if let Some(state) = update.emotional_state {
            profile.emotional_state = state;
        }
        profile.updated_at = now;
        Ok(true)
    }

    /// Apply `update` to the plan. `Ok(false)` when there is none.
    pub fn update_growth_plan(&mut self, update: GrowthPlanUpdate, now: NaiveDateTime) -> Result<bool> {
        let Some(plan) = self.growth_plan.as_mut() else {
            return Ok(false);
        };
        if let Some(progress) = update.progress {
            check_fraction("progress", progress)?;
            plan.progress = progress;
        }
        if let Some(title) = update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(ValidationError::EmptyField("title".into()).into());
            }
            plan.title = title.to_string();
        }
        if let Some(description) = update.description {
            plan.description = description;
        }
        if let Some(areas) = update.focus_areas {
            plan.focus_areas = areas;
        }
        plan.updated_at = now;
        Ok(true)
    }

    /// Mark a milestone or challenge done and recompute plan progress.
    /// Unknown or already completed steps return false.
    pub fn complete_plan_step(&mut self, id: &str, now: NaiveDateTime) -> bool {
        let Some(plan) = self.growth_plan.as_mut() else {
            return false;
        };
        let Some(step) = plan.steps_mut().find(|s| s.id == id) else {
            return false;
        };
        if step.is_completed {
            return false;
        }
        step.is_completed = true;
        step.completed_date = Some(now.date());
        plan.recompute_progress();
        plan.updated_at = now;
        tracing::debug!(id, progress = plan.progress, "growth plan step completed");
        true
    }
}

fn check_fraction(field: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{value} is not between 0 and 1"),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn seeded() -> InsightsStore {
        let mut store = InsightsStore::new();
        assert!(store.initialize(at(15, 8)));
        store
    }

    #[test]
    fn initialize_only_fills_empty_parts() {
        let mut store = seeded();
        store.mark_read("insight1");
        assert!(!store.initialize(at(16, 8)));
        assert!(store.latest(None, 10).iter().any(|i| i.id == "insight1" && i.is_read));
    }

    #[test]
    fn latest_is_newest_first_and_limited() {
        let store = seeded();
        let all = store.latest(None, 10);
        assert_eq!(all.len(), 6);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(all[0].id, "insight3");

        assert_eq!(store.latest(None, 2).len(), 2);
        assert!(store.latest(None, 0).is_empty());
    }

    #[test]
    fn latest_filters_by_related_area() {
        let store = seeded();
        let learning = store.latest(Some("learning"), 10);
        assert_eq!(learning.len(), 2);
        assert!(learning
            .iter()
            .all(|i| i.related_areas.iter().any(|a| a == "learning")));
        assert!(store.latest(Some("nothing"), 10).is_empty());
    }

    #[test]
    fn recommendations_keep_catalog_order() {
        let store = seeded();
        let ids: Vec<&str> = store
            .recommendations(Some("discipline"), 5)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["rec1", "rec2", "rec4"]);
        assert_eq!(store.recommendations(None, 5).len(), 5);
        assert_eq!(store.recommendations(None, 3).len(), 3);
    }

    #[test]
    fn mark_read_updates_unread_count() {
        let mut store = seeded();
        let unread = store.unread_count();
        assert!(store.mark_read("insight2"));
        assert_eq!(store.unread_count(), unread - 1);
        assert!(!store.mark_read("missing"));
    }

    #[test]
    fn profile_update_merges_traits_and_validates() {
        let mut store = seeded();
        let update = PsychologicalProfileUpdate {
            traits: Some(BTreeMap::from([("openness".to_string(), 0.9)])),
            learning_style: Some("reading".into()),
            ..Default::default()
        };
        assert!(store.update_psychological_profile(update, at(15, 9)).unwrap());
        let profile = store.psychological_profile().unwrap();
        assert_eq!(profile.traits["openness"], 0.9);
        assert_eq!(profile.traits["conscientiousness"], 0.8);
        assert_eq!(profile.learning_style, "reading");
        assert_eq!(profile.updated_at, at(15, 9));

        let bad = PsychologicalProfileUpdate {
            traits: Some(BTreeMap::from([("openness".to_string(), 1.5)])),
            ..Default::default()
        };
        assert!(store.update_psychological_profile(bad, at(15, 10)).is_err());
        assert_eq!(store.psychological_profile().unwrap().traits["openness"], 0.9);

        let mut empty = InsightsStore::new();
        assert!(!empty
            .update_psychological_profile(PsychologicalProfileUpdate::default(), at(15, 9))
            .unwrap());
    }

    #[test]
    fn plan_update_validates_progress_and_title() {
        let mut store = seeded();
        let update = GrowthPlanUpdate {
            progress: Some(0.5),
            ..Default::default()
        };
        assert!(store.update_growth_plan(update, at(15, 9)).unwrap());
        assert_eq!(store.growth_plan().unwrap().progress, 0.5);

        let too_far = GrowthPlanUpdate {
            progress: Some(-0.1),
            ..Default::default()
        };
        assert!(store.update_growth_plan(too_far, at(15, 9)).is_err());
        let blank = GrowthPlanUpdate {
            title: Some("  ".into()),
            ..Default::default()
        };
        assert!(store.update_growth_plan(blank, at(15, 9)).is_err());
    }

    #[test]
    fn completing_steps_moves_progress() {
        let mut store = seeded();
        let plan = store.growth_plan().unwrap();
        let total = (plan.milestones.len() + plan.challenges.len()) as f64;
        assert_eq!(plan.end_date, NaiveDate::from_ymd_opt(2023, 7, 15).unwrap());

        assert!(store.complete_plan_step("milestone1", at(16, 9)));
        assert!(store.complete_plan_step("challenge2", at(16, 10)));
        assert!(!store.complete_plan_step("milestone1", at(17, 9)));
        assert!(!store.complete_plan_step("missing", at(17, 9)));

        let plan = store.growth_plan().unwrap();
        assert_eq!(plan.progress, 2.0 / total);
        assert_eq!(
            plan.milestones[0].completed_date,
            NaiveDate::from_ymd_opt(2023, 6, 16)
        );
    }

    #[test]
    fn snapshot_survives_serde() {
        let store = seeded();
        let json = serde_json::to_string(&store).unwrap();
        let back: InsightsStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }
}
