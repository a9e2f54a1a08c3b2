//! # Steadfast Core Library
//!
//! Business logic for Steadfast, a personal-growth tracker built around daily
//! disciplines, journaling and short daily reading. Every operation is
//! available through the standalone CLI; this crate holds all of the state
//! and rules.
//!
//! ## Architecture
//!
//! - **Calendar**: local calendar-day arithmetic and the per-day seed
//! - **Selection**: deterministic per-date content picking, so everyone sees
//!   the same wisdom, prompt and lessons on a given day
//! - **Disciplines**: the weekday scheduling predicate plus an edge-triggered
//!   completion and streak tracker that resets at midnight
//! - **Insights**: static insights and recommendations, plus a premium
//!   growth plan and psychological profile
//! - **Storage**: JSON snapshots in a SQLite key-value table and TOML
//!   configuration
//!
//! ## Key Components
//!
//! - [`App`]: owns all stores and persists them
//! - [`DisciplineStore`] and [`CompletionTracker`]: habits and streaks
//! - [`select_for_date`] and [`select_one_for_date`]: the two selection
//!   strategies
//! - [`Config`]: application configuration management

pub mod activity;
pub mod app;
pub mod calendar;
pub mod discipline;
pub mod error;
pub mod history;
pub mod insights;
pub mod journal;
pub mod learning;
pub mod profile;
pub mod seed;
pub mod selection;
pub mod storage;
pub mod subscription;
pub mod wisdom;

pub use activity::{ActivityLog, ActivityStats};
pub use app::{App, DisciplineStatus, TodayView};
pub use discipline::tracker::ToggleOutcome;
pub use discipline::{
    CompletionTracker, Discipline, DisciplineCategory, DisciplinePatch, DisciplineStore,
    Frequency, NewDiscipline,
};
pub use error::{ConfigError, CoreError, DatabaseError, DateError, ValidationError};
pub use history::CompletionHistory;
pub use insights::{
    GrowthPlan, GrowthPlanUpdate, Insight, InsightsStore, PsychologicalProfile,
    PsychologicalProfileUpdate, Recommendation,
};
pub use journal::{Journal, JournalEntry, JournalPrompt};
pub use learning::{LearningFeed, LearningItem, LearningStats};
pub use profile::{Profile, ProfileUpdate, SettingsUpdate, Theme};
pub use selection::{select_for_date, select_one_for_date, DayRng};
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
pub use subscription::{PremiumFeature, Subscription, SubscriptionTier};
pub use wisdom::{WisdomEntry, WisdomLibrary, WisdomType};
