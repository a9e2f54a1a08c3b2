//! Disciplines: recurring habits with a weekday schedule.
//!
//! A discipline is active on a date when its frequency is `Daily`, or when the
//! date's weekday index (0=Sun ... 6=Sat) is in its `scheduled_days`. `Weekly`
//! and `Custom` are evaluated the same way; they only differ in the day set a
//! new discipline starts with.

pub mod store;
pub mod tracker;

pub use store::{DisciplinePatch, DisciplineStore, NewDiscipline};
pub use tracker::CompletionTracker;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::calendar::weekday_index;

/// How often a discipline recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every day, whatever `scheduled_days` holds.
    Daily,
    /// On the scheduled days; starts out on Sunday.
    Weekly,
    /// On the scheduled days; starts out on weekdays.
    Custom,
}

impl Frequency {
    /// Day set a newly created discipline starts with.
    pub fn default_days(&self) -> BTreeSet<u8> {
        match self {
            Frequency::Daily => (0..7).collect(),
            Frequency::Weekly => BTreeSet::from([0]),
            Frequency::Custom => (1..=5).collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Custom => "custom",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "custom" => Ok(Frequency::Custom),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

/// Area of life a discipline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisciplineCategory {
    Physical,
    Mental,
    Emotional,
    Spiritual,
    Social,
    Professional,
    Financial,
    Creative,
    #[default]
    Other,
}

impl DisciplineCategory {
    pub const ALL: [DisciplineCategory; 9] = [
        DisciplineCategory::Physical,
        DisciplineCategory::Mental,
        DisciplineCategory::Emotional,
        DisciplineCategory::Spiritual,
        DisciplineCategory::Social,
        DisciplineCategory::Professional,
        DisciplineCategory::Financial,
        DisciplineCategory::Creative,
        DisciplineCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisciplineCategory::Physical => "physical",
            DisciplineCategory::Mental => "mental",
            DisciplineCategory::Emotional => "emotional",
            DisciplineCategory::Spiritual => "spiritual",
            DisciplineCategory::Social => "social",
            DisciplineCategory::Professional => "professional",
            DisciplineCategory::Financial => "financial",
            DisciplineCategory::Creative => "creative",
            DisciplineCategory::Other => "other",
        }
    }
}

impl fmt::Display for DisciplineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisciplineCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// A recurring habit tracked once per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: DisciplineCategory,
    pub frequency: Frequency,
    /// Weekday indices, 0=Sun ... 6=Sat.
    #[serde(default)]
    pub scheduled_days: BTreeSet<u8>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Reminder time as `HH:MM`.
    #[serde(default)]
    pub reminder: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub last_completed_at: Option<NaiveDateTime>,
}

impl Discipline {
    /// Whether the discipline applies on `date`. Time of day is ignored.
    ///
    /// A non-daily discipline with no scheduled days is never active.
    pub fn is_active_on(&self, date: impl Datelike) -> bool {
        is_active_on(self.frequency, &self.scheduled_days, date)
    }
}

/// Scheduling predicate shared by disciplines and anything else with a
/// frequency and a weekday set.
pub fn is_active_on(frequency: Frequency, scheduled_days: &BTreeSet<u8>, date: impl Datelike) -> bool {
    match frequency {
        Frequency::Daily => true,
        Frequency::Weekly | Frequency::Custom => scheduled_days.contains(&weekday_index(date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn discipline(frequency: Frequency, days: &[u8]) -> Discipline {
        let created = ymd(2023, 1, 1).and_hms_opt(8, 0, 0).unwrap();
        Discipline {
            id: "d1".into(),
            name: "Exercise".into(),
            description: None,
            category: DisciplineCategory::Physical,
            frequency,
            scheduled_days: days.iter().copied().collect(),
            duration_minutes: Some(30),
            reminder: Some("17:00".into()),
            created_at: created,
            updated_at: created,
            last_completed_at: None,
        }
    }

    #[test]
    fn daily_is_active_regardless_of_days() {
        let d = discipline(Frequency::Daily, &[]);
        let start = ymd(2023, 6, 11);
        for offset in 0..14 {
            assert!(d.is_active_on(start + Duration::days(offset)));
        }
    }

    #[test]
    fn custom_mon_wed_fri() {
        let d = discipline(Frequency::Custom, &[1, 3, 5]);
        // 2023-06-11 is a Sunday
        let expected = [false, true, false, true, false, true, false];
        for (offset, want) in expected.iter().enumerate() {
            let date = ymd(2023, 6, 11) + Duration::days(offset as i64);
            assert_eq!(d.is_active_on(date), *want, "{date}");
        }
    }

    #[test]
    fn weekly_and_custom_evaluate_identically() {
        let weekly = discipline(Frequency::Weekly, &[0, 6]);
        let custom = discipline(Frequency::Custom, &[0, 6]);
        for offset in 0..7 {
            let date = ymd(2023, 6, 11) + Duration::days(offset);
            assert_eq!(weekly.is_active_on(date), custom.is_active_on(date));
        }
    }

    #[test]
    fn non_daily_without_days_is_never_active() {
        let d = discipline(Frequency::Weekly, &[]);
        for offset in 0..7 {
            assert!(!d.is_active_on(ymd(2023, 6, 11) + Duration::days(offset)));
        }
    }

    #[test]
    fn time_of_day_is_ignored() {
        let d = discipline(Frequency::Custom, &[4]);
        let thursday = ymd(2023, 6, 15);
        assert!(d.is_active_on(thursday.and_hms_opt(0, 0, 0).unwrap()));
        assert!(d.is_active_on(thursday.and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn default_days_per_frequency() {
        assert_eq!(Frequency::Daily.default_days().len(), 7);
        assert_eq!(Frequency::Weekly.default_days(), BTreeSet::from([0]));
        assert_eq!(Frequency::Custom.default_days(), BTreeSet::from([1, 2, 3, 4, 5]));
    }

    #[test]
    fn category_and_frequency_parse() {
        assert_eq!("Spiritual".parse::<DisciplineCategory>(), Ok(DisciplineCategory::Spiritual));
        assert!("hobby".parse::<DisciplineCategory>().is_err());
        assert_eq!("WEEKLY".parse::<Frequency>(), Ok(Frequency::Weekly));
    }

    #[test]
    fn discipline_serialization() {
        let d = discipline(Frequency::Custom, &[1, 3, 5]);
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"frequency\":\"custom\""));
        let decoded: Discipline = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, d);
    }
}
