//! User profile and personal settings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::storage::ProfileDefaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    pub notifications: bool,
    /// Days per week the user aims to complete all disciplines.
    pub streak_goal: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields a user may change after onboarding. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub streak_goal: Option<u32>,
}

/// Persisted profile slot; empty until onboarding completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSlot {
    #[serde(default)]
    profile: Option<Profile>,
}

impl ProfileSlot {
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_onboarded(&self) -> bool {
        self.profile.is_some()
    }

    /// Create (or replace) the profile.
    pub fn create(
        &mut self,
        name: &str,
        bio: Option<&str>,
        defaults: &ProfileDefaults,
        now: NaiveDateTime,
    ) -> Result<&Profile> {
        let name = required_name(name)?;
        let profile = self.profile.insert(Profile {
            id: Uuid::new_v4().to_string(),
            name,
            bio: bio.unwrap_or_default().trim().to_string(),
            avatar: None,
            theme: Theme::default(),
            notifications: defaults.notifications,
            streak_goal: defaults.streak_goal,
            created_at: now,
            updated_at: now,
        });
        Ok(profile)
    }

    /// Apply `update`. Without a profile this is a no-op returning `Ok(false)`.
    pub fn update(&mut self, update: ProfileUpdate, now: NaiveDateTime) -> Result<bool> {
        let Some(profile) = self.profile.as_mut() else {
            return Ok(false);
        };
        if let Some(name) = update.name {
            profile.name = required_name(&name)?;
        }
        if let Some(bio) = update.bio {
            profile.bio = bio.trim().to_string();
        }
        if let Some(avatar) = update.avatar {
            profile.avatar = Some(avatar);
        }
        profile.updated_at = now;
        Ok(true)
    }

    /// Apply `settings`. Without a profile this is a no-op returning `Ok(false)`.
    pub fn update_settings(&mut self, settings: SettingsUpdate, now: NaiveDateTime) -> Result<bool> {
        let Some(profile) = self.profile.as_mut() else {
            return Ok(false);
        };
        if let Some(goal) = settings.streak_goal {
            if !(1..=7).contains(&goal) {
                return Err(ValidationError::InvalidValue {
                    field: "streak_goal".into(),
                    message: format!("{goal} is not between 1 and 7"),
                }
                .into());
            }
            profile.streak_goal = goal;
        }
        if let Some(theme) = settings.theme {
            profile.theme = theme;
        }
        if let Some(notifications) = settings.notifications {
            profile.notifications = notifications;
        }
        profile.updated_at = now;
        Ok(true)
    }

    pub fn reset(&mut self) {
        self.profile = None;
    }
}

fn required_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyField("name".into()).into());
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn create_applies_defaults() {
        let mut slot = ProfileSlot::default();
        assert!(!slot.is_onboarded());
        let profile = slot
            .create(" Sam ", None, &ProfileDefaults::default(), at(8))
            .unwrap();
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.streak_goal, 5);
        assert_eq!(profile.theme, Theme::Dark);
        assert!(slot.is_onboarded());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut slot = ProfileSlot::default();
        assert!(slot.create("  ", None, &ProfileDefaults::default(), at(8)).is_err());
        assert!(!slot.is_onboarded());
    }

    #[test]
    fn updates_without_profile_are_noops() {
        let mut slot = ProfileSlot::default();
        assert!(!slot.update(ProfileUpdate::default(), at(9)).unwrap());
        assert!(!slot.update_settings(SettingsUpdate::default(), at(9)).unwrap());
    }

    #[test]
    fn settings_validate_streak_goal() {
        let mut slot = ProfileSlot::default();
        slot.create("Sam", Some("bio"), &ProfileDefaults::default(), at(8))
            .unwrap();
        let bad = SettingsUpdate {
            streak_goal: Some(9),
            ..Default::default()
        };
        assert!(slot.update_settings(bad, at(9)).is_err());

        let good = SettingsUpdate {
            streak_goal: Some(3),
            theme: Some(Theme::Light),
            notifications: Some(false),
        };
        assert!(slot.update_settings(good, at(10)).unwrap());
        let profile = slot.profile().unwrap();
        assert_eq!(profile.streak_goal, 3);
        assert_eq!(profile.theme, Theme::Light);
        assert!(!profile.notifications);
        assert_eq!(profile.updated_at, at(10));
    }

    #[test]
    fn update_and_reset() {
        let mut slot = ProfileSlot::default();
        slot.create("Sam", None, &ProfileDefaults::default(), at(8))
            .unwrap();
        let update = ProfileUpdate {
            bio: Some("  growing ".into()),
            ..Default::default()
        };
        assert!(slot.update(update, at(9)).unwrap());
        assert_eq!(slot.profile().unwrap().bio, "growing");
        slot.reset();
        assert!(slot.profile().is_none());
    }
}
