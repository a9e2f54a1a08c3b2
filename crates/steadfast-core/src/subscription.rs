//! Subscription tier gating.
//!
//! There is no payment integration: activating a plan simply records the
//! premium tier with an expiry one billing period out.

use chrono::{Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPeriod {
    Month,
    Year,
}

impl PlanPeriod {
    fn months(&self) -> u32 {
        match self {
            PlanPeriod::Month => 1,
            PlanPeriod::Year => 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub period: PlanPeriod,
    pub features: Vec<String>,
}

/// Features locked behind the premium tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumFeature {
    JournalHistory,
    EnhancedLearning,
    Analytics,
    UnlimitedDisciplines,
    GrowthPlan,
    PsychologicalProfile,
}

impl PremiumFeature {
    pub const ALL: [PremiumFeature; 6] = [
        PremiumFeature::JournalHistory,
        PremiumFeature::EnhancedLearning,
        PremiumFeature::Analytics,
        PremiumFeature::UnlimitedDisciplines,
        PremiumFeature::GrowthPlan,
        PremiumFeature::PsychologicalProfile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PremiumFeature::JournalHistory => "journal_history",
            PremiumFeature::EnhancedLearning => "enhanced_learning",
            PremiumFeature::Analytics => "analytics",
            PremiumFeature::UnlimitedDisciplines => "unlimited_disciplines",
            PremiumFeature::GrowthPlan => "growth_plan",
            PremiumFeature::PsychologicalProfile => "psychological_profile",
        }
    }
}

impl fmt::Display for PremiumFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PremiumFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown feature: {s}"))
    }
}

fn premium_features() -> Vec<String> {
    [
        "Full journal history access",
        "Enhanced learning content",
        "Growth analytics",
        "Unlimited disciplines",
        "Personalized growth plan",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// The plans on offer.
pub fn plans() -> Vec<SubscriptionPlan> {
    let mut yearly_features = premium_features();
    yearly_features.push("20% savings vs monthly plan".into());

    vec![
        SubscriptionPlan {
            id: "monthly".into(),
            name: "Monthly Premium".into(),
            description: "Full access to all premium features".into(),
            price: "$4.99".into(),
            period: PlanPeriod::Month,
            features: premium_features(),
        },
        SubscriptionPlan {
            id: "yearly".into(),
            name: "Annual Premium".into(),
            description: "Full access with 20% savings".into(),
            price: "$47.99".into(),
            period: PlanPeriod::Year,
            features: yearly_features,
        },
    ]
}

/// Current subscription state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub tier: SubscriptionTier,
    pub is_active: bool,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub purchased_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub expires_at: Option<NaiveDateTime>,
}

impl Subscription {
    /// Switch to premium on `plan_id`, expiring one period after `now`.
    pub fn activate(&mut self, plan_id: &str, now: NaiveDateTime) -> Result<()> {
        let plan = plans()
            .into_iter()
            .find(|p| p.id == plan_id)
            .ok_or_else(|| ValidationError::UnknownId {
                kind: "plan".into(),
                id: plan_id.to_string(),
            })?;
        let expires_at = now
            .checked_add_months(Months::new(plan.period.months()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "expires_at".into(),
                message: "expiry out of range".into(),
            })?;

        *self = Subscription {
            tier: SubscriptionTier::Premium,
            is_active: true,
            plan_id: Some(plan.id),
            purchased_at: Some(now),
            expires_at: Some(expires_at),
        };
        tracing::info!(plan = plan_id, %expires_at, "subscription activated");
        Ok(())
    }

    /// Back to the free tier.
    pub fn deactivate(&mut self) {
        *self = Subscription::default();
    }

    pub fn is_premium(&self, now: NaiveDateTime) -> bool {
        self.tier == SubscriptionTier::Premium
            && self.is_active
            && self.expires_at.map_or(true, |expiry| now < expiry)
    }

    /// Whether `feature` is unlocked at `now`.
    pub fn is_feature_available(&self, feature: PremiumFeature, now: NaiveDateTime) -> bool {
        let available = self.is_premium(now);
        tracing::trace!(%feature, available, "premium feature check");
        available
    }
}
