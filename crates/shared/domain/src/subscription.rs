use crate::constants::DEFAULT_CURRENCY;
use crate::features::FeatureSet;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// A purchasable plan. Prices are in minor units (cents), durations in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub duration: u32,
    #[serde(default)]
    pub features: FeatureSet,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// Lifecycle state of a user subscription record.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubscriptionState {
    #[default]
    Active,
    Cancelled,
    Expired,
    Paused,
}

/// A user's subscription to a plan. Timestamps are UNIX seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscription {
    pub id: String,
    pub user_id: String,
    pub plan_id: String,
    #[serde(default)]
    pub status: SubscriptionState,
    pub start_date: i64,
    pub end_date: i64,
    #[serde(default = "default_true")]
    pub auto_renew: bool,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// Snapshot of a user's subscription as the rest of the platform sees it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub subscription: Option<UserSubscription>,
    pub is_active: bool,
    pub days_remaining: u32,
    pub features: FeatureSet,
}

impl SubscriptionStatus {
    /// Status of a user without any subscription record.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the plan lists `feature`. Says nothing about activity.
    #[must_use]
    pub fn includes(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_owned()
}

const fn default_true() -> bool {
    true
}
