use serde::{Serialize, Serializer};
use shub_domain::constants::ALL_FEATURES;
use shub_domain::features::{FeatureId, FeatureSet};
use std::fmt;

/// Why a feature was refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Denial {
    /// No subscription, or the subscription is not active.
    SubscriptionRequired,
    /// The subscription is active but its plan does not list the feature.
    NotInPlan { feature: FeatureId },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubscriptionRequired => f.write_str("Active subscription required"),
            Self::NotInPlan { feature } => {
                write!(f, "Feature \"{feature}\" not included in your current plan")
            },
        }
    }
}

impl From<Denial> for String {
    fn from(denial: Denial) -> Self {
        denial.to_string()
    }
}

/// Outcome of a single access check.
///
/// Serializes to `{ "hasAccess": bool, "reason"?: string, "upgradeRequired"?: bool }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResult {
    pub has_access: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Denial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_required: Option<bool>,
}

impl AccessResult {
    #[must_use]
    pub const fn granted() -> Self {
        Self { has_access: true, reason: None, upgrade_required: None }
    }

    /// Every denial the policy produces can be lifted by a plan upgrade.
    #[must_use]
    pub const fn denied(reason: Denial) -> Self {
        Self { has_access: false, reason: Some(reason), upgrade_required: Some(true) }
    }

    /// Human-readable reason, present only on denial.
    #[must_use]
    pub fn reason_text(&self) -> Option<String> {
        self.reason.as_ref().map(ToString::to_string)
    }
}

/// Features a user may use, as listed to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessibleFeatures {
    /// Everything; listed as the single sentinel `"all"`.
    All,
    Only(FeatureSet),
}

impl AccessibleFeatures {
    #[must_use]
    pub fn contains(&self, feature: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => set.contains(feature),
        }
    }

    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Self::All => vec![ALL_FEATURES.to_owned()],
            Self::Only(set) => set.to_strings(),
        }
    }
}

impl Serialize for AccessibleFeatures {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.to_strings())
    }
}
