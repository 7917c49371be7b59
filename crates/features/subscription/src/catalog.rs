use shub_domain::config::AppConfig;
use shub_domain::constants::{
    ADVANCED_ANALYTICS, DEFAULT_CURRENCY, LIVE_SESSIONS, MATERIALS_ACCESS, PRIORITY_SUPPORT,
    TUTOR_SUPPORT, UNLIMITED_CHAT,
};
use shub_domain::features::FeatureSet;
use shub_domain::subscription::SubscriptionPlan;

pub const BASIC_PLAN: &str = "basic-plan";
pub const PREMIUM_PLAN: &str = "premium-plan";
pub const YEARLY_PLAN: &str = "yearly-plan";

/// The set of plans users can subscribe to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog {
    plans: Vec<SubscriptionPlan>,
}

impl PlanCatalog {
    #[must_use]
    pub const fn new(plans: Vec<SubscriptionPlan>) -> Self {
        Self { plans }
    }

    /// Configured plans, or the stock catalog when the config has none.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        config.plans.clone().map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SubscriptionPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// A plan that exists and is still offered.
    #[must_use]
    pub fn find_active(&self, id: &str) -> Option<&SubscriptionPlan> {
        self.get(id).filter(|p| p.is_active)
    }

    pub fn active_plans(&self) -> impl Iterator<Item = &SubscriptionPlan> {
        self.plans.iter().filter(|p| p.is_active)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        let basic = [UNLIMITED_CHAT, TUTOR_SUPPORT, MATERIALS_ACCESS];
        let premium = [LIVE_SESSIONS, PRIORITY_SUPPORT];

        Self::new(vec![
            stock_plan(BASIC_PLAN, "Basic Plan", "Access to basic features", 999, 30, basic.iter()),
            stock_plan(
                PREMIUM_PLAN,
                "Premium Plan",
                "Full access to all features",
                1999,
                30,
                basic.iter().chain(&premium),
            ),
            stock_plan(
                YEARLY_PLAN,
                "Yearly Plan",
                "Premium features for a year",
                19999,
                365,
                basic.iter().chain(&premium).chain(&[ADVANCED_ANALYTICS]),
            ),
        ])
    }
}

fn stock_plan<'a>(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    duration: u32,
    features: impl Iterator<Item = &'a &'static str>,
) -> SubscriptionPlan {
    SubscriptionPlan {
        id: id.to_owned(),
        name: name.to_owned(),
        description: Some(description.to_owned()),
        price,
        currency: DEFAULT_CURRENCY.to_owned(),
        duration,
        features: features.copied().collect::<FeatureSet>(),
        is_active: true,
        created_at: None,
    }
}
