use shub_domain::subscription::SubscriptionStatus;

/// Source of subscription state consulted by the policy.
///
/// Implementors expose the current subscription snapshot; `has_feature` defaults to
/// "present, active, and the plan lists the feature".
pub trait FeatureProvider {
    fn subscription(&self) -> Option<&SubscriptionStatus>;

    fn has_feature(&self, feature: &str) -> bool {
        self.subscription().is_some_and(|s| s.is_active && s.includes(feature))
    }

    /// Whether an active subscription is present.
    fn is_subscribed(&self) -> bool {
        self.subscription().is_some_and(|s| s.is_active)
    }
}

impl FeatureProvider for SubscriptionStatus {
    fn subscription(&self) -> Option<&SubscriptionStatus> {
        Some(self)
    }
}

impl FeatureProvider for Option<SubscriptionStatus> {
    fn subscription(&self) -> Option<&SubscriptionStatus> {
        self.as_ref()
    }
}

impl<P: FeatureProvider + ?Sized> FeatureProvider for &P {
    fn subscription(&self) -> Option<&SubscriptionStatus> {
        (**self).subscription()
    }

    fn has_feature(&self, feature: &str) -> bool {
        (**self).has_feature(feature)
    }

    fn is_subscribed(&self) -> bool {
        (**self).is_subscribed()
    }
}

/// Provider for callers with no subscription data at all (signed out, not loaded yet).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoSubscription;

impl FeatureProvider for NoSubscription {
    fn subscription(&self) -> Option<&SubscriptionStatus> {
        None
    }
}
