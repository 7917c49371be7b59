//! Decision order, first match wins:
//!
//! 1. admins and lecturers get everything;
//! 2. tutors get the tutor workspace features;
//! 3. anything the provider reports as included is granted;
//! 4. without an active subscription: `Active subscription required`;
//! 5. otherwise the plan does not list the feature.

use crate::error::AccessError;
use crate::provider::FeatureProvider;
use crate::result::{AccessResult, AccessibleFeatures, Denial};
use shub_domain::constants::TUTOR_FEATURES;
use shub_domain::features::{FeatureId, FeatureSet};
use shub_domain::role::Role;
use shub_domain::subscription::SubscriptionStatus;
use tracing::{debug, trace};

/// Decides whether `role` may use `feature` given the provider's subscription state.
pub fn evaluate<P>(role: Role, provider: &P, feature: &str) -> AccessResult
where
    P: FeatureProvider + ?Sized,
{
    let result = if role.is_privileged() || (role == Role::Tutor && is_tutor_feature(feature)) {
        AccessResult::granted()
    } else {
        by_subscription(provider, feature)
    };

    match &result.reason {
        None => trace!(%role, feature, "Feature access granted"),
        Some(denial) => debug!(%role, feature, reason = %denial, "Feature access denied"),
    }

    result
}

/// Lists what `role` can use, following the same precedence as [`evaluate`].
pub fn accessible_features<P>(role: Role, provider: &P) -> AccessibleFeatures
where
    P: FeatureProvider + ?Sized,
{
    if role.is_privileged() {
        AccessibleFeatures::All
    } else if role == Role::Tutor {
        AccessibleFeatures::Only(FeatureSet::tutor())
    } else {
        AccessibleFeatures::Only(
            provider.subscription().map(|s| s.features.clone()).unwrap_or_default(),
        )
    }
}

/// Strict form of [`evaluate`].
///
/// # Errors
/// Returns [`AccessError::AccessDenied`] carrying the denial reason when access is refused.
pub fn require_access<P>(role: Role, provider: &P, feature: &str) -> Result<(), AccessError>
where
    P: FeatureProvider + ?Sized,
{
    match evaluate(role, provider, feature).reason {
        None => Ok(()),
        Some(reason) => Err(AccessError::AccessDenied { reason, context: None }),
    }
}

/// Role gate for operations restricted to some roles, independent of any subscription.
///
/// # Errors
/// Returns [`AccessError::RoleRequired`] when `role` is not in `allowed`.
pub fn require_role(role: Role, allowed: &[Role]) -> Result<(), AccessError> {
    if allowed.contains(&role) {
        return Ok(());
    }

    debug!(%role, ?allowed, "Role gate refused");
    Err(AccessError::RoleRequired { role, allowed: allowed.to_vec(), context: None })
}

fn is_tutor_feature(feature: &str) -> bool {
    TUTOR_FEATURES.contains(&feature)
}

fn by_subscription<P>(provider: &P, feature: &str) -> AccessResult
where
    P: FeatureProvider + ?Sized,
{
    if provider.has_feature(feature) {
        return AccessResult::granted();
    }

    match provider.subscription() {
        Some(status) if status.is_active => {
            AccessResult::denied(Denial::NotInPlan { feature: FeatureId::from(feature) })
        },
        _ => AccessResult::denied(Denial::SubscriptionRequired),
    }
}

/// A user's view of the policy: their role bound to their subscription provider.
///
/// Cheap to copy; create one per request or per screen.
#[derive(Debug)]
pub struct AccessPolicy<'a, P: ?Sized> {
    role: Role,
    provider: &'a P,
}

impl<P: ?Sized> Clone for AccessPolicy<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for AccessPolicy<'_, P> {}

impl<'a, P> AccessPolicy<'a, P>
where
    P: FeatureProvider + ?Sized,
{
    pub const fn new(role: Role, provider: &'a P) -> Self {
        Self { role, provider }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn check_access(&self, feature: &str) -> AccessResult {
        evaluate(self.role, self.provider, feature)
    }

    /// # Errors
    /// Returns [`AccessError::AccessDenied`] when the feature is refused.
    pub fn require_access(&self, feature: &str) -> Result<(), AccessError> {
        require_access(self.role, self.provider, feature)
    }

    /// # Errors
    /// Returns [`AccessError::RoleRequired`] unless the bound role is in `allowed`.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AccessError> {
        require_role(self.role, allowed)
    }

    #[must_use]
    pub fn accessible_features(&self) -> AccessibleFeatures {
        accessible_features(self.role, self.provider)
    }

    /// Raw provider answer, without role shortcuts.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.provider.has_feature(feature)
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.provider.is_subscribed()
    }

    #[must_use]
    pub fn subscription(&self) -> Option<&'a SubscriptionStatus> {
        self.provider.subscription()
    }
}
