use crate::error::SubscriptionError;
use shub_domain::subscription::SubscriptionStatus;
use tracing::debug;

/// Guards an operation behind an active subscription, and optionally a plan feature.
///
/// # Errors
/// Returns [`SubscriptionError::SubscriptionRequired`] when the subscription is inactive
/// or its plan does not include `feature`.
pub fn require_subscription(
    status: &SubscriptionStatus,
    feature: Option<&str>,
) -> Result<(), SubscriptionError> {
    let allowed = status.is_active && feature.is_none_or(|f| status.includes(f));
    if allowed {
        return Ok(());
    }

    debug!(feature, is_active = status.is_active, "Subscription gate refused");
    let message = match feature {
        Some(feature) => format!("Subscription required for feature: {feature}").into(),
        None => "Active subscription required".into(),
    };
    Err(SubscriptionError::SubscriptionRequired { message, context: None })
}
