use shub_domain::constants::SECONDS_PER_DAY;
use shub_domain::subscription::{
    SubscriptionPlan, SubscriptionState, SubscriptionStatus, UserSubscription,
};

/// Builds the status snapshot for a subscription record at time `now` (UNIX seconds).
///
/// A subscription is active while its state is `active` and `now` is before its end date.
/// Remaining days round up and never go below zero. A missing plan contributes no features.
#[must_use]
pub fn resolve_status(
    subscription: Option<&UserSubscription>,
    plan: Option<&SubscriptionPlan>,
    now: i64,
) -> SubscriptionStatus {
    let Some(sub) = subscription else {
        return SubscriptionStatus::none();
    };

    SubscriptionStatus {
        is_active: sub.status == SubscriptionState::Active && sub.end_date > now,
        days_remaining: days_remaining(sub.end_date, now),
        features: plan.map(|p| p.features.clone()).unwrap_or_default(),
        subscription: Some(sub.clone()),
    }
}

/// Whole days left until `end_date`, rounded up.
#[must_use]
pub fn days_remaining(end_date: i64, now: i64) -> u32 {
    let left = end_date.saturating_sub(now);
    if left <= 0 {
        return 0;
    }
    let days = left / SECONDS_PER_DAY + i64::from(left % SECONDS_PER_DAY != 0);
    u32::try_from(days).unwrap_or(u32::MAX)
}
