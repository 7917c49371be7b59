//! State transitions for a single subscription record.
//!
//! Every function takes the current time explicitly and stamps `updated_at` with it.

use crate::catalog::PlanCatalog;
use crate::error::SubscriptionError;
use shub_domain::constants::SECONDS_PER_DAY;
use shub_domain::subscription::{SubscriptionPlan, SubscriptionState, UserSubscription};
use shub_kernel::prefixed_id;

const ID_PREFIX: &str = "sub";

/// Partial update of the user-editable fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionUpdate {
    pub status: Option<SubscriptionState>,
    pub auto_renew: Option<bool>,
}

/// End of a billing period of `plan` starting at `start`.
#[must_use]
pub fn period_end(plan: &SubscriptionPlan, start: i64) -> i64 {
    start.saturating_add(i64::from(plan.duration).saturating_mul(SECONDS_PER_DAY))
}

/// Opens a new subscription for `user_id`.
///
/// # Errors
/// * [`SubscriptionError::PlanNotFound`] if the plan is unknown or retired.
/// * [`SubscriptionError::AlreadyActive`] if the user already holds an active subscription.
pub fn subscribe(
    catalog: &PlanCatalog,
    user_id: &str,
    plan_id: &str,
    has_active: bool,
    now: i64,
) -> Result<UserSubscription, SubscriptionError> {
    let plan = catalog
        .find_active(plan_id)
        .ok_or_else(|| SubscriptionError::PlanNotFound { plan_id: plan_id.to_owned(), context: None })?;

    if has_active {
        return Err(SubscriptionError::AlreadyActive { user_id: user_id.to_owned(), context: None });
    }

    Ok(UserSubscription {
        id: prefixed_id(ID_PREFIX),
        user_id: user_id.to_owned(),
        plan_id: plan.id.clone(),
        status: SubscriptionState::Active,
        start_date: now,
        end_date: period_end(plan, now),
        auto_renew: true,
        created_at: Some(now),
        updated_at: Some(now),
    })
}

/// Cancels immediately, or only stops renewal when `at_period_end` is set.
pub fn cancel(sub: &mut UserSubscription, at_period_end: bool, now: i64) {
    if !at_period_end {
        sub.status = SubscriptionState::Cancelled;
    }
    sub.auto_renew = false;
    sub.updated_at = Some(now);
}

/// Restarts an expired or cancelled subscription for a fresh period of its plan.
///
/// # Errors
/// * [`SubscriptionError::NotRenewable`] unless the subscription is expired or cancelled.
/// * [`SubscriptionError::PlanNotFound`] if its plan no longer exists.
pub fn renew(
    sub: &mut UserSubscription,
    catalog: &PlanCatalog,
    now: i64,
) -> Result<(), SubscriptionError> {
    if !matches!(sub.status, SubscriptionState::Expired | SubscriptionState::Cancelled) {
        return Err(SubscriptionError::NotRenewable { status: sub.status, context: None });
    }

    let plan = catalog.get(&sub.plan_id).ok_or_else(|| SubscriptionError::PlanNotFound {
        plan_id: sub.plan_id.clone(),
        context: Some("Renewing subscription".into()),
    })?;

    sub.status = SubscriptionState::Active;
    sub.start_date = now;
    sub.end_date = period_end(plan, now);
    sub.auto_renew = true;
    sub.updated_at = Some(now);
    Ok(())
}

/// Moves the subscription to another plan, starting a new period now.
///
/// # Errors
/// Returns [`SubscriptionError::PlanNotFound`] if the new plan is unknown or retired.
pub fn change_plan<'c>(
    sub: &mut UserSubscription,
    catalog: &'c PlanCatalog,
    new_plan_id: &str,
    now: i64,
) -> Result<&'c SubscriptionPlan, SubscriptionError> {
    let plan = catalog.find_active(new_plan_id).ok_or_else(|| SubscriptionError::PlanNotFound {
        plan_id: new_plan_id.to_owned(),
        context: Some("Changing plan".into()),
    })?;

    sub.plan_id.clone_from(&plan.id);
    sub.start_date = now;
    sub.end_date = period_end(plan, now);
    sub.updated_at = Some(now);
    Ok(plan)
}

/// Applies the fields present in `update`.
pub fn update(sub: &mut UserSubscription, update: SubscriptionUpdate, now: i64) {
    if let Some(status) = update.status {
        sub.status = status;
    }
    if let Some(auto_renew) = update.auto_renew {
        sub.auto_renew = auto_renew;
    }
    sub.updated_at = Some(now);
}
