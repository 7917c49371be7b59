//! Read-only aggregates over subscription records, as shown on the admin dashboard.
//!
//! Time ranges are inclusive UNIX seconds. Records without the timestamp a query filters
//! on never match it.

use crate::catalog::PlanCatalog;
use fxhash::FxHashMap;
use serde::Serialize;
use shub_domain::constants::SECONDS_PER_DAY;
use shub_domain::subscription::{SubscriptionState, UserSubscription};
use strum::IntoEnumIterator;

/// An `active` record whose end date has already passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueSubscription {
    pub subscription_id: String,
    pub user_id: String,
    pub plan_id: String,
    pub end_date: i64,
    /// Whole days since `end_date`, rounded down.
    pub days_overdue: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: SubscriptionState,
    pub count: usize,
}

/// Active subscriptions sold for one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStats {
    pub plan_id: String,
    /// Catalog details; `None` once the plan has been removed from the catalog.
    pub plan_name: Option<String>,
    pub price: Option<u64>,
    pub currency: Option<String>,
    pub count: usize,
    /// `price * count` in minor units. Zero for plans missing from the catalog.
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionAnalytics {
    pub status_breakdown: Vec<StatusCount>,
    pub popular_plans: Vec<PlanStats>,
    pub churn: Vec<StatusCount>,
    pub from: i64,
    pub to: i64,
}

/// Records still marked `active` with `end_date <= now`, most overdue first.
pub(crate) fn overdue<'a, I>(records: I, now: i64) -> Vec<OverdueSubscription>
where
    I: IntoIterator<Item = &'a UserSubscription>,
{
    let mut overdue: Vec<OverdueSubscription> = records
        .into_iter()
        .filter(|s| s.status == SubscriptionState::Active && s.end_date <= now)
        .map(|s| OverdueSubscription {
            subscription_id: s.id.clone(),
            user_id: s.user_id.clone(),
            plan_id: s.plan_id.clone(),
            end_date: s.end_date,
            days_overdue: days_overdue(s.end_date, now),
        })
        .collect();

    overdue.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then_with(|| a.end_date.cmp(&b.end_date))
            .then_with(|| a.subscription_id.cmp(&b.subscription_id))
    });
    overdue
}

/// Record count per state, for records created within `from..=to`.
pub(crate) fn status_breakdown<'a, I>(records: I, from: i64, to: i64) -> Vec<StatusCount>
where
    I: IntoIterator<Item = &'a UserSubscription>,
{
    count_by_status(records.into_iter().filter(|s| created_within(s, from, to)))
}

/// Record count per state, for records updated at or after `since`.
pub(crate) fn churn<'a, I>(records: I, since: i64) -> Vec<StatusCount>
where
    I: IntoIterator<Item = &'a UserSubscription>,
{
    count_by_status(records.into_iter().filter(|s| s.updated_at.is_some_and(|t| t >= since)))
}

/// Active records created within `from..=to`, grouped by plan, best sellers first.
pub(crate) fn plan_stats<'a, I>(
    records: I,
    catalog: &PlanCatalog,
    from: i64,
    to: i64,
) -> Vec<PlanStats>
where
    I: IntoIterator<Item = &'a UserSubscription>,
{
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for record in records
        .into_iter()
        .filter(|s| s.status == SubscriptionState::Active && created_within(s, from, to))
    {
        *counts.entry(record.plan_id.as_str()).or_default() += 1;
    }

    let mut stats: Vec<PlanStats> = counts
        .into_iter()
        .map(|(plan_id, count)| {
            let plan = catalog.get(plan_id);
            let price = plan.map(|p| p.price);
            PlanStats {
                plan_id: plan_id.to_owned(),
                plan_name: plan.map(|p| p.name.clone()),
                price,
                currency: plan.map(|p| p.currency.clone()),
                count,
                revenue: price.map_or(0, |price| {
                    price.saturating_mul(u64::try_from(count).unwrap_or(u64::MAX))
                }),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.plan_id.cmp(&b.plan_id)));
    stats
}

fn created_within(sub: &UserSubscription, from: i64, to: i64) -> bool {
    sub.created_at.is_some_and(|t| (from..=to).contains(&t))
}

/// Non-zero counts only, in declaration order of [`SubscriptionState`].
fn count_by_status<'a>(records: impl Iterator<Item = &'a UserSubscription>) -> Vec<StatusCount> {
    let mut counts: FxHashMap<SubscriptionState, usize> = FxHashMap::default();
    for record in records {
        *counts.entry(record.status).or_default() += 1;
    }

    SubscriptionState::iter()
        .filter_map(|status| counts.get(&status).map(|&count| StatusCount { status, count }))
        .collect()
}

fn days_overdue(end_date: i64, now: i64) -> u32 {
    let days = now.saturating_sub(end_date).div_euclid(SECONDS_PER_DAY);
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}
