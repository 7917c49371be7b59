use crate::catalog::PlanCatalog;
use crate::error::SubscriptionError;
use crate::lifecycle::{self, SubscriptionUpdate};
use crate::report::{self, OverdueSubscription, PlanStats, StatusCount, SubscriptionAnalytics};
use crate::status::resolve_status;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use shub_domain::subscription::{SubscriptionState, SubscriptionStatus, UserSubscription};
use std::sync::Arc;
use tracing::{info, warn};

/// Default page size of [`SubscriptionRegistry::history`].
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Thread-safe in-memory store of subscription records, keyed by subscription id.
///
/// Cloning is cheap and shares the same records. Every mutating call checks that the
/// subscription belongs to the calling user; a mismatch is reported as
/// [`SubscriptionError::NotFound`] so ids of other users are not disclosed.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionRegistry {
    catalog: Arc<PlanCatalog>,
    records: Arc<RwLock<FxHashMap<String, UserSubscription>>>,
}

impl SubscriptionRegistry {
    #[must_use]
    pub fn new(catalog: PlanCatalog) -> Self {
        Self { catalog: Arc::new(catalog), records: Arc::default() }
    }

    /// Creates a registry pre-filled with existing records.
    #[must_use]
    pub fn with_records(
        catalog: PlanCatalog,
        records: impl IntoIterator<Item = UserSubscription>,
    ) -> Self {
        let registry = Self::new(catalog);
        for record in records {
            registry.insert(record);
        }
        registry
    }

    #[must_use]
    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Stores a record as is, replacing any record with the same id.
    pub fn insert(&self, subscription: UserSubscription) -> Option<UserSubscription> {
        self.records.write().insert(subscription.id.clone(), subscription)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<UserSubscription> {
        self.records.read().get(id).cloned()
    }

    /// Subscribes `user_id` to `plan_id`.
    ///
    /// # Errors
    /// * [`SubscriptionError::PlanNotFound`] if the plan is unknown or retired.
    /// * [`SubscriptionError::AlreadyActive`] if the user already has an active subscription.
    pub fn subscribe(
        &self,
        user_id: &str,
        plan_id: &str,
        now: i64,
    ) -> Result<UserSubscription, SubscriptionError> {
        let mut records = self.records.write();
        let has_active = records
            .values()
            .any(|s| s.user_id == user_id && s.status == SubscriptionState::Active);

        let created = lifecycle::subscribe(&self.catalog, user_id, plan_id, has_active, now)
            .inspect_err(|err| warn!(user_id, plan_id, %err, "Subscription rejected"))?;

        info!(user_id, plan_id, subscription_id = %created.id, "Subscription created");
        records.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    /// Cancels a subscription now, or stops its renewal when `at_period_end` is set.
    ///
    /// # Errors
    /// Returns [`SubscriptionError::NotFound`] if `user_id` does not own `id`.
    pub fn cancel(
        &self,
        user_id: &str,
        id: &str,
        at_period_end: bool,
        now: i64,
    ) -> Result<UserSubscription, SubscriptionError> {
        self.modify(user_id, id, |sub, _| {
            lifecycle::cancel(sub, at_period_end, now);
            info!(user_id, subscription_id = id, at_period_end, "Subscription cancelled");
            Ok(())
        })
    }

    /// Restarts an expired or cancelled subscription.
    ///
    /// # Errors
    /// * [`SubscriptionError::NotFound`] if `user_id` does not own `id`.
    /// * [`SubscriptionError::NotRenewable`] unless the subscription is expired or cancelled.
    /// * [`SubscriptionError::PlanNotFound`] if its plan no longer exists.
    pub fn renew(
        &self,
        user_id: &str,
        id: &str,
        now: i64,
    ) -> Result<UserSubscription, SubscriptionError> {
        self.modify(user_id, id, |sub, catalog| {
            lifecycle::renew(sub, catalog, now)
                .inspect_err(|err| warn!(user_id, subscription_id = id, %err, "Renewal rejected"))?;
            info!(user_id, subscription_id = id, end_date = sub.end_date, "Subscription renewed");
            Ok(())
        })
    }

    /// Moves a subscription to another plan.
    ///
    /// # Errors
    /// * [`SubscriptionError::NotFound`] if `user_id` does not own `id`.
    /// * [`SubscriptionError::PlanNotFound`] if the new plan is unknown or retired.
    pub fn change_plan(
        &self,
        user_id: &str,
        id: &str,
        new_plan_id: &str,
        now: i64,
    ) -> Result<UserSubscription, SubscriptionError> {
        self.modify(user_id, id, |sub, catalog| {
            lifecycle::change_plan(sub, catalog, new_plan_id, now).inspect_err(|err| {
                warn!(user_id, subscription_id = id, new_plan_id, %err, "Plan change rejected");
            })?;
            info!(user_id, subscription_id = id, plan_id = new_plan_id, "Subscription plan changed");
            Ok(())
        })
    }

    /// Applies a partial update of status and renewal flag.
    ///
    /// # Errors
    /// Returns [`SubscriptionError::NotFound`] if `user_id` does not own `id`.
    pub fn update(
        &self,
        user_id: &str,
        id: &str,
        changes: SubscriptionUpdate,
        now: i64,
    ) -> Result<UserSubscription, SubscriptionError> {
        self.modify(user_id, id, |sub, _| {
            lifecycle::update(sub, changes, now);
            info!(
                user_id,
                subscription_id = id,
                status = %sub.status,
                auto_renew = sub.auto_renew,
                "Subscription updated"
            );
            Ok(())
        })
    }

    /// # Errors
    /// Returns [`SubscriptionError::NotFound`] if `user_id` does not own `id`.
    pub fn set_auto_renew(
        &self,
        user_id: &str,
        id: &str,
        auto_renew: bool,
        now: i64,
    ) -> Result<UserSubscription, SubscriptionError> {
        self.update(user_id, id, SubscriptionUpdate { status: None, auto_renew: Some(auto_renew) }, now)
    }

    /// The user's earliest-created record whose state is `active`.
    #[must_use]
    pub fn current(&self, user_id: &str) -> Option<UserSubscription> {
        self.records
            .read()
            .values()
            .filter(|s| s.user_id == user_id && s.status == SubscriptionState::Active)
            .min_by(|a, b| created_order(a).cmp(&created_order(b)))
            .cloned()
    }

    /// Resolves the status of the user's current subscription at `now`.
    #[must_use]
    pub fn status(&self, user_id: &str, now: i64) -> SubscriptionStatus {
        let current = self.current(user_id);
        let plan = current.as_ref().and_then(|s| self.catalog.get(&s.plan_id));
        resolve_status(current.as_ref(), plan, now)
    }

    /// All records of the user, oldest first, paginated.
    #[must_use]
    pub fn history(&self, user_id: &str, limit: usize, offset: usize) -> Vec<UserSubscription> {
        let mut owned: Vec<UserSubscription> =
            self.records.read().values().filter(|s| s.user_id == user_id).cloned().collect();
        owned.sort_by(|a, b| created_order(a).cmp(&created_order(b)));
        owned.into_iter().skip(offset).take(limit).collect()
    }

    /// Records still marked `active` whose end date is at or before `now`, most overdue
    /// first. Nothing expires them automatically, so these need an administrator.
    #[must_use]
    pub fn overdue(&self, now: i64) -> Vec<OverdueSubscription> {
        report::overdue(self.records.read().values(), now)
    }

    /// Count per state of the records created within `from..=to`.
    #[must_use]
    pub fn breakdown(&self, from: i64, to: i64) -> Vec<StatusCount> {
        report::status_breakdown(self.records.read().values(), from, to)
    }

    /// Active subscriptions created within `from..=to` per plan, best sellers first.
    #[must_use]
    pub fn plan_stats(&self, from: i64, to: i64) -> Vec<PlanStats> {
        report::plan_stats(self.records.read().values(), &self.catalog, from, to)
    }

    /// Count per state of the records updated at or after `since`.
    #[must_use]
    pub fn churn(&self, since: i64) -> Vec<StatusCount> {
        report::churn(self.records.read().values(), since)
    }

    /// Breakdown, plan stats and churn taken from one consistent snapshot.
    #[must_use]
    pub fn analytics(&self, from: i64, to: i64) -> SubscriptionAnalytics {
        let records = self.records.read();
        SubscriptionAnalytics {
            status_breakdown: report::status_breakdown(records.values(), from, to),
            popular_plans: report::plan_stats(records.values(), &self.catalog, from, to),
            churn: report::churn(records.values(), from),
            from,
            to,
        }
    }

    fn modify<F>(
        &self,
        user_id: &str,
        id: &str,
        apply: F,
    ) -> Result<UserSubscription, SubscriptionError>
    where
        F: FnOnce(&mut UserSubscription, &PlanCatalog) -> Result<(), SubscriptionError>,
    {
        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .filter(|s| s.user_id == user_id)
            .ok_or_else(|| SubscriptionError::NotFound { id: id.to_owned(), context: None })?;

        // Work on a copy so a failed transition leaves the stored record untouched.
        let mut draft = record.clone();
        apply(&mut draft, &self.catalog)?;
        *record = draft.clone();
        Ok(draft)
    }
}

/// Records without a creation time sort first, ties broken by id.
fn created_order(sub: &UserSubscription) -> (Option<i64>, &str) {
    (sub.created_at, sub.id.as_str())
}
