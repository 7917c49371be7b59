use shub_domain::constants::SECONDS_PER_DAY;
use shub_domain::subscription::{SubscriptionState, UserSubscription};
use shub_subscription::{
    BASIC_PLAN, PREMIUM_PLAN, PlanCatalog, StatusCount, SubscriptionRegistry, YEARLY_PLAN,
};

const NOW: i64 = 1_700_000_000;
const DAY: i64 = SECONDS_PER_DAY;

fn record(id: &str, user_id: &str, plan_id: &str, status: SubscriptionState) -> UserSubscription {
    UserSubscription {
        id: id.to_owned(),
        user_id: user_id.to_owned(),
        plan_id: plan_id.to_owned(),
        status,
        start_date: NOW - 30 * DAY,
        end_date: NOW,
        auto_renew: true,
        created_at: Some(NOW - 30 * DAY),
        updated_at: Some(NOW - 30 * DAY),
    }
}

fn ending(id: &str, user_id: &str, end_date: i64) -> UserSubscription {
    UserSubscription { end_date, ..record(id, user_id, BASIC_PLAN, SubscriptionState::Active) }
}

fn created(
    id: &str,
    plan_id: &str,
    status: SubscriptionState,
    at: Option<i64>,
) -> UserSubscription {
    UserSubscription { created_at: at, updated_at: at, ..record(id, id, plan_id, status) }
}

#[test]
fn overdue_rounds_days_down_and_sorts_most_overdue_first() {
    let registry = SubscriptionRegistry::with_records(
        PlanCatalog::default(),
        [
            ending("sub_a", "ana", NOW - DAY),
            ending("sub_b", "ben", NOW - 5 * DAY - (DAY - 1)),
            ending("sub_c", "cleo", NOW),
            ending("sub_d", "dan", NOW - 2 * DAY - 10),
            ending("sub_future", "eve", NOW + 1),
        ],
    );

    let overdue = registry.overdue(NOW);
    let rows: Vec<(&str, u32)> =
        overdue.iter().map(|o| (o.user_id.as_str(), o.days_overdue)).collect();

    assert_eq!(rows, [("ben", 5), ("dan", 2), ("ana", 1), ("cleo", 0)]);
}

#[test]
fn overdue_skips_records_that_are_no_longer_active() {
    let registry = SubscriptionRegistry::with_records(
        PlanCatalog::default(),
        [
            record("sub_cancelled", "ana", BASIC_PLAN, SubscriptionState::Cancelled),
            record("sub_expired", "ben", BASIC_PLAN, SubscriptionState::Expired),
            record("sub_paused", "cleo", BASIC_PLAN, SubscriptionState::Paused),
        ],
    );
    assert!(registry.overdue(NOW + 10 * DAY).is_empty());
}

#[test]
fn overdue_ties_are_broken_by_end_date() {
    let registry = SubscriptionRegistry::with_records(
        PlanCatalog::default(),
        [ending("sub_late", "ana", NOW - 3 * DAY), ending("sub_early", "ben", NOW - 3 * DAY - 60)],
    );

    let ids: Vec<String> = registry.overdue(NOW).into_iter().map(|o| o.subscription_id).collect();
    assert_eq!(ids, ["sub_early", "sub_late"]);
}

#[test]
fn breakdown_counts_states_created_in_range() {
    use SubscriptionState::{Active, Cancelled, Expired};

    let registry = SubscriptionRegistry::with_records(
        PlanCatalog::default(),
        [
            created("s1", BASIC_PLAN, Active, Some(NOW)),
            created("s2", BASIC_PLAN, Active, Some(NOW + DAY)),
            created("s3", PREMIUM_PLAN, Cancelled, Some(NOW + 2 * DAY)),
            created("s4", PREMIUM_PLAN, Expired, Some(NOW + 9 * DAY)),
            created("s5", PREMIUM_PLAN, Expired, None),
        ],
    );

    assert_eq!(
        registry.breakdown(NOW, NOW + 2 * DAY),
        [
            StatusCount { status: Active, count: 2 },
            StatusCount { status: Cancelled, count: 1 },
        ]
    );
    assert!(registry.breakdown(NOW - 10 * DAY, NOW - 1).is_empty());
}

#[test]
fn plan_stats_rank_active_plans_by_count_with_revenue() {
    use SubscriptionState::{Active, Cancelled};

    let registry = SubscriptionRegistry::with_records(
        PlanCatalog::default(),
        [
            created("s1", BASIC_PLAN, Active, Some(NOW)),
            created("s2", PREMIUM_PLAN, Active, Some(NOW)),
            created("s3", PREMIUM_PLAN, Active, Some(NOW)),
            created("s4", PREMIUM_PLAN, Cancelled, Some(NOW)),
            created("s5", YEARLY_PLAN, Active, Some(NOW + 100 * DAY)),
            created("s6", "legacy-plan", Active, Some(NOW)),
        ],
    );

    let stats = registry.plan_stats(NOW, NOW + DAY);
    let ids: Vec<&str> = stats.iter().map(|s| s.plan_id.as_str()).collect();
    assert_eq!(ids, [PREMIUM_PLAN, BASIC_PLAN, "legacy-plan"]);

    assert_eq!(stats[0].count, 2);
    assert_eq!(stats[0].revenue, 2 * 1999);
    assert_eq!(stats[0].plan_name.as_deref(), Some("Premium Plan"));
    assert_eq!(stats[0].currency.as_deref(), Some("USD"));

    let legacy = &stats[2];
    assert_eq!(legacy.plan_name, None);
    assert_eq!(legacy.price, None);
    assert_eq!(legacy.revenue, 0);
}

#[test]
fn analytics_combines_the_reports_and_tracks_churn() {
    let registry = SubscriptionRegistry::new(PlanCatalog::default());
    let kept = registry.subscribe("ana", BASIC_PLAN, NOW).unwrap();
    let dropped = registry.subscribe("ben", PREMIUM_PLAN, NOW).unwrap();
    registry.cancel("ben", &dropped.id, false, NOW + DAY).unwrap();

    let analytics = registry.analytics(NOW, NOW + 2 * DAY);
    assert_eq!(analytics.from, NOW);
    assert_eq!(analytics.to, NOW + 2 * DAY);
    assert_eq!(analytics.status_breakdown, registry.breakdown(NOW, NOW + 2 * DAY));
    assert_eq!(analytics.popular_plans.len(), 1);
    assert_eq!(analytics.popular_plans[0].plan_id, kept.plan_id);

    let churn = registry.churn(NOW + DAY);
    assert_eq!(churn, [StatusCount { status: SubscriptionState::Cancelled, count: 1 }]);
    assert_eq!(analytics.churn.len(), 2);
}

#[test]
fn reports_serialize_in_camel_case() {
    let registry = SubscriptionRegistry::with_records(
        PlanCatalog::default(),
        [ending("sub_a", "ana", NOW - DAY)],
    );

    let json = serde_json::to_value(registry.overdue(NOW)).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "subscriptionId": "sub_a",
            "userId": "ana",
            "planId": "basic-plan",
            "endDate": NOW - DAY,
            "daysOverdue": 1,
        }])
    );
}
