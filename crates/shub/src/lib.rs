//! Facade over the StudyHub shared modules and feature slices.
//! Keep this crate thin: it composes other crates and holds no business rules.
//!
//! ## Usage
//! - Depend on `shub` (the `subscription` feature is on by default).
//! - Load an [`AppConfig`](domain::config::AppConfig) and call [`init`] to get a registry
//!   seeded from it.

pub use shub_domain as domain;
pub use shub_kernel as kernel;

/// Feature slices; `subscription` is behind the cargo feature of the same name.
pub mod features {
    pub use shub_access as access;
    #[cfg(feature = "subscription")]
    pub use shub_subscription as subscription;
}

/// Builds the subscription registry from the configured catalog and seed records.
#[cfg(feature = "subscription")]
#[must_use]
pub fn init(config: &domain::config::AppConfig) -> features::subscription::SubscriptionRegistry {
    use features::subscription::{PlanCatalog, SubscriptionRegistry};

    let catalog = PlanCatalog::from_config(config);
    let plans = catalog.len();
    let registry = SubscriptionRegistry::with_records(catalog, config.subscriptions.iter().cloned());

    tracing::debug!(
        plans,
        subscriptions = registry.len(),
        users = config.users.len(),
        "StudyHub features initialized"
    );
    registry
}
