//! # Subscriptions
//!
//! Plan catalog, status resolution and the lifecycle of user subscriptions.
//!
//! * [`PlanCatalog`]: purchasable plans, either configured or the stock set.
//! * [`resolve_status`]: turns a subscription record into a [`SubscriptionStatus`] at a
//!   given time. The status is what the access policy reads.
//! * [`lifecycle`]: pure transitions (subscribe, cancel, renew, change plan, update).
//! * [`SubscriptionRegistry`]: thread-safe in-memory store applying those transitions.
//! * [`require_subscription`]: gate for operations that need an active plan.
//! * [`SubscriptionRegistry::overdue`] and [`SubscriptionRegistry::analytics`]: admin
//!   reports over the stored records.
//!
//! All operations take the current time (UNIX seconds) explicitly.
//!
//! ## Example
//!
//! ```rust
//! use shub_subscription::{PlanCatalog, SubscriptionRegistry, PREMIUM_PLAN};
//!
//! let registry = SubscriptionRegistry::new(PlanCatalog::default());
//! let now = 1_700_000_000;
//!
//! registry.subscribe("student-1", PREMIUM_PLAN, now)?;
//! let status = registry.status("student-1", now);
//! assert!(status.is_active);
//! assert_eq!(status.days_remaining, 30);
//! assert!(status.includes("live_sessions"));
//! # Ok::<(), shub_subscription::SubscriptionError>(())
//! ```
//!
//! [`SubscriptionStatus`]: shub_domain::subscription::SubscriptionStatus

mod catalog;
mod error;
mod gate;
pub mod lifecycle;
mod registry;
mod report;
mod status;

pub use crate::catalog::{BASIC_PLAN, PREMIUM_PLAN, PlanCatalog, YEARLY_PLAN};
pub use crate::error::{SubscriptionError, SubscriptionErrorExt};
pub use crate::gate::require_subscription;
pub use crate::lifecycle::SubscriptionUpdate;
pub use crate::registry::{DEFAULT_HISTORY_LIMIT, SubscriptionRegistry};
pub use crate::report::{OverdueSubscription, PlanStats, StatusCount, SubscriptionAnalytics};
pub use crate::status::{days_remaining, resolve_status};
