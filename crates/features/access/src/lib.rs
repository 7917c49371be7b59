//! # Feature Access
//!
//! Decides whether a user may use a gated feature, given their [`Role`] and a
//! [`FeatureProvider`] exposing their subscription.
//!
//! The policy is a pure function of its inputs: no I/O, no clock, no shared state. It is
//! safe to call from any number of threads at once.
//!
//! ## Example
//!
//! ```rust
//! use shub_access::{AccessPolicy, Denial, NoSubscription};
//! use shub_domain::role::Role;
//!
//! let tutor = AccessPolicy::new(Role::Tutor, &NoSubscription);
//! assert!(tutor.check_access("tutor_sessions").has_access);
//!
//! let student = AccessPolicy::new(Role::Student, &NoSubscription);
//! let denied = student.check_access("live_sessions");
//! assert_eq!(denied.reason, Some(Denial::SubscriptionRequired));
//! assert_eq!(denied.upgrade_required, Some(true));
//! ```
//!
//! [`Role`]: shub_domain::role::Role

mod error;
mod policy;
mod provider;
mod result;

pub use crate::error::{AccessError, AccessErrorExt};
pub use crate::policy::{
    AccessPolicy, accessible_features, evaluate, require_access, require_role,
};
pub use crate::provider::{FeatureProvider, NoSubscription};
pub use crate::result::{AccessResult, AccessibleFeatures, Denial};
