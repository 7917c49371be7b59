use shub_domain::subscription::SubscriptionState;
use std::borrow::Cow;

/// A specialized [`SubscriptionError`] enum of this crate.
#[shub_derive::shub_error]
pub enum SubscriptionError {
    /// The plan does not exist, or is no longer offered.
    #[error("Subscription plan not found{}: {plan_id}", format_context(.context))]
    PlanNotFound { plan_id: String, context: Option<Cow<'static, str>> },

    #[error("User already has an active subscription{}: {user_id}", format_context(.context))]
    AlreadyActive { user_id: String, context: Option<Cow<'static, str>> },

    /// Unknown id, or the subscription belongs to someone else.
    #[error("Subscription not found{}: {id}", format_context(.context))]
    NotFound { id: String, context: Option<Cow<'static, str>> },

    #[error("Subscription is not expired or cancelled{}: {status}", format_context(.context))]
    NotRenewable { status: SubscriptionState, context: Option<Cow<'static, str>> },

    /// Gate refusal; `message` is shown to the caller as is.
    #[error("{message}{}", format_context(.context))]
    SubscriptionRequired { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
