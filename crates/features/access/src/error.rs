use crate::result::Denial;
use shub_domain::role::Role;
use std::borrow::Cow;

/// A specialized [`AccessError`] enum of this crate.
#[shub_derive::shub_error]
pub enum AccessError {
    /// The policy refused the requested feature.
    #[error("{reason}{}", format_context(.context))]
    AccessDenied { reason: Denial, context: Option<Cow<'static, str>> },

    /// The user's role is not among the roles an operation accepts.
    #[error(
        "Access denied{}. One of {} roles required.",
        format_context(.context),
        join_roles(.allowed)
    )]
    RoleRequired { role: Role, allowed: Vec<Role>, context: Option<Cow<'static, str>> },
}

impl AccessError {
    /// The feature denial behind this error, if it is one.
    #[must_use]
    pub const fn denial(&self) -> Option<&Denial> {
        match self {
            Self::AccessDenied { reason, .. } => Some(reason),
            Self::RoleRequired { .. } => None,
        }
    }
}

fn join_roles(roles: &[Role]) -> String {
    roles.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>().join(", ")
}
