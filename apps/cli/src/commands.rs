use crate::args::Subject;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use shub::domain::config::AppConfig;
use shub::domain::role::Role;
use shub::domain::subscription::SubscriptionStatus;
use shub::features::access::{AccessPolicy, require_role};
use shub::features::subscription::SubscriptionRegistry;
use std::io::{self, Write};
use tracing::debug;

/// State shared by all commands of one invocation.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) config: AppConfig,
    pub(crate) registry: SubscriptionRegistry,
    pub(crate) now: i64,
}

impl Session {
    pub(crate) fn new(config: AppConfig, now: i64) -> Self {
        let registry = shub::init(&config);
        Self { config, registry, now }
    }

    /// Role and status of the subject. A bare role has no subscription.
    fn resolve(&self, subject: &Subject) -> Result<(Role, SubscriptionStatus)> {
        match (&subject.user, subject.role) {
            (Some(user_id), _) => {
                let user = self
                    .config
                    .user(user_id)
                    .with_context(|| format!("Unknown user '{user_id}'"))?;
                debug!(user_id, role = %user.role, "Resolved user");
                Ok((user.role, self.registry.status(user_id, self.now)))
            },
            (None, Some(role)) => Ok((role, SubscriptionStatus::none())),
            (None, None) => bail!("Either --user or --role is required"),
        }
    }

    /// Admin reports run on behalf of a configured admin user.
    fn require_admin(&self, user_id: &str) -> Result<()> {
        let user =
            self.config.user(user_id).with_context(|| format!("Unknown user '{user_id}'"))?;
        require_role(user.role, &[Role::Admin])?;
        Ok(())
    }
}

pub(crate) fn check(
    session: &Session,
    feature: &str,
    subject: &Subject,
    require: bool,
) -> Result<()> {
    let (role, status) = session.resolve(subject)?;
    let policy = AccessPolicy::new(role, &status);

    if require {
        policy.require_access(feature)?;
    }
    print_json(&policy.check_access(feature))
}

pub(crate) fn features(session: &Session, subject: &Subject) -> Result<()> {
    let (role, status) = session.resolve(subject)?;
    print_json(&AccessPolicy::new(role, &status).accessible_features())
}

pub(crate) fn plans(session: &Session) -> Result<()> {
    let plans: Vec<_> = session.registry.catalog().active_plans().collect();
    print_json(&plans)
}

pub(crate) fn status(session: &Session, user_id: &str) -> Result<()> {
    print_json(&session.registry.status(user_id, session.now))
}

pub(crate) fn overdue(session: &Session, user_id: &str) -> Result<()> {
    session.require_admin(user_id)?;
    print_json(&session.registry.overdue(session.now))
}

pub(crate) fn analytics(
    session: &Session,
    user_id: &str,
    from: i64,
    to: Option<i64>,
) -> Result<()> {
    session.require_admin(user_id)?;
    print_json(&session.registry.analytics(from, to.unwrap_or(session.now)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}
