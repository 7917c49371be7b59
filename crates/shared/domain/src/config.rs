use crate::role::UserProfile;
use crate::subscription::{SubscriptionPlan, UserSubscription};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub logging: LoggingConfig,
    /// Plan catalog override. `None` means the stock catalog.
    pub plans: Option<Vec<SubscriptionPlan>>,
    pub users: Vec<UserProfile>,
    pub subscriptions: Vec<UserSubscription>,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

impl AppConfig {
    /// Looks up a user in the configured directory.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&UserProfile> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub console: bool,
    pub level: String,
    pub json: bool,
    pub directory: Option<PathBuf>,
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console: true,
            level: "warn".to_owned(),
            json: false,
            directory: None,
            env_filter: None,
        }
    }
}
