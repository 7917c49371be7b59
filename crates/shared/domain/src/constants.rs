//! Stable string identifiers shared by configuration, storage and the access policy.

// Roles
pub const ADMIN: &str = "admin";
pub const LECTURER: &str = "lecturer";
pub const TUTOR: &str = "tutor";
pub const STUDENT: &str = "student";

// Tutor workspace features
pub const TUTOR_SESSIONS: &str = "tutor_sessions";
pub const TUTOR_REQUESTS: &str = "tutor_requests";
pub const TUTOR_STUDENTS: &str = "tutor_students";

/// Features every tutor holds regardless of subscription.
pub const TUTOR_FEATURES: [&str; 3] = [TUTOR_SESSIONS, TUTOR_REQUESTS, TUTOR_STUDENTS];

// Plan features
pub const UNLIMITED_CHAT: &str = "unlimited_chat";
pub const TUTOR_SUPPORT: &str = "tutor_support";
pub const MATERIALS_ACCESS: &str = "materials_access";
pub const LIVE_SESSIONS: &str = "live_sessions";
pub const PRIORITY_SUPPORT: &str = "priority_support";
pub const ADVANCED_ANALYTICS: &str = "advanced_analytics";

/// Sentinel listed in place of a feature set when a role can use everything.
pub const ALL_FEATURES: &str = "all";

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
pub const DEFAULT_CURRENCY: &str = "USD";
