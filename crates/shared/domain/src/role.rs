use crate::constants::{ADMIN, LECTURER, TUTOR};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// The role a user acts under.
///
/// Roles are supplied by the identity provider and treated as authoritative.
/// Unrecognized role strings fall back to [`Role::Student`], which is also the default.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Lecturer,
    Tutor,
    #[default]
    Student,
}

impl Role {
    /// Admins and lecturers are never gated by a subscription.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Lecturer)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            ADMIN => Self::Admin,
            LECTURER => Self::Lecturer,
            TUTOR => Self::Tutor,
            _ => Self::Student,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// User directory entry; the identity provider's view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("Lecturer"), Role::Lecturer);
        assert_eq!(Role::from(" TUTOR "), Role::Tutor);
        assert_eq!(Role::from("student"), Role::Student);
    }

    #[test]
    fn unknown_roles_default_to_student() {
        assert_eq!(Role::from("guest"), Role::Student);
        assert_eq!(Role::from(""), Role::Student);
        assert_eq!(Role::default(), Role::Student);
    }

    #[test]
    fn display_matches_wire_names() {
        let names: Vec<String> = Role::iter().map(|r| r.to_string()).collect();
        assert_eq!(names, ["admin", "lecturer", "tutor", "student"]);
        assert_eq!(Role::Tutor.as_ref(), "tutor");
    }

    #[test]
    fn only_admin_and_lecturer_are_privileged() {
        let privileged: Vec<Role> = Role::iter().filter(|r| r.is_privileged()).collect();
        assert_eq!(privileged, [Role::Admin, Role::Lecturer]);
    }
}
