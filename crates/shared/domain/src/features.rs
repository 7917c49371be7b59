use crate::constants::TUTOR_FEATURES;
use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque name of a gated capability (e.g. `tutor_sessions`).
///
/// Any string is a valid identifier; the well-known ones live in [`crate::constants`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(Cow<'static, str>);

impl FeatureId {
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeatureId {
    fn from(id: &str) -> Self {
        Self(Cow::Owned(id.to_owned()))
    }
}

impl From<String> for FeatureId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl Borrow<str> for FeatureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FeatureId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered set of feature identifiers.
///
/// Ordering keeps listings and serialized output stable across runs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(BTreeSet<FeatureId>);

impl FeatureSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// The fixed set every tutor holds.
    #[must_use]
    pub fn tutor() -> Self {
        TUTOR_FEATURES.into_iter().map(FeatureId::from_static).collect()
    }

    #[must_use]
    pub fn contains(&self, feature: &str) -> bool {
        self.0.contains(feature)
    }

    pub fn insert(&mut self, feature: impl Into<FeatureId>) -> bool {
        self.0.insert(feature.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureId> {
        self.0.iter()
    }

    /// Identifiers as plain strings, in set order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl<T: Into<FeatureId>> FromIterator<T> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FeatureId>> Extend<T> for FeatureSet {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a FeatureId;
    type IntoIter = std::collections::btree_set::Iter<'a, FeatureId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
