use std::collections::{BTreeMap, BTreeSet};

use lotus_core::LocaleCode;
use serde::{Deserialize, Serialize};

use crate::PermissionLevel;

/// Union of every assigned role's grants, keyed by resource collection.
///
/// Levels are held in a set, so a collection never lists a level twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedPermissions(BTreeMap<String, BTreeSet<PermissionLevel>>);

impl MergedPermissions {
    /// Creates an empty permission map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions `levels` into the entry for `collection`, creating it if absent.
    pub fn grant(
        &mut self,
        collection: impl Into<String>,
        levels: impl IntoIterator<Item = PermissionLevel>,
    ) {
        self.0.entry(collection.into()).or_default().extend(levels);
    }

    /// Returns the levels granted on a collection, if it has an entry.
    #[must_use]
    pub fn levels(&self, collection: &str) -> Option<&BTreeSet<PermissionLevel>> {
        self.0.get(collection)
    }

    /// Returns whether `level` is granted on `collection`.
    #[must_use]
    pub fn grants(&self, collection: &str, level: PermissionLevel) -> bool {
        self.levels(collection)
            .is_some_and(|levels| levels.contains(&level))
    }

    /// Returns whether the map has no collection entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of collection entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates collection entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<PermissionLevel>)> {
        self.0
            .iter()
            .map(|(collection, levels)| (collection.as_str(), levels))
    }
}

impl FromIterator<(String, BTreeSet<PermissionLevel>)> for MergedPermissions {
    fn from_iter<T: IntoIterator<Item = (String, BTreeSet<PermissionLevel>)>>(iter: T) -> Self {
        let mut merged = Self::new();
        for (collection, levels) in iter {
            merged.grant(collection, levels);
        }
        merged
    }
}

/// Cached value of a principal's virtual `permissions` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionSnapshot {
    /// Permissions computed for a locale (`None` for clients).
    Resolved {
        /// Locale the snapshot was computed for.
        locale: Option<LocaleCode>,
        /// Merged grants.
        permissions: MergedPermissions,
    },
    /// The stored attribute was present but not a permission map.
    Malformed,
}

impl PermissionSnapshot {
    /// Returns the merged permissions when the snapshot is well formed.
    #[must_use]
    pub fn permissions(&self) -> Option<&MergedPermissions> {
        match self {
            Self::Resolved { permissions, .. } => Some(permissions),
            Self::Malformed => None,
        }
    }
}
