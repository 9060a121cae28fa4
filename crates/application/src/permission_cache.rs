use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use lotus_core::LocaleCode;
use lotus_domain::{MergedPermissions, RoleCollection};

/// Identity of one cached permission computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionCacheKey {
    /// Principal document id.
    pub principal_id: String,
    /// Principal type.
    pub role_collection: RoleCollection,
    /// Locale the roles were resolved under. `None` for clients.
    pub locale: Option<LocaleCode>,
}

/// Request-scoped memo of merged permissions.
///
/// Create one per request and drop it with the request; it is the single
/// place merged permissions are cached, so nothing outlives a request.
#[derive(Debug, Default)]
pub struct PermissionCache {
    entries: Mutex<HashMap<PermissionCacheKey, MergedPermissions>>,
}

impl PermissionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key` without computing it.
    #[must_use]
    pub fn get(&self, key: &PermissionCacheKey) -> Option<MergedPermissions> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Returns the cached value for `key`, computing and storing it if absent.
    pub fn get_or_compute(
        &self,
        key: PermissionCacheKey,
        compute: impl FnOnce() -> MergedPermissions,
    ) -> MergedPermissions {
        if let Some(permissions) = self.get(&key) {
            return permissions;
        }

        let permissions = compute();
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(permissions)
            .clone()
    }

    /// Returns the number of cached computations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
