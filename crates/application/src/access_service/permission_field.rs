use lotus_domain::PermissionSnapshot;

use crate::PermissionCacheKey;

use super::*;

/// Permissions available to one evaluation.
pub(super) enum ResolvedPermissions<'a> {
    /// Snapshot already attached to the principal.
    Attached(&'a MergedPermissions),
    /// Computed or taken from the request cache.
    Cached(MergedPermissions),
    /// Attached snapshot is not a permission map.
    Malformed,
    /// Nothing attached and nothing cached for this request yet.
    Absent,
}

impl ResolvedPermissions<'_> {
    pub(super) fn as_merged(&self) -> Option<&MergedPermissions> {
        match self {
            Self::Attached(permissions) => Some(permissions),
            Self::Cached(permissions) => Some(permissions),
            Self::Malformed | Self::Absent => None,
        }
    }
}

impl AccessService {
    /// Computes the principal's merged permissions for the request locale.
    ///
    /// Manager roles resolve under `locale`, falling back to the default
    /// locale. Client roles ignore the locale. Results are memoized in the
    /// request cache.
    pub fn resolve_permissions(
        &self,
        principal: &Principal,
        locale: Option<&LocaleCode>,
        cache: &PermissionCache,
    ) -> MergedPermissions {
        let locale = self.effective_locale(locale);
        cache.get_or_compute(cache_key(principal, locale), || {
            let role_slugs = principal.role_assignment().role_slugs(locale);
            self.merge_role_permissions(role_slugs, principal.role_collection())
        })
    }

    /// Populates the principal's virtual `permissions` attribute after a read.
    ///
    /// Leaves a snapshot computed for the same locale in place. A missing
    /// snapshot, or one computed for another locale, is replaced.
    pub fn populate_permissions(
        &self,
        principal: &mut Principal,
        locale: Option<&LocaleCode>,
        cache: &PermissionCache,
    ) {
        let effective = self.effective_locale(locale).clone();
        if let Some(snapshot) = principal.permissions() {
            match snapshot {
                PermissionSnapshot::Malformed => return,
                PermissionSnapshot::Resolved {
                    locale: snapshot_locale,
                    ..
                } if snapshot_applies(principal, snapshot_locale.as_ref(), &effective) => return,
                PermissionSnapshot::Resolved { .. } => {}
            }
        }

        let permissions = self.resolve_permissions(principal, Some(&effective), cache);
        let snapshot_locale = (!principal.is_client()).then_some(effective);
        principal.set_permissions(PermissionSnapshot::Resolved {
            locale: snapshot_locale,
            permissions,
        });
    }

    /// Returns the permissions for an evaluation, computing them if needed.
    pub(super) fn current_permissions<'a>(
        &self,
        principal: &'a Principal,
        locale: Option<&LocaleCode>,
        cache: &PermissionCache,
    ) -> ResolvedPermissions<'a> {
        match self.attached_permissions(principal, locale) {
            ResolvedPermissions::Absent => {
                ResolvedPermissions::Cached(self.resolve_permissions(principal, locale, cache))
            }
            resolved => resolved,
        }
    }

    /// Returns the permissions for an evaluation without computing them.
    pub(super) fn known_permissions<'a>(
        &self,
        principal: &'a Principal,
        locale: Option<&LocaleCode>,
        cache: &PermissionCache,
    ) -> ResolvedPermissions<'a> {
        match self.attached_permissions(principal, locale) {
            ResolvedPermissions::Absent => cache
                .get(&cache_key(principal, self.effective_locale(locale)))
                .map_or(ResolvedPermissions::Absent, ResolvedPermissions::Cached),
            resolved => resolved,
        }
    }

    fn attached_permissions<'a>(
        &self,
        principal: &'a Principal,
        locale: Option<&LocaleCode>,
    ) -> ResolvedPermissions<'a> {
        let effective = self.effective_locale(locale);
        match principal.permissions() {
            Some(PermissionSnapshot::Malformed) => ResolvedPermissions::Malformed,
            Some(PermissionSnapshot::Resolved {
                locale: snapshot_locale,
                permissions,
            }) if snapshot_applies(principal, snapshot_locale.as_ref(), effective) => {
                ResolvedPermissions::Attached(permissions)
            }
            _ => ResolvedPermissions::Absent,
        }
    }
}

fn cache_key(principal: &Principal, locale: &LocaleCode) -> PermissionCacheKey {
    PermissionCacheKey {
        principal_id: principal.id().to_owned(),
        role_collection: principal.role_collection(),
        locale: (!principal.is_client()).then(|| locale.clone()),
    }
}

fn snapshot_applies(
    principal: &Principal,
    snapshot_locale: Option<&LocaleCode>,
    locale: &LocaleCode,
) -> bool {
    principal.is_client() || snapshot_locale == Some(locale)
}
