use lotus_domain::{MergedPermissions, RoleCollection};
use tracing::debug;

use crate::RoleRegistry;

/// Unions the grants of every role in `role_slugs` per resource collection.
///
/// Unknown slugs contribute nothing, so stale references to retired roles
/// never fail a request. The result does not depend on slug order.
pub fn merge_role_permissions<S: AsRef<str>>(
    registry: &dyn RoleRegistry,
    role_slugs: &[S],
    role_collection: RoleCollection,
) -> MergedPermissions {
    let mut merged = MergedPermissions::new();

    for slug in role_slugs {
        let slug = slug.as_ref();
        let Some(role) = registry.lookup_role(slug, role_collection) else {
            debug!(role = slug, %role_collection, "skipping unknown role");
            continue;
        };

        for (collection, levels) in role.permissions() {
            merged.grant(collection.as_str(), levels.iter().copied());
        }
    }

    merged
}
