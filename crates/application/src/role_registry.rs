use lotus_domain::{RoleCollection, RoleDefinition};

/// Read-only lookup port over the role tables.
///
/// Implementations are built once at startup and never mutated afterwards.
pub trait RoleRegistry: Send + Sync {
    /// Finds a role by slug in the table for `role_collection`.
    fn lookup_role(&self, slug: &str, role_collection: RoleCollection) -> Option<&RoleDefinition>;

    /// Lists every role in the table for `role_collection`, sorted by slug.
    fn list_roles(&self, role_collection: RoleCollection) -> Vec<&RoleDefinition>;
}
