//! Application services and ports.

#![forbid(unsafe_code)]

mod access_control;
mod access_service;
mod access_settings;
mod permission_cache;
mod permission_merger;
mod role_registry;

#[cfg(test)]
mod test_support;

pub use access_control::{
    AccessArgs, AccessOverrides, AccessPredicate, CollectionAccess, FieldAccess,
    RoleBasedAccessOptions, deny_all,
};
pub use access_service::{AccessDecision, AccessService, DecisionReason, PermissionCheck};
pub use access_settings::{AccessSettings, RESTRICTED_COLLECTIONS};
pub use permission_cache::{PermissionCache, PermissionCacheKey};
pub use permission_merger::merge_role_permissions;
pub use role_registry::RoleRegistry;
