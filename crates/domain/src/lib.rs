//! Domain types for role-based access control.

#![forbid(unsafe_code)]

mod merged;
mod permission;
pub mod principal;
mod role;

pub use merged::{MergedPermissions, PermissionSnapshot};
pub use permission::{AccessOperation, PermissionLevel};
pub use principal::{Client, FieldContext, Manager, Principal, ResourceAccess, RoleAssignment};
pub use role::{RoleCollection, RoleDefinition};
