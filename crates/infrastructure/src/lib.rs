//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod builtin_roles;
mod in_memory_role_registry;
mod principal_document;
mod role_table;

pub use in_memory_role_registry::InMemoryRoleRegistry;
pub use principal_document::{DocumentId, PrincipalDocument, ResourceAccessDocument};
pub use role_table::{RoleTableDocument, RoleTableEntry};
