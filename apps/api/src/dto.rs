mod access;
mod common;
mod principals;
mod roles;

pub use access::{
    AccessCheckRequest, AccessCheckResponse, CollectionAccessRequest, CollectionAccessResponse,
    FieldAccessRequest, FieldAccessResponse, FieldContextRequest, LocaleFilterRequest,
};
pub use common::{AllowedResponse, HealthResponse};
pub use principals::{ResolvePrincipalRequest, ResolvePrincipalResponse};
pub use roles::{MergePermissionsRequest, MergedPermissionsResponse, RoleResponse};
