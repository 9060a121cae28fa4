use std::collections::BTreeMap;

use lotus_domain::{MergedPermissions, RoleDefinition};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub slug: String,
    pub label: Option<String>,
    pub project: Option<String>,
    #[ts(type = "\"managers\" | \"clients\"")]
    pub role_collection: String,
    pub localized: bool,
    pub permissions: BTreeMap<String, Vec<String>>,
}

impl From<&RoleDefinition> for RoleResponse {
    fn from(value: &RoleDefinition) -> Self {
        Self {
            slug: value.slug().to_owned(),
            label: value.label().map(str::to_owned),
            project: value.project().map(str::to_owned),
            role_collection: value.role_collection().as_str().to_owned(),
            localized: value.localized(),
            permissions: value
                .permissions()
                .iter()
                .map(|(collection, levels)| {
                    (
                        collection.clone(),
                        levels.iter().map(|level| level.as_str().to_owned()).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Incoming payload for merging role permissions.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/merge-permissions-request.ts"
)]
pub struct MergePermissionsRequest {
    pub role_slugs: Vec<String>,
    #[ts(type = "\"managers\" | \"clients\"")]
    pub role_collection: String,
}

/// Merged permissions keyed by collection.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/merged-permissions-response.ts"
)]
pub struct MergedPermissionsResponse {
    pub permissions: BTreeMap<String, Vec<String>>,
}

impl From<&MergedPermissions> for MergedPermissionsResponse {
    fn from(value: &MergedPermissions) -> Self {
        Self {
            permissions: value
                .iter()
                .map(|(collection, levels)| {
                    (
                        collection.to_owned(),
                        levels.iter().map(|level| level.as_str().to_owned()).collect(),
                    )
                })
                .collect(),
        }
    }
}
