use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Incoming payload for populating a principal's permissions.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resolve-principal-request.ts"
)]
pub struct ResolvePrincipalRequest {
    #[ts(type = "Record<string, unknown>")]
    pub user: Value,
    pub locale: Option<String>,
}

/// Principal record with its `permissions` attribute populated.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/resolve-principal-response.ts"
)]
pub struct ResolvePrincipalResponse {
    #[ts(type = "Record<string, unknown>")]
    pub user: Value,
}
