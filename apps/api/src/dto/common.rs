use serde::Serialize;
use ts_rs::TS;

/// Liveness payload with a summary of the loaded role tables.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub default_locale: String,
    #[ts(type = "number")]
    pub manager_roles: usize,
    #[ts(type = "number")]
    pub client_roles: usize,
}

/// Single boolean decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/allowed-response.ts"
)]
pub struct AllowedResponse {
    pub allowed: bool,
}
