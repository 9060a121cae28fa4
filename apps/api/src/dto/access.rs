use lotus_application::{AccessArgs, AccessDecision, CollectionAccess, FieldAccess};
use lotus_domain::FieldContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Field context of a field-level check.
#[derive(Debug, Clone, Copy, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-context-request.ts"
)]
pub struct FieldContextRequest {
    pub localized: bool,
}

impl From<FieldContextRequest> for FieldContext {
    fn from(value: FieldContextRequest) -> Self {
        Self {
            localized: value.localized,
        }
    }
}

/// Incoming payload for a single permission check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-request.ts"
)]
pub struct AccessCheckRequest {
    #[ts(type = "Record<string, unknown> | null")]
    pub user: Option<Value>,
    pub collection: String,
    #[ts(type = "\"read\" | \"create\" | \"update\" | \"delete\"")]
    pub operation: String,
    pub field: Option<FieldContextRequest>,
    pub locale: Option<String>,
    pub doc_id: Option<String>,
}

/// Decision and the rule that produced it.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-check-response.ts"
)]
pub struct AccessCheckResponse {
    pub allowed: bool,
    pub reason: String,
}

impl From<AccessDecision> for AccessCheckResponse {
    fn from(value: AccessDecision) -> Self {
        Self {
            allowed: value.allowed,
            reason: value.reason.as_str().to_owned(),
        }
    }
}

/// Incoming payload for evaluating a collection's access block.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/collection-access-request.ts"
)]
pub struct CollectionAccessRequest {
    #[ts(type = "Record<string, unknown> | null")]
    pub user: Option<Value>,
    pub collection: String,
    pub id: Option<String>,
    pub locale: Option<String>,
    pub implicit_read: Option<bool>,
    pub disable_delete: Option<bool>,
}

/// Evaluated collection access block.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/collection-access-response.ts"
)]
pub struct CollectionAccessResponse {
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

/// Incoming payload for evaluating a field's access block.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-access-request.ts"
)]
pub struct FieldAccessRequest {
    #[ts(type = "Record<string, unknown> | null")]
    pub user: Option<Value>,
    pub collection: String,
    pub localized: bool,
    pub locale: Option<String>,
}

/// Evaluated field access block.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-access-response.ts"
)]
pub struct FieldAccessResponse {
    pub read: bool,
    pub create: bool,
    pub update: bool,
}

/// Incoming payload for the locale query filter.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/locale-filter-request.ts"
)]
pub struct LocaleFilterRequest {
    #[ts(type = "Record<string, unknown> | null")]
    pub user: Option<Value>,
    pub collection: String,
    pub locale: Option<String>,
}

impl CollectionAccessResponse {
    /// Evaluates every predicate of `access` against one set of arguments.
    pub fn evaluate(access: &CollectionAccess, args: &AccessArgs<'_>) -> Self {
        Self {
            read: (access.read)(args),
            create: (access.create)(args),
            update: (access.update)(args),
            delete: (access.delete)(args),
        }
    }
}

impl FieldAccessResponse {
    /// Evaluates every predicate of `access` against one set of arguments.
    pub fn evaluate(access: &FieldAccess, args: &AccessArgs<'_>) -> Self {
        Self {
            read: (access.read)(args),
            create: (access.create)(args),
            update: (access.update)(args),
        }
    }
}
