use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use lotus_domain::RoleCollection;

use crate::dto::{MergePermissionsRequest, MergedPermissionsResponse, RoleResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Path(role_collection): Path<String>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let role_collection = RoleCollection::from_str(&role_collection)?;
    let roles = state
        .access_service
        .registry()
        .list_roles(role_collection)
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn merge_permissions_handler(
    State(state): State<AppState>,
    Json(payload): Json<MergePermissionsRequest>,
) -> ApiResult<Json<MergedPermissionsResponse>> {
    let role_collection = RoleCollection::from_str(&payload.role_collection)?;
    let merged = state
        .access_service
        .merge_role_permissions(payload.role_slugs.as_slice(), role_collection);

    Ok(Json(MergedPermissionsResponse::from(&merged)))
}
