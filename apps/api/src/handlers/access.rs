use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use lotus_application::{AccessArgs, PermissionCache, PermissionCheck, RoleBasedAccessOptions};
use lotus_domain::AccessOperation;

use crate::dto::{
    AccessCheckRequest, AccessCheckResponse, AllowedResponse, CollectionAccessRequest,
    CollectionAccessResponse, FieldAccessRequest, FieldAccessResponse, LocaleFilterRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{decode_user, parse_locale, require_collection};


pub async fn check_access_handler(
    State(state): State<AppState>,
    Json(payload): Json<AccessCheckRequest>,
) -> ApiResult<Json<AccessCheckResponse>> {
    require_collection(&payload.collection)?;
    let operation = AccessOperation::from_str(&payload.operation)?;
    let locale = parse_locale(payload.locale)?;
    let service = &state.access_service;
    let user = decode_user(payload.user, service.effective_locale(locale.as_ref()))?;

    let mut check = PermissionCheck::new(user.as_ref(), &payload.collection, operation)
        .with_locale(locale.as_ref())
        .with_doc_id(payload.doc_id.as_deref());
    if let Some(field) = payload.field {
        check = check.with_field(field.into());
    }

    let decision = service.explain_permission(&check, &PermissionCache::new());
    Ok(Json(AccessCheckResponse::from(decision)))
}

pub async fn collection_access_handler(
    State(state): State<AppState>,
    Json(payload): Json<CollectionAccessRequest>,
) -> ApiResult<Json<CollectionAccessResponse>> {
    require_collection(&payload.collection)?;
    let locale = parse_locale(payload.locale)?;
    let service = &state.access_service;
    let user = decode_user(payload.user, service.effective_locale(locale.as_ref()))?;

    let mut options = RoleBasedAccessOptions::default();
    if payload.implicit_read == Some(false) {
        options = options.without_implicit_read();
    }
    if payload.disable_delete == Some(true) {
        options = options.disable_delete();
    }

    let access = service.role_based_access(&payload.collection, options);
    let cache = PermissionCache::new();
    let args = AccessArgs::new(user.as_ref(), &cache)
        .with_id(payload.id.as_deref())
        .with_locale(locale.as_ref());

    Ok(Json(CollectionAccessResponse::evaluate(&access, &args)))
}

pub async fn field_access_handler(
    State(state): State<AppState>,
    Json(payload): Json<FieldAccessRequest>,
) -> ApiResult<Json<FieldAccessResponse>> {
    require_collection(&payload.collection)?;
    let locale = parse_locale(payload.locale)?;
    let service = &state.access_service;
    let user = decode_user(payload.user, service.effective_locale(locale.as_ref()))?;

    let access = service.create_field_access(&payload.collection, payload.localized);
    let cache = PermissionCache::new();
    let args = AccessArgs::new(user.as_ref(), &cache).with_locale(locale.as_ref());

    Ok(Json(FieldAccessResponse::evaluate(&access, &args)))
}

/// Evaluates the locale filter on its own.
///
/// The filter only reads permissions that are already known, so a principal
/// without an attached `permissions` snapshot falls back to the
/// managers-read, clients-don't default.
pub async fn locale_filter_handler(
    State(state): State<AppState>,
    Json(payload): Json<LocaleFilterRequest>,
) -> ApiResult<Json<AllowedResponse>> {
    require_collection(&payload.collection)?;
    let locale = parse_locale(payload.locale)?;
    let service = &state.access_service;
    let user = decode_user(payload.user, service.effective_locale(locale.as_ref()))?;

    let allowed = service.create_locale_filter(
        user.as_ref(),
        &payload.collection,
        locale.as_ref(),
        &PermissionCache::new(),
    );

    Ok(Json(AllowedResponse { allowed }))
}
