use axum::Json;
use axum::extract::State;
use lotus_application::PermissionCache;
use lotus_core::AppError;
use lotus_infrastructure::PrincipalDocument;

use crate::dto::{ResolvePrincipalRequest, ResolvePrincipalResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{decode_user, parse_locale};

pub async fn resolve_principal_handler(
    State(state): State<AppState>,
    Json(payload): Json<ResolvePrincipalRequest>,
) -> ApiResult<Json<ResolvePrincipalResponse>> {
    let locale = parse_locale(payload.locale)?;
    let service = &state.access_service;
    let effective = service.effective_locale(locale.as_ref()).clone();

    let Some(mut principal) = decode_user(Some(payload.user), &effective)? else {
        return Err(AppError::Validation("user is required".to_owned()).into());
    };
    service.populate_permissions(&mut principal, Some(&effective), &PermissionCache::new());

    let user = serde_json::to_value(PrincipalDocument::from_principal(&principal))
        .map_err(|error| AppError::Internal(format!("failed to encode principal: {error}")))?;

    Ok(Json(ResolvePrincipalResponse { user }))
}
