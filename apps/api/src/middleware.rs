use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use lotus_core::AppError;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

/// Rejects requests that do not present the configured bearer token.
pub async fn require_api_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let Some(token) = bearer_token(request.headers()) else {
        return Err(AppError::Unauthorized("bearer token required".to_owned()).into());
    };

    if !tokens_match(token, &state.api_token) {
        debug!(path = %request.uri().path(), "rejected request with invalid api token");
        return Err(AppError::Unauthorized("invalid api token".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Compares without short-circuiting on the first differing byte.
fn tokens_match(presented: &str, expected: &str) -> bool {
    presented.len() == expected.len()
        && presented
            .bytes()
            .zip(expected.bytes())
            .fold(0_u8, |difference, (left, right)| difference | (left ^ right))
            == 0
}
