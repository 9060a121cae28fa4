use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use lotus_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

#[cfg(test)]
mod tests;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/roles/{role_collection}",
            get(handlers::roles::list_roles_handler),
        )
        .route(
            "/api/permissions/merge",
            post(handlers::roles::merge_permissions_handler),
        )
        .route(
            "/api/access/check",
            post(handlers::access::check_access_handler),
        )
        .route(
            "/api/access/collection",
            post(handlers::access::collection_access_handler),
        )
        .route(
            "/api/access/fields",
            post(handlers::access::field_access_handler),
        )
        .route(
            "/api/access/locale-filter",
            post(handlers::access::locale_filter_handler),
        )
        .route(
            "/api/principals/resolve",
            post(handlers::principals::resolve_principal_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_api_token,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
