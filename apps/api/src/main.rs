//! Lotus access oracle composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use lotus_application::AccessService;
use lotus_core::AppError;
use lotus_infrastructure::InMemoryRoleRegistry;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let settings = config.access_settings()?;

    let registry = match &config.role_registry_path {
        Some(path) => InMemoryRoleRegistry::from_json_file(path)?,
        None => InMemoryRoleRegistry::builtin()?,
    };
    for (project, roles) in registry.roles_by_project() {
        info!(project, roles = roles.len(), "manager roles registered");
    }

    let app_state = AppState {
        access_service: AccessService::new(Arc::new(registry), settings),
        api_token: Arc::from(config.access_api_token.as_str()),
    };
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(%address, "lotus access api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))
}
