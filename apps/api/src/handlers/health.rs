use axum::Json;
use axum::extract::State;
use lotus_domain::RoleCollection;

use crate::dto::HealthResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = &state.access_service;
    let registry = service.registry();

    Json(HealthResponse {
        status: "ok",
        default_locale: service.settings().default_locale().to_string(),
        manager_roles: registry.list_roles(RoleCollection::Managers).len(),
        client_roles: registry.list_roles(RoleCollection::Clients).len(),
    })
}
