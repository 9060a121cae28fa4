use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::state::AppState;

use super::build_router;

const TOKEN: &str = "router-token-0123456789abcdef0123";

fn router() -> Router {
    build_router(AppState::for_tests(TOKEN), "http://localhost:3000")
        .unwrap_or_else(|error| panic!("router failed to build: {error}"))
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::empty())
        .unwrap_or_else(|error| panic!("invalid request: {error}"))
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|error| panic!("invalid request: {error}"))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = router()
        .oneshot(request)
        .await
        .unwrap_or_else(|error| match error {});
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_is_public() {
    let (status, body) = send(get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "ok",
            "default_locale": "en",
            "manager_roles": 10,
            "client_roles": 4
        })
    );
}

#[tokio::test]
async fn api_routes_require_the_configured_token() {
    let (status, _) = send(get("/api/roles/managers", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(get("/api/roles/managers", Some("not-the-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("unauthorized"));
    assert!(body.get("message").is_some());
}

#[tokio::test]
async fn roles_are_listed_per_collection() {
    let (status, body) = send(get("/api/roles/clients", Some(TOKEN))).await;
    assert_eq!(status, StatusCode::OK);

    let slugs: Vec<&str> = body
        .as_array()
        .map(|roles| {
            roles
                .iter()
                .filter_map(|role| role.get("slug").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(
        slugs,
        [
            "atlas-sync",
            "content-importer",
            "we-meditate-app",
            "we-meditate-web"
        ]
    );

    let (status, _) = send(get("/api/roles/editors", Some(TOKEN))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn permissions_merge_unions_roles() {
    let (status, body) = send(post(
        "/api/permissions/merge",
        &json!({
            "role_slugs": ["meditations-editor", "retired-role", "music-editor"],
            "role_collection": "managers"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["permissions"]["meditations"],
        json!(["read", "create", "update"])
    );
    assert_eq!(
        body["permissions"]["music"],
        json!(["read", "create", "update", "delete"])
    );
}

#[tokio::test]
async fn access_check_runs_through_the_engine() {
    let (status, body) = send(post(
        "/api/access/check",
        &json!({
            "user": {
                "id": "c-1",
                "collection": "clients",
                "active": true,
                "roles": ["content-importer"]
            },
            "collection": "pages",
            "operation": "delete"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "allowed": false, "reason": "client_delete_blocked" })
    );
}

#[tokio::test]
async fn undecodable_user_is_a_bad_request() {
    let (status, body) = send(post(
        "/api/access/check",
        &json!({
            "user": { "id": "m-1", "collection": "managers", "roles": 7 },
            "collection": "pages",
            "operation": "read"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("validation"));
    assert!(body.get("message").and_then(Value::as_str).is_some());
}

#[tokio::test]
async fn resolve_populates_permissions_for_request_locale() {
    let (status, body) = send(post(
        "/api/principals/resolve",
        &json!({
            "user": {
                "id": "m-1",
                "collection": "managers",
                "active": true,
                "roles": { "en": ["meditations-editor"], "cs": ["translator"] }
            },
            "locale": "cs"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["permissions"]["music"], json!(["translate"]));
    assert!(body["user"]["permissions"].get("images").is_none());
    assert_eq!(body["user"]["permissionsLocale"], json!("cs"));
}
