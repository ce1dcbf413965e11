#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use custody_api::config::ServerConfig;
use custody_api::router::build_app_router;
use custody_api::state::AppState;
use custody_core::types::Principal;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const EXECUTIVE: &str = "executive";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        executive: Principal::new(EXECUTIVE),
        genesis_height: 0,
        registry_active: true,
        event_journal_capacity: 100,
    }
}

/// Build the full application router, as `main.rs` does, with the journal
/// task running.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState::new(config);
    state.spawn_journal();
    build_app_router(state)
}

/// Send a request as `caller` (no `x-principal` header when `None`).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    caller: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder.header("x-principal", caller);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, caller: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(caller), None).await
}

pub async fn post_json(app: &Router, uri: &str, caller: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(caller), Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, caller: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(caller), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, caller: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(caller), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

pub fn asset_body(descriptor: &str) -> Value {
    json!({
        "content_descriptor": descriptor,
        "storage_capacity": 500,
        "summary": "s",
        "classification_markers": ["a"],
    })
}

/// Register an asset as `caller` and return its id.
pub async fn register(app: &Router, caller: &str, descriptor: &str) -> u64 {
    let response = post_json(app, "/api/v1/assets", caller, asset_body(descriptor)).await;
    let json = expect_status(response, StatusCode::CREATED).await;
    json["data"]["asset_id"].as_u64().unwrap()
}
