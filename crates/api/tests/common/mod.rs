#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tracker_api::config::ServerConfig;
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;
use tracker_core::store::IssueStore;
use tracker_core::tracker::IssueTracker;
use tracker_db::memory::MemoryIssueStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Goes through `build_app_router` so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryIssueStore::new()))
}

/// Build the full application router over the given store.
pub fn build_test_app_with(store: Arc<dyn IssueStore>) -> Router {
    let config = test_config();
    let state = AppState {
        tracker: IssueTracker::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send `fields` as an `application/x-www-form-urlencoded` body.
pub async fn send_form(
    app: &Router,
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
) -> Response<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    send_form(app, Method::POST, uri, fields).await
}

pub async fn put_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    send_form(app, Method::PUT, uri, fields).await
}

pub async fn delete_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    send_form(app, Method::DELETE, uri, fields).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an issue with the given fields and return the response body.
pub async fn create_issue(
    app: &Router,
    project: &str,
    fields: &[(&str, &str)],
) -> serde_json::Value {
    let response = post_form(app, &format!("/api/issues/{project}"), fields).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await
}
