//! Tests for `AppError` → HTTP response mapping and storage failure paths.
//!
//! The first group calls `IntoResponse` directly on `AppError` values. The
//! second drives the router over a store whose every call fails.

mod common;

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::json;
use tracker_api::error::AppError;
use tracker_core::error::CoreError;
use tracker_core::filter::IssueFilter;
use tracker_core::issue::Issue;
use tracker_core::store::IssueStore;
use tracker_core::update::IssuePatch;

use common::{body_json, delete_form, get, post_form, put_form};

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Storage maps to 500 and hides the backend error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::storage(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "postgres://admin:hunter2@db",
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("hunter2"));
}

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::Internal("duplicate issue id abc".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Storage failures through the router
// ---------------------------------------------------------------------------

struct FailingStore;

fn unavailable() -> CoreError {
    CoreError::storage(io::Error::new(io::ErrorKind::Other, "store unavailable"))
}

#[async_trait]
impl IssueStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn insert(&self, _issue: &Issue) -> Result<(), CoreError> {
        Err(unavailable())
    }

    async fn find_many(
        &self,
        _project: &str,
        _filter: &IssueFilter,
    ) -> Result<Vec<Issue>, CoreError> {
        Err(unavailable())
    }

    async fn find_one(&self, _project: &str, _id: &str) -> Result<Option<Issue>, CoreError> {
        Err(unavailable())
    }

    async fn update_one(
        &self,
        _project: &str,
        _id: &str,
        _patch: &IssuePatch,
    ) -> Result<bool, CoreError> {
        Err(unavailable())
    }

    async fn delete_one(&self, _project: &str, _id: &str) -> Result<bool, CoreError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        Err(unavailable())
    }
}

fn failing_app() -> axum::Router {
    common::build_test_app_with(Arc::new(FailingStore))
}

async fn assert_internal_error(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "An internal error occurred", "code": "INTERNAL_ERROR" })
    );
}

#[tokio::test]
async fn list_storage_failure_is_500() {
    assert_internal_error(get(&failing_app(), "/api/issues/p").await).await;
}

#[tokio::test]
async fn create_storage_failure_is_500() {
    let response = post_form(
        &failing_app(),
        "/api/issues/p",
        &[("issue_title", "A"), ("issue_text", "B"), ("created_by", "C")],
    )
    .await;
    assert_internal_error(response).await;
}

#[tokio::test]
async fn validation_runs_before_storage() {
    let response = post_form(&failing_app(), "/api/issues/p", &[("issue_title", "A")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "required field(s) missing" })
    );
}

#[tokio::test]
async fn update_storage_failure_is_500() {
    let response = put_form(
        &failing_app(),
        "/api/issues/p",
        &[("_id", "abc"), ("issue_text", "New")],
    )
    .await;
    assert_internal_error(response).await;
}

#[tokio::test]
async fn update_without_id_never_touches_storage() {
    let response = put_form(&failing_app(), "/api/issues/p", &[("issue_text", "New")]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_storage_failure_is_500() {
    let response = delete_form(&failing_app(), "/api/issues/p", &[("_id", "abc")]).await;
    assert_internal_error(response).await;
}

#[tokio::test]
async fn health_reports_degraded_store() {
    let response = get(&failing_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store"], "failing");
    assert_eq!(json["store_healthy"], false);
}
