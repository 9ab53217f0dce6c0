//! Handlers for the `/issues/{project}` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracker_core::filter::IssueFilter;
use tracker_core::issue::{CreateIssue, Issue};
use tracker_core::tracker::{CreateOutcome, DeleteOutcome, UpdateOutcome};
use tracker_core::update::{DeleteIssue, UpdateIssue};

use crate::error::AppResult;
use crate::extract::Payload;
use crate::response::{
    rejection, success, MSG_COULD_NOT_DELETE, MSG_COULD_NOT_UPDATE, MSG_DELETED, MSG_MISSING_ID,
    MSG_NO_UPDATE_FIELDS, MSG_REQUIRED_FIELDS_MISSING, MSG_UPDATED,
};
use crate::state::AppState;

/// List issues in a project. Every query parameter is an exact-match filter.
pub async fn list_issues(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<Issue>>> {
    let filter = IssueFilter::from_pairs(params);
    let issues = state.tracker.list(&project, &filter).await?;

    tracing::debug!(project = %project, count = issues.len(), "Listed issues");

    Ok(Json(issues))
}

/// Create an issue; responds with the full issue including system fields.
pub async fn create_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Payload(input): Payload<CreateIssue>,
) -> AppResult<Response> {
    match state.tracker.create(&project, input).await? {
        CreateOutcome::Created(issue) => {
            tracing::info!(project = %project, issue_id = %issue.id, "Issue created");
            Ok(Json(issue).into_response())
        }
        CreateOutcome::MissingRequiredFields(err) => {
            tracing::debug!(project = %project, missing = ?err.missing, "Issue rejected");
            Ok(rejection(
                StatusCode::BAD_REQUEST,
                MSG_REQUIRED_FIELDS_MISSING,
                None,
            ))
        }
    }
}

/// Overwrite the non-empty fields of the issue named by `_id`.
pub async fn update_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Payload(request): Payload<UpdateIssue>,
) -> AppResult<Response> {
    let response = match state.tracker.update(&project, request).await? {
        UpdateOutcome::Updated(id) => {
            tracing::info!(project = %project, issue_id = %id, "Issue updated");
            success(MSG_UPDATED, id)
        }
        UpdateOutcome::MissingId => {
            tracing::debug!(project = %project, "Update without _id");
            rejection(StatusCode::BAD_REQUEST, MSG_MISSING_ID, None)
        }
        UpdateOutcome::NoFieldsProvided(id) => {
            tracing::debug!(project = %project, issue_id = %id, "Update without changes");
            rejection(StatusCode::BAD_REQUEST, MSG_NO_UPDATE_FIELDS, Some(id))
        }
        UpdateOutcome::NotFound(id) => {
            tracing::debug!(project = %project, issue_id = %id, "Update target not found");
            rejection(StatusCode::NOT_FOUND, MSG_COULD_NOT_UPDATE, Some(id))
        }
    };
    Ok(response)
}

/// Permanently remove the issue named by `_id`.
pub async fn delete_issue(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Payload(request): Payload<DeleteIssue>,
) -> AppResult<Response> {
    let response = match state.tracker.delete(&project, request).await? {
        DeleteOutcome::Deleted(id) => {
            tracing::info!(project = %project, issue_id = %id, "Issue deleted");
            success(MSG_DELETED, id)
        }
        DeleteOutcome::MissingId => {
            tracing::debug!(project = %project, "Delete without _id");
            rejection(StatusCode::BAD_REQUEST, MSG_MISSING_ID, None)
        }
        DeleteOutcome::NotFound(id) => {
            tracing::debug!(project = %project, issue_id = %id, "Delete target not found");
            rejection(StatusCode::NOT_FOUND, MSG_COULD_NOT_DELETE, Some(id))
        }
    };
    Ok(response)
}
