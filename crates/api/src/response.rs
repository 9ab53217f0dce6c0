//! Response bodies for issue operations.
//!
//! Successful writes answer `{ "result": ..., "_id": ... }`; rejected
//! requests answer `{ "error": ... }`, with `_id` echoed when one was sent.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracker_core::types::IssueId;

pub const MSG_UPDATED: &str = "successfully updated";
pub const MSG_DELETED: &str = "successfully deleted";
pub const MSG_REQUIRED_FIELDS_MISSING: &str = "required field(s) missing";
pub const MSG_MISSING_ID: &str = "missing _id";
pub const MSG_NO_UPDATE_FIELDS: &str = "no update field(s) sent";
pub const MSG_COULD_NOT_UPDATE: &str = "could not update";
pub const MSG_COULD_NOT_DELETE: &str = "could not delete";

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: &'static str,
    #[serde(rename = "_id")]
    pub id: IssueId,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<IssueId>,
}

/// `200 { result, _id }`
pub fn success(result: &'static str, id: IssueId) -> Response {
    (StatusCode::OK, Json(ResultResponse { result, id })).into_response()
}

/// `{ error }` or `{ error, _id }` with the given status.
pub fn rejection(status: StatusCode, error: &'static str, id: Option<IssueId>) -> Response {
    (status, Json(ErrorResponse { error, id })).into_response()
}
