//! Route definitions for issues.
//!
//! Mounted at `/issues` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::issues;
use crate::state::AppState;

/// Issue routes. The issue id travels in the body for writes.
///
/// ```text
/// GET    /{project}    -> list_issues   (query string filters)
/// POST   /{project}    -> create_issue
/// PUT    /{project}    -> update_issue
/// DELETE /{project}    -> delete_issue
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{project}",
        get(issues::list_issues)
            .post(issues::create_issue)
            .put(issues::update_issue)
            .delete(issues::delete_issue),
    )
}
