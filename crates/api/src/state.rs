use std::sync::Arc;

use tracker_core::tracker::IssueTracker;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Issue operations over the configured storage backend.
    pub tracker: IssueTracker,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
