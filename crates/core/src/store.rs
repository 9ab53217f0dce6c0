//! Storage collaborator interface.
//!
//! The tracker depends only on this trait. Every operation is scoped to a
//! project; a single call is expected to be atomic on the backend side and
//! no locking happens above it.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::filter::IssueFilter;
use crate::issue::Issue;
use crate::update::IssuePatch;

#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Short backend name for diagnostics (e.g. `"memory"`, `"postgres"`).
    fn backend(&self) -> &'static str;

    /// Persist a fully populated issue.
    async fn insert(&self, issue: &Issue) -> Result<(), CoreError>;

    /// All issues in `project` satisfying `filter`, in insertion order.
    async fn find_many(
        &self,
        project: &str,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, CoreError>;

    async fn find_one(&self, project: &str, id: &str) -> Result<Option<Issue>, CoreError>;

    /// Apply `patch` to the issue. Returns `false` when nothing matched.
    async fn update_one(
        &self,
        project: &str,
        id: &str,
        patch: &IssuePatch,
    ) -> Result<bool, CoreError>;

    /// Permanently remove the issue. Returns `false` when nothing matched.
    async fn delete_one(&self, project: &str, id: &str) -> Result<bool, CoreError>;

    /// Cheap liveness probe.
    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
