//! In-memory issue store.
//!
//! Issues are kept per project in insertion order behind a
//! `tokio::sync::RwLock`. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracker_core::error::CoreError;
use tracker_core::filter::IssueFilter;
use tracker_core::issue::Issue;
use tracker_core::store::IssueStore;
use tracker_core::update::IssuePatch;

#[derive(Debug, Default)]
pub struct MemoryIssueStore {
    projects: RwLock<HashMap<String, Vec<Issue>>>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of issues across all projects.
    pub async fn len(&self) -> usize {
        self.projects.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, issue: &Issue) -> Result<(), CoreError> {
        let mut projects = self.projects.write().await;
        let issues = projects.entry(issue.project.clone()).or_default();
        if issues.iter().any(|i| i.id == issue.id) {
            return Err(CoreError::Internal(format!(
                "duplicate issue id {}",
                issue.id
            )));
        }
        issues.push(issue.clone());
        Ok(())
    }

    async fn find_many(
        &self,
        project: &str,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, CoreError> {
        let projects = self.projects.read().await;
        Ok(projects
            .get(project)
            .map(|issues| {
                issues
                    .iter()
                    .filter(|issue| filter.matches(issue))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(&self, project: &str, id: &str) -> Result<Option<Issue>, CoreError> {
        let projects = self.projects.read().await;
        Ok(projects
            .get(project)
            .and_then(|issues| issues.iter().find(|i| i.id == id))
            .cloned())
    }

    async fn update_one(
        &self,
        project: &str,
        id: &str,
        patch: &IssuePatch,
    ) -> Result<bool, CoreError> {
        let mut projects = self.projects.write().await;
        let Some(issue) = projects
            .get_mut(project)
            .and_then(|issues| issues.iter_mut().find(|i| i.id == id))
        else {
            return Ok(false);
        };
        patch.apply_to(issue);
        Ok(true)
    }

    async fn delete_one(&self, project: &str, id: &str) -> Result<bool, CoreError> {
        let mut projects = self.projects.write().await;
        let Some(issues) = projects.get_mut(project) else {
            return Ok(false);
        };
        let Some(pos) = issues.iter().position(|i| i.id == id) else {
            return Ok(false);
        };
        issues.remove(pos);
        if issues.is_empty() {
            projects.remove(project);
        }
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
