//! Issue operations scoped to a project.
//!
//! Every operation issues at most one read and one write against the
//! [`IssueStore`]. Expected failures (missing input, unknown id) come back
//! as outcome variants; only storage failures are `Err`.

use std::sync::Arc;

use crate::error::CoreError;
use crate::filter::IssueFilter;
use crate::issue::{CreateIssue, Issue, MissingRequiredFields};
use crate::store::IssueStore;
use crate::types::{new_issue_id, now, IssueId};
use crate::update::{next_updated_on, requested_id, DeleteIssue, IssuePatch, UpdateIssue};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Issue),
    MissingRequiredFields(MissingRequiredFields),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(IssueId),
    MissingId,
    NoFieldsProvided(IssueId),
    NotFound(IssueId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(IssueId),
    MissingId,
    NotFound(IssueId),
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Validation, defaulting, filtering and partial updates over a store.
#[derive(Clone)]
pub struct IssueTracker {
    store: Arc<dyn IssueStore>,
}

impl IssueTracker {
    pub fn new(store: Arc<dyn IssueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn IssueStore {
        self.store.as_ref()
    }

    /// Validate `input`, fill defaults and system fields, then persist.
    pub async fn create(
        &self,
        project: &str,
        input: CreateIssue,
    ) -> Result<CreateOutcome, CoreError> {
        let issue = match input.into_issue(project, new_issue_id, now()) {
            Ok(issue) => issue,
            Err(missing) => return Ok(CreateOutcome::MissingRequiredFields(missing)),
        };
        self.store.insert(&issue).await?;
        Ok(CreateOutcome::Created(issue))
    }

    /// Issues in `project` matching every constraint of `filter`.
    pub async fn list(
        &self,
        project: &str,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, CoreError> {
        self.store.find_many(project, filter).await
    }

    /// Apply a partial update.
    ///
    /// Checks run in a fixed order: missing id, then no effective changes,
    /// then unknown issue.
    pub async fn update(
        &self,
        project: &str,
        request: UpdateIssue,
    ) -> Result<UpdateOutcome, CoreError> {
        let (id, changes) = request.into_parts();
        let Some(id) = id else {
            return Ok(UpdateOutcome::MissingId);
        };
        if changes.is_empty() {
            return Ok(UpdateOutcome::NoFieldsProvided(id));
        }

        let Some(existing) = self.store.find_one(project, &id).await? else {
            return Ok(UpdateOutcome::NotFound(id));
        };

        let patch = IssuePatch {
            changes,
            updated_on: next_updated_on(existing.updated_on, now()),
        };
        if self.store.update_one(project, &id, &patch).await? {
            Ok(UpdateOutcome::Updated(id))
        } else {
            Ok(UpdateOutcome::NotFound(id))
        }
    }

    pub async fn delete(
        &self,
        project: &str,
        request: DeleteIssue,
    ) -> Result<DeleteOutcome, CoreError> {
        let Some(id) = requested_id(request.id) else {
            return Ok(DeleteOutcome::MissingId);
        };
        if self.store.delete_one(project, &id).await? {
            Ok(DeleteOutcome::Deleted(id))
        } else {
            Ok(DeleteOutcome::NotFound(id))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
