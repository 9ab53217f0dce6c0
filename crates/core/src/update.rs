//! Partial updates and deletes.
//!
//! Only fields that carry a non-empty value are applied. An empty string
//! means "leave unchanged", never "clear"; whitespace is a real value. `open` counts only when its wire
//! value coerces to a boolean.

use serde::Deserialize;

use crate::issue::{Issue, OpenValue};
use crate::types::{IssueId, Timestamp};

/// Update request: the target `_id` plus any fields to overwrite.
///
/// `project`, `created_on` and `updated_on` are not user-editable and are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIssue {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub issue_text: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub open: Option<OpenValue>,
}

/// Delete request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteIssue {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

/// An empty or absent `_id` is treated the same way.
pub(crate) fn requested_id(id: Option<String>) -> Option<IssueId> {
    non_empty(id)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl UpdateIssue {
    /// Split the request into its target id and the effective changes.
    pub fn into_parts(self) -> (Option<IssueId>, IssueChanges) {
        let changes = IssueChanges {
            issue_title: non_empty(self.issue_title),
            issue_text: non_empty(self.issue_text),
            created_by: non_empty(self.created_by),
            assigned_to: non_empty(self.assigned_to),
            status_text: non_empty(self.status_text),
            open: self.open.as_ref().and_then(OpenValue::as_bool),
        };
        (requested_id(self.id), changes)
    }
}

/// The set of field overwrites a request actually asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueChanges {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssueChanges {
    pub fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.status_text.is_none()
            && self.open.is_none()
    }
}

/// Changes plus the refreshed modification time, as handed to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePatch {
    pub changes: IssueChanges,
    pub updated_on: Timestamp,
}

impl IssuePatch {
    /// Overwrite the changed fields on `issue` and bump `updated_on`.
    pub fn apply_to(&self, issue: &mut Issue) {
        let c = &self.changes;
        if let Some(v) = &c.issue_title {
            issue.issue_title.clone_from(v);
        }
        if let Some(v) = &c.issue_text {
            issue.issue_text.clone_from(v);
        }
        if let Some(v) = &c.created_by {
            issue.created_by.clone_from(v);
        }
        if let Some(v) = &c.assigned_to {
            issue.assigned_to.clone_from(v);
        }
        if let Some(v) = &c.status_text {
            issue.status_text.clone_from(v);
        }
        if let Some(open) = c.open {
            issue.open = open;
        }
        issue.updated_on = self.updated_on;
    }
}

/// Pick the next `updated_on`: `now`, unless that would not move forward.
pub fn next_updated_on(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
