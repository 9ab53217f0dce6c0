//! Row model for the `issues` table.

use sqlx::FromRow;
use tracker_core::issue::Issue;
use tracker_core::types::Timestamp;

/// A row from the `issues` table (without the internal `seq` column).
#[derive(Debug, Clone, FromRow)]
pub struct IssueRow {
    pub id: String,
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: Timestamp,
    pub updated_on: Timestamp,
}

impl From<IssueRow> for Issue {
    fn from(row: IssueRow) -> Self {
        Issue {
            id: row.id,
            project: row.project,
            issue_title: row.issue_title,
            issue_text: row.issue_text,
            created_by: row.created_by,
            assigned_to: row.assigned_to,
            status_text: row.status_text,
            open: row.open,
            created_on: row.created_on,
            updated_on: row.updated_on,
        }
    }
}
