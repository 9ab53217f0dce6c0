//! PostgreSQL store for the `issues` table.

use async_trait::async_trait;
use sqlx::PgPool;
use tracker_core::error::CoreError;
use tracker_core::filter::IssueFilter;
use tracker_core::issue::{
    Issue, FIELD_ASSIGNED_TO, FIELD_CREATED_BY, FIELD_ID, FIELD_ISSUE_TEXT, FIELD_ISSUE_TITLE,
    FIELD_STATUS_TEXT,
};
use tracker_core::store::IssueStore;
use tracker_core::update::IssuePatch;

use crate::models::issue::IssueRow;

/// Column list for `issues` queries.
const COLUMNS: &str = "\
    id, project, issue_title, issue_text, created_by, \
    assigned_to, status_text, open, created_on, updated_on";

/// Map a filterable text field to its column.
fn text_column(field: &str) -> Option<&'static str> {
    match field {
        FIELD_ID => Some("id"),
        FIELD_ISSUE_TITLE => Some("issue_title"),
        FIELD_ISSUE_TEXT => Some("issue_text"),
        FIELD_CREATED_BY => Some("created_by"),
        FIELD_ASSIGNED_TO => Some("assigned_to"),
        FIELD_STATUS_TEXT => Some("status_text"),
        _ => None,
    }
}

/// Issue storage backed by PostgreSQL.
#[derive(Clone)]
pub struct PgIssueStore {
    pool: PgPool,
}

impl PgIssueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl IssueStore for PgIssueStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, issue: &Issue) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO issues \
                (id, project, issue_title, issue_text, created_by, \
                 assigned_to, status_text, open, created_on, updated_on) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&issue.id)
        .bind(&issue.project)
        .bind(&issue.issue_title)
        .bind(&issue.issue_text)
        .bind(&issue.created_by)
        .bind(&issue.assigned_to)
        .bind(&issue.status_text)
        .bind(issue.open)
        .bind(issue.created_on)
        .bind(issue.updated_on)
        .execute(&self.pool)
        .await
        .map_err(CoreError::storage)?;
        Ok(())
    }

    /// Typed constraints become `WHERE` conditions; pass-through keys are
    /// checked on the returned rows.
    async fn find_many(
        &self,
        project: &str,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, CoreError> {
        let texts: Vec<(&'static str, &str)> = filter
            .text_constraints()
            .filter_map(|(field, value)| text_column(field).map(|col| (col, value)))
            .collect();

        let mut conditions: Vec<String> = vec!["project = $1".to_string()];
        let mut param_idx: usize = 2;

        for (column, _) in &texts {
            conditions.push(format!("{column} = ${param_idx}"));
            param_idx += 1;
        }
        if filter.open.is_some() {
            conditions.push(format!("open = ${param_idx}"));
            param_idx += 1;
        }
        if filter.created_on.is_some() {
            conditions.push(format!("created_on = ${param_idx}"));
            param_idx += 1;
        }
        if filter.updated_on.is_some() {
            conditions.push(format!("updated_on = ${param_idx}"));
        }

        tracing::debug!(
            project,
            conditions = conditions.len(),
            extra = filter.extra.len(),
            "Listing issues",
        );

        let query = format!(
            "SELECT {COLUMNS} FROM issues WHERE {} ORDER BY seq",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, IssueRow>(&query).bind(project);
        for (_, value) in &texts {
            q = q.bind(*value);
        }
        if let Some(open) = filter.open {
            q = q.bind(open);
        }
        if let Some(ts) = filter.created_on {
            q = q.bind(ts);
        }
        if let Some(ts) = filter.updated_on {
            q = q.bind(ts);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(CoreError::storage)?;

        Ok(rows
            .into_iter()
            .map(Issue::from)
            .filter(|issue| filter.matches_extra(issue))
            .collect())
    }

    async fn find_one(&self, project: &str, id: &str) -> Result<Option<Issue>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM issues WHERE project = $1 AND id = $2");
        let row = sqlx::query_as::<_, IssueRow>(&query)
            .bind(project)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(CoreError::storage)?;
        Ok(row.map(Issue::from))
    }

    /// Only the supplied columns are written, plus `updated_on`.
    async fn update_one(
        &self,
        project: &str,
        id: &str,
        patch: &IssuePatch,
    ) -> Result<bool, CoreError> {
        let c = &patch.changes;
        let texts: Vec<(&'static str, &str)> = [
            ("issue_title", &c.issue_title),
            ("issue_text", &c.issue_text),
            ("created_by", &c.created_by),
            ("assigned_to", &c.assigned_to),
            ("status_text", &c.status_text),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect();

        let mut assignments: Vec<String> = vec!["updated_on = $3".to_string()];
        let mut param_idx: usize = 4;
        for (column, _) in &texts {
            assignments.push(format!("{column} = ${param_idx}"));
            param_idx += 1;
        }
        if c.open.is_some() {
            assignments.push(format!("open = ${param_idx}"));
        }

        let query = format!(
            "UPDATE issues SET {} WHERE project = $1 AND id = $2",
            assignments.join(", ")
        );

        let mut q = sqlx::query(&query)
            .bind(project)
            .bind(id)
            .bind(patch.updated_on);
        for (_, value) in &texts {
            q = q.bind(*value);
        }
        if let Some(open) = c.open {
            q = q.bind(open);
        }

        let result = q.execute(&self.pool).await.map_err(CoreError::storage)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_one(&self, project: &str, id: &str) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM issues WHERE project = $1 AND id = $2")
            .bind(project)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(CoreError::storage)?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(CoreError::storage)
    }
}
