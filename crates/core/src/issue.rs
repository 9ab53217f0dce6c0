//! Issue entity, creation input and the create-time validator.
//!
//! A new issue needs a title, a body text and an author. Everything else is
//! either defaulted (`assigned_to`, `status_text`) or owned by the system
//! (`_id`, `open`, `created_on`, `updated_on`) and never read from input.

use serde::{Deserialize, Serialize};

use crate::types::{IssueId, Timestamp};

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_ID: &str = "_id";
pub const FIELD_PROJECT: &str = "project";
pub const FIELD_ISSUE_TITLE: &str = "issue_title";
pub const FIELD_ISSUE_TEXT: &str = "issue_text";
pub const FIELD_CREATED_BY: &str = "created_by";
pub const FIELD_ASSIGNED_TO: &str = "assigned_to";
pub const FIELD_STATUS_TEXT: &str = "status_text";
pub const FIELD_OPEN: &str = "open";
pub const FIELD_CREATED_ON: &str = "created_on";
pub const FIELD_UPDATED_ON: &str = "updated_on";

/// Fields that must be present and non-blank on create.
pub const REQUIRED_FIELDS: &[&str] = &[FIELD_ISSUE_TITLE, FIELD_ISSUE_TEXT, FIELD_CREATED_BY];

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One tracked item within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    pub id: IssueId,
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

// ---------------------------------------------------------------------------
// Transport helpers
// ---------------------------------------------------------------------------

/// An `open` flag as it arrives on the wire.
///
/// JSON bodies carry a real boolean, form and query encodings carry text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OpenValue {
    Flag(bool),
    Text(String),
}

impl OpenValue {
    /// The boolean this value stands for, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OpenValue::Flag(b) => Some(*b),
            OpenValue::Text(s) => parse_bool(s),
        }
    }
}

/// Parse `true` / `false` text, ignoring case and surrounding whitespace.
pub fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A value is blank when nothing but whitespace is left.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Caller-supplied fields for a new issue.
///
/// System fields sent by the caller are ignored by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateIssue {
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
}

/// At least one of [`REQUIRED_FIELDS`] was absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("required field(s) missing: {}", missing.join(", "))]
pub struct MissingRequiredFields {
    pub missing: Vec<&'static str>,
}

impl CreateIssue {
    /// Names of the required fields that are absent or blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            (FIELD_ISSUE_TITLE, &self.issue_title),
            (FIELD_ISSUE_TEXT, &self.issue_text),
            (FIELD_CREATED_BY, &self.created_by),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, is_blank))
        .map(|(name, _)| name)
        .collect()
    }

    /// Validate the input and build the fully populated issue.
    ///
    /// Nothing is allocated (no id, no timestamp) unless validation passes.
    pub fn into_issue(
        self,
        project: &str,
        id: impl FnOnce() -> IssueId,
        now: Timestamp,
    ) -> Result<Issue, MissingRequiredFields> {
        let missing = self.missing_required();
        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            self.issue_title.filter(|v| !is_blank(v)),
            self.issue_text.filter(|v| !is_blank(v)),
            self.created_by.filter(|v| !is_blank(v)),
        ) else {
            return Err(MissingRequiredFields { missing });
        };

        Ok(Issue {
            id: id(),
            project: project.to_string(),
            issue_title,
            issue_text,
            created_by,
            assigned_to: self.assigned_to.unwrap_or_default(),
            status_text: self.status_text.unwrap_or_default(),
            open: true,
            created_on: now,
            updated_on: now,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::now;

    fn full_input() -> CreateIssue {
        CreateIssue {
            issue_title: Some("Title".into()),
            issue_text: Some("Text".into()),
            created_by: Some("alice".into()),
            assigned_to: Some("bob".into()),
            status_text: Some("triage".into()),
        }
    }

    #[test]
    fn only_required_fields_gets_defaults() {
        let input = CreateIssue {
            issue_title: Some("A".into()),
            issue_text: Some("B".into()),
            created_by: Some("C".into()),
            ..Default::default()
        };
        let ts = now();
        let issue = input.into_issue("apitest", || "abc".into(), ts).unwrap();

        assert_eq!(issue.id, "abc");
        assert_eq!(issue.project, "apitest");
        assert_eq!(issue.assigned_to, "");
        assert_eq!(issue.status_text, "");
        assert!(issue.open);
        assert_eq!(issue.created_on, issue.updated_on);
        assert_eq!(issue.created_on, ts);
    }

    #[test]
    fn optional_fields_are_kept() {
        let issue = full_input().into_issue("p", || "x".into(), now()).unwrap();
        assert_eq!(issue.assigned_to, "bob");
        assert_eq!(issue.status_text, "triage");
    }

    #[test]
    fn each_missing_required_field_is_reported() {
        for field in REQUIRED_FIELDS {
            let mut input = full_input();
            match *field {
                FIELD_ISSUE_TITLE => input.issue_title = None,
                FIELD_ISSUE_TEXT => input.issue_text = None,
                _ => input.created_by = None,
            }
            let err = input.into_issue("p", || "x".into(), now()).unwrap_err();
            assert_eq!(err.missing, vec![*field]);
        }
    }

    #[test]
    fn blank_required_field_counts_as_missing() {
        let input = CreateIssue {
            issue_title: Some("   ".into()),
            issue_text: Some(String::new()),
            created_by: Some("C".into()),
            ..Default::default()
        };
        let err = input.into_issue("p", || "x".into(), now()).unwrap_err();
        assert_eq!(err.missing, vec![FIELD_ISSUE_TITLE, FIELD_ISSUE_TEXT]);
    }

    #[test]
    fn id_is_not_generated_on_failure() {
        let mut called = false;
        let result = CreateIssue::default().into_issue(
            "p",
            || {
                called = true;
                "x".into()
            },
            now(),
        );
        assert!(result.is_err());
        assert!(!called);
    }

    #[test]
    fn parse_bool_accepts_text_forms() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" FALSE "), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn open_value_from_json_and_text() {
        let flag: OpenValue = serde_json::from_str("false").unwrap();
        assert_eq!(flag.as_bool(), Some(false));
        let text: OpenValue = serde_json::from_str("\"True\"").unwrap();
        assert_eq!(text.as_bool(), Some(true));
        let junk: OpenValue = serde_json::from_str("\"later\"").unwrap();
        assert_eq!(junk.as_bool(), None);
    }

    #[test]
    fn issue_serializes_with_underscore_id() {
        let issue = full_input().into_issue("p", || "abc".into(), now()).unwrap();
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["open"], true);
        assert!(json.get("id").is_none());
        assert!(json["created_on"].is_string());
    }
}
