//! Listing filters.
//!
//! A filter is a set of exact-match constraints combined with logical AND.
//! Known issue fields are parsed into typed slots; anything else lands in
//! [`IssueFilter::extra`] and is compared against the serialized shape of
//! an issue, so a key no issue carries simply matches nothing.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::issue::{
    parse_bool, Issue, FIELD_ASSIGNED_TO, FIELD_CREATED_BY, FIELD_CREATED_ON, FIELD_ID,
    FIELD_ISSUE_TEXT, FIELD_ISSUE_TITLE, FIELD_OPEN, FIELD_STATUS_TEXT, FIELD_UPDATED_ON,
};
use crate::types::{IssueId, Timestamp};

/// Exact-match constraints for listing issues within a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub id: Option<IssueId>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
    pub created_on: Option<Timestamp>,
    pub updated_on: Option<Timestamp>,
    /// Unrecognised keys, or known keys whose value does not coerce to the
    /// field's type. Matched against the issue's serialized document.
    pub extra: BTreeMap<String, String>,
}

impl IssueFilter {
    /// Build a filter from raw key/value pairs (e.g. a query string).
    ///
    /// A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut filter = IssueFilter::default();
        for (key, value) in pairs {
            filter.push(key.into(), value.into());
        }
        filter
    }

    fn push(&mut self, key: String, value: String) {
        match key.as_str() {
            FIELD_ID => self.id = Some(value),
            FIELD_ISSUE_TITLE => self.issue_title = Some(value),
            FIELD_ISSUE_TEXT => self.issue_text = Some(value),
            FIELD_CREATED_BY => self.created_by = Some(value),
            FIELD_ASSIGNED_TO => self.assigned_to = Some(value),
            FIELD_STATUS_TEXT => self.status_text = Some(value),
            FIELD_OPEN => match parse_bool(&value) {
                Some(flag) => {
                    self.open = Some(flag);
                    self.extra.remove(FIELD_OPEN);
                }
                None => {
                    self.open = None;
                    self.extra.insert(key, value);
                }
            },
            FIELD_CREATED_ON | FIELD_UPDATED_ON => {
                let parsed = parse_timestamp(&value);
                let slot = if key == FIELD_CREATED_ON {
                    &mut self.created_on
                } else {
                    &mut self.updated_on
                };
                *slot = parsed;
                if parsed.is_some() {
                    self.extra.remove(&key);
                } else {
                    self.extra.insert(key, value);
                }
            }
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    /// True when no constraint is set: every issue of the project matches.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.open.is_none()
            && self.created_on.is_none()
            && self.updated_on.is_none()
            && self.text_constraints().next().is_none()
            && self.extra.is_empty()
    }

    /// Typed string-column constraints as `(field, value)` pairs.
    pub fn text_constraints(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (FIELD_ID, &self.id),
            (FIELD_ISSUE_TITLE, &self.issue_title),
            (FIELD_ISSUE_TEXT, &self.issue_text),
            (FIELD_CREATED_BY, &self.created_by),
            (FIELD_ASSIGNED_TO, &self.assigned_to),
            (FIELD_STATUS_TEXT, &self.status_text),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }

    /// Whether `issue` satisfies every constraint.
    pub fn matches(&self, issue: &Issue) -> bool {
        self.matches_typed(issue) && self.matches_extra(issue)
    }

    fn matches_typed(&self, issue: &Issue) -> bool {
        let texts_match = self.text_constraints().all(|(field, expected)| {
            let actual = match field {
                FIELD_ID => issue.id.as_str(),
                FIELD_ISSUE_TITLE => issue.issue_title.as_str(),
                FIELD_ISSUE_TEXT => issue.issue_text.as_str(),
                FIELD_CREATED_BY => issue.created_by.as_str(),
                FIELD_ASSIGNED_TO => issue.assigned_to.as_str(),
                _ => issue.status_text.as_str(),
            };
            actual == expected
        });

        texts_match
            && self.open.map_or(true, |open| issue.open == open)
            && self.created_on.map_or(true, |ts| issue.created_on == ts)
            && self.updated_on.map_or(true, |ts| issue.updated_on == ts)
    }

    /// Evaluate only the pass-through constraints.
    ///
    /// Stores that push typed constraints down to their query language call
    /// this on the rows they get back.
    pub fn matches_extra(&self, issue: &Issue) -> bool {
        if self.extra.is_empty() {
            return true;
        }
        let Ok(Value::Object(doc)) = serde_json::to_value(issue) else {
            return false;
        };
        self.extra
            .iter()
            .all(|(key, expected)| match doc.get(key) {
                Some(Value::String(actual)) => actual == expected,
                Some(Value::Bool(actual)) => parse_bool(expected) == Some(*actual),
                _ => false,
            })
    }
}

fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&chrono::Utc))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
