use chrono::SubsecRound;

/// Issue identifiers are opaque strings assigned at creation.
pub type IssueId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh issue identifier (time-ordered UUIDv7, simple form).
pub fn new_issue_id() -> IssueId {
    uuid::Uuid::now_v7().simple().to_string()
}

/// Current time truncated to microseconds, the precision every store keeps.
pub fn now() -> Timestamp {
    chrono::Utc::now().trunc_subsecs(6)
}
