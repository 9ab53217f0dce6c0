//! Repository layer.
//!
//! Each repository wraps a `PgPool` and implements a storage trait from
//! `tracker_core`.

pub mod issue_repo;

pub use issue_repo::PgIssueStore;
