//! Issue tracker domain logic.
//!
//! Validation and defaulting of new issues, filter construction, partial
//! updates and outcome classification. Persistence is reached only through
//! the [`store::IssueStore`] trait so any backend can be plugged in.

pub mod error;
pub mod filter;
pub mod issue;
pub mod store;
pub mod tracker;
pub mod types;
pub mod update;
