//! Commit log normalization

mod conventional;
mod types;

pub use conventional::ConventionalParser;
pub use types::*;

use crate::types::CommitRecord;

/// Trait for turning raw log lines into commit records
pub trait CommitParser: Send + Sync {
    /// Parse one `hash|author|date|subject|body` line.
    ///
    /// Returns `None` for lines that cannot be split into the five fields.
    fn parse(&self, line: &str) -> Option<CommitRecord>;

    /// Check if a record should be included in the changelog
    fn should_include(&self, record: &CommitRecord) -> bool;
}
