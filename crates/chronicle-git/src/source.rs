//! History source abstraction consumed by the changelog engine

use chrono::NaiveDate;
use tracing::instrument;

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use chronicle_core::error::GitError;

/// Supplies release tags and raw commit lines to the changelog engine
pub trait LogSource {
    /// Release tags, newest first
    fn tags(&self) -> Result<Vec<TagInfo>>;

    /// Raw `hash|author|date|subject|body` lines for commits reachable from
    /// `to` but not from `from`, in history order (newest first)
    fn commit_lines(&self, from: Option<&str>, to: &str) -> Result<Vec<String>>;

    /// Calendar date the tag was created
    fn tag_date(&self, tag: &str) -> Result<NaiveDate>;
}

impl LogSource for GitRepo {
    fn tags(&self) -> Result<Vec<TagInfo>> {
        self.version_tags()
    }

    #[instrument(skip(self))]
    fn commit_lines(&self, from: Option<&str>, to: &str) -> Result<Vec<String>> {
        if to == "HEAD" && !self.has_commits() {
            return Ok(Vec::new());
        }
        let commits = self.commits_between(from, to)?;
        Ok(commits.iter().map(|c| c.to_log_line()).collect())
    }

    fn tag_date(&self, tag: &str) -> Result<NaiveDate> {
        self.require_tag(tag)?
            .date()
            .ok_or_else(|| GitError::TagNotFound(tag.to_string()))
    }
}
