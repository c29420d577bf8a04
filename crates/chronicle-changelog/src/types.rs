//! Changelog types

use serde::{Deserialize, Serialize};

use chronicle_core::error::{ChangelogError, Result};
use chronicle_core::ChangeCategory;

/// Label of the pending, not yet released version
pub const UNRELEASED: &str = "Unreleased";

/// A normalized commit taken from one raw log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Short commit hash
    pub hash: String,
    /// Author name
    pub author: String,
    /// Commit date as supplied by the log source
    pub date: String,
    /// Conventional commit type (feat, fix, etc.), if the subject had one
    pub declared_type: Option<String>,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Commit description
    pub subject: String,
    /// Commit body with newlines restored
    pub body: Option<String>,
    /// Whether this is a breaking change
    pub breaking: bool,
    /// Issue numbers referenced in subject and body, first-seen order
    pub issue_refs: Vec<String>,
}

impl CommitRecord {
    /// Whether the declared type announces a new feature
    pub fn is_feature(&self) -> bool {
        self.declared_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("feat") || t.eq_ignore_ascii_case("feature"))
    }

    /// Whether this is a merge commit
    pub fn is_merge(&self) -> bool {
        self.declared_type.is_none() && self.subject.starts_with("Merge ")
    }
}

/// One bullet line of a changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Category section the entry belongs to
    pub category: ChangeCategory,
    /// Display text without scope, breaking marker or references
    pub description: String,
    /// Scope shown as a bold prefix
    pub scope: Option<String>,
    /// Whether the entry is a breaking change
    pub breaking: bool,
    /// Issue number (digits only)
    pub issue: Option<String>,
    /// Pull request number (digits only)
    pub pr: Option<String>,
    /// Author handle, without the leading `@`
    pub author: Option<String>,
    /// Short commit hash
    pub commit_hash: Option<String>,
}

impl ChangelogEntry {
    /// Create a new entry
    pub fn new(category: ChangeCategory, description: impl Into<String>) -> Self {
        Self {
            category,
            description: description.into().trim().to_string(),
            scope: None,
            breaking: false,
            issue: None,
            pr: None,
            author: None,
            commit_hash: None,
        }
    }

    /// Set the scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = (!scope.trim().is_empty()).then(|| scope.trim().to_string());
        self
    }

    /// Mark as breaking
    pub fn with_breaking(mut self, breaking: bool) -> Self {
        self.breaking = breaking;
        self
    }

    /// Set the issue reference, with or without the leading `#`
    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into().trim().trim_start_matches('#').to_string());
        self
    }

    /// Set the pull request reference, with or without the leading `!`
    pub fn with_pr(mut self, pr: impl Into<String>) -> Self {
        self.pr = Some(pr.into().trim().trim_start_matches('!').to_string());
        self
    }

    /// Set the author handle, with or without the leading `@`
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into().trim().trim_start_matches('@').to_string());
        self
    }

    /// Set the commit hash
    pub fn with_commit_hash(mut self, hash: impl Into<String>) -> Self {
        self.commit_hash = Some(hash.into());
        self
    }
}

/// A release section of the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogVersion {
    /// Semantic version or [`UNRELEASED`]
    pub version: String,
    /// Release date (`YYYY-MM-DD`), empty when unreleased
    pub date: String,
    /// Entries grouped by category, insertion order within a category
    pub entries: Vec<ChangelogEntry>,
    /// Link target of the version header
    pub compare_url: Option<String>,
}

impl ChangelogVersion {
    /// Create a released version
    pub fn new(version: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: date.into(),
            entries: Vec::new(),
            compare_url: None,
        }
    }

    /// Create an empty unreleased version
    pub fn unreleased() -> Self {
        Self::new(UNRELEASED, "")
    }

    /// Whether this is the unreleased section
    pub fn is_unreleased(&self) -> bool {
        self.version == UNRELEASED
    }

    /// Add an entry after the existing entries of its category
    pub fn add_entry(&mut self, entry: ChangelogEntry) {
        let rank = entry.category.position();
        let index = self
            .entries
            .iter()
            .position(|e| e.category.position() > rank)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// Entries of one category, in order
    pub fn entries_in(&self, category: ChangeCategory) -> impl Iterator<Item = &ChangelogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Categories that have at least one entry, in canonical order
    pub fn categories(&self) -> Vec<ChangeCategory> {
        ChangeCategory::ALL
            .into_iter()
            .filter(|c| self.entries.iter().any(|e| e.category == *c))
            .collect()
    }

    /// Check if the version has any entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A whole changelog document, newest version first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// Versions, newest first
    pub versions: Vec<ChangelogVersion>,
}

impl Changelog {
    /// Create an empty changelog
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a version by exact label
    pub fn find(&self, version: &str) -> Option<&ChangelogVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    /// The unreleased section, if it is present
    pub fn unreleased(&self) -> Option<&ChangelogVersion> {
        self.find(UNRELEASED)
    }

    /// Latest released version
    pub fn latest_release(&self) -> Option<&ChangelogVersion> {
        self.versions.iter().find(|v| !v.is_unreleased())
    }

    /// Check if the changelog has no versions
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Check labels are unique and that `Unreleased` only appears first
    pub fn validate(&self) -> Result<()> {
        for (index, version) in self.versions.iter().enumerate() {
            if self.versions[..index]
                .iter()
                .any(|v| v.version == version.version)
            {
                return Err(ChangelogError::DuplicateVersion(version.version.clone()).into());
            }
            if version.is_unreleased() && index != 0 {
                return Err(ChangelogError::MisplacedUnreleased(index).into());
            }
        }
        Ok(())
    }

    /// The unreleased section, created at the top when missing.
    ///
    /// Fails when an unreleased section exists below the top: it is not a
    /// valid insertion point and a second one cannot be created.
    pub fn unreleased_mut(&mut self) -> Result<&mut ChangelogVersion> {
        match self.versions.iter().position(|v| v.is_unreleased()) {
            Some(0) => {}
            Some(_) => return Err(ChangelogError::NoUnreleasedSection.into()),
            None => self.versions.insert(0, ChangelogVersion::unreleased()),
        }
        Ok(&mut self.versions[0])
    }
}
