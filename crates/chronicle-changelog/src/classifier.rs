//! Commit type to changelog category mapping

use std::collections::HashMap;

use chronicle_core::config::ChangelogConfig;
use chronicle_core::ChangeCategory;
use tracing::trace;

use crate::types::{ChangelogEntry, CommitRecord};

/// Built-in commit type mappings
const DEFAULT_TYPES: &[(&str, ChangeCategory)] = &[
    ("feat", ChangeCategory::Added),
    ("feature", ChangeCategory::Added),
    ("add", ChangeCategory::Added),
    ("fix", ChangeCategory::Fixed),
    ("bugfix", ChangeCategory::Fixed),
    ("hotfix", ChangeCategory::Fixed),
    ("docs", ChangeCategory::Changed),
    ("style", ChangeCategory::Changed),
    ("refactor", ChangeCategory::Changed),
    ("perf", ChangeCategory::Changed),
    ("test", ChangeCategory::Changed),
    ("build", ChangeCategory::Changed),
    ("ci", ChangeCategory::Changed),
    ("chore", ChangeCategory::Changed),
    ("revert", ChangeCategory::Removed),
    ("deprecate", ChangeCategory::Deprecated),
    ("security", ChangeCategory::Security),
    ("breaking", ChangeCategory::Changed),
];

/// Maps declared commit types onto changelog categories
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    table: HashMap<String, ChangeCategory>,
    include_hashes: bool,
    include_authors: bool,
}

impl CategoryClassifier {
    /// Create a classifier with the built-in table
    pub fn new() -> Self {
        Self {
            table: DEFAULT_TYPES
                .iter()
                .map(|(name, category)| (name.to_string(), *category))
                .collect(),
            include_hashes: false,
            include_authors: false,
        }
    }

    /// Create a classifier from changelog settings, applying type overrides
    pub fn from_config(config: &ChangelogConfig) -> Self {
        let mut classifier = Self::new();
        for (type_name, category) in &config.types {
            classifier.table.insert(type_name.to_lowercase(), *category);
        }
        classifier.include_hashes = config.include_hashes;
        classifier.include_authors = config.include_authors;
        classifier
    }

    /// Category for a declared type; unknown and missing types are `Changed`
    pub fn category_for(&self, declared_type: Option<&str>) -> ChangeCategory {
        declared_type
            .and_then(|t| self.table.get(&t.to_lowercase()))
            .copied()
            .unwrap_or(ChangeCategory::Changed)
    }

    /// Build the changelog entry for a commit record
    pub fn classify(&self, record: &CommitRecord) -> ChangelogEntry {
        let category = self.category_for(record.declared_type.as_deref());
        trace!(
            hash = %record.hash,
            declared_type = ?record.declared_type,
            %category,
            "classified commit"
        );

        let issue = record.issue_refs.first();
        let description = match issue {
            Some(issue) => strip_issue_suffix(&record.subject, issue),
            None => record.subject.as_str(),
        };
        let mut entry = ChangelogEntry::new(category, description).with_breaking(record.breaking);

        if let Some(scope) = &record.scope {
            entry = entry.with_scope(scope.as_str());
        }
        if let Some(issue) = issue {
            entry = entry.with_issue(issue.as_str());
        }
        if self.include_hashes && !record.hash.is_empty() {
            entry = entry.with_commit_hash(record.hash.as_str());
        }
        if self.include_authors && !record.author.is_empty() {
            entry = entry.with_author(record.author.as_str());
        }

        entry
    }
}

/// Drop a trailing `(#issue)` that the entry already carries as its reference
fn strip_issue_suffix<'s>(subject: &'s str, issue: &str) -> &'s str {
    subject
        .strip_suffix(')')
        .and_then(|s| s.strip_suffix(issue))
        .and_then(|s| s.strip_suffix("(#"))
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
        .unwrap_or(subject)
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
