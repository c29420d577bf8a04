//! Parser configuration types

use std::collections::HashSet;

use chronicle_core::config::ChangelogConfig;

/// Configuration for the commit parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Commit types to exclude (lower-case)
    pub exclude_types: HashSet<String>,
    /// Whether to include merge commits
    pub include_merges: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            exclude_types: HashSet::new(),
            include_merges: true,
        }
    }
}

impl ParserConfig {
    /// Build the parser configuration from changelog settings
    pub fn from_changelog_config(config: &ChangelogConfig) -> Self {
        config
            .exclude_types
            .iter()
            .fold(Self::default(), |acc, t| acc.exclude_type(t))
            .with_merges(config.include_merges)
    }

    /// Add a type to exclude
    pub fn exclude_type(mut self, type_name: impl Into<String>) -> Self {
        self.exclude_types.insert(type_name.into().to_lowercase());
        self
    }

    /// Set whether to include merge commits
    pub fn with_merges(mut self, include: bool) -> Self {
        self.include_merges = include;
        self
    }
}
