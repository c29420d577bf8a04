//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::types::ChangeCategory;

/// Main configuration for Chronicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name
    pub name: Option<String>,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Version strategy (only semver is supported)
    pub strategy: String,

    /// Tag format (e.g., "v{version}")
    pub tag_format: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            strategy: "semver".to_string(),
            tag_format: "v{version}".to_string(),
        }
    }
}

impl VersioningConfig {
    /// Build the tag name for a version
    pub fn tag_for(&self, version: &str) -> String {
        self.tag_format.replace("{version}", version)
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Replacement for the standard document preamble
    pub header: Option<String>,

    /// Commit type to category overrides, applied on top of the built-in table
    pub types: BTreeMap<String, ChangeCategory>,

    /// Commit types never written to the changelog
    pub exclude_types: Vec<String>,

    /// Whether to include merge commits
    pub include_merges: bool,

    /// Whether to include short commit hashes in entries
    pub include_hashes: bool,

    /// Whether to include author handles in entries
    pub include_authors: bool,

    /// Repository URL used to build compare links
    pub repo_url: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            header: None,
            types: BTreeMap::new(),
            exclude_types: Vec::new(),
            include_merges: true,
            include_hashes: false,
            include_authors: false,
            repo_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.versioning.strategy, "semver");
        assert_eq!(config.changelog.file, PathBuf::from("CHANGELOG.md"));
        assert!(config.changelog.types.is_empty());
        assert!(!config.changelog.include_hashes);
    }

    #[test]
    fn test_tag_for() {
        let versioning = VersioningConfig::default();
        assert_eq!(versioning.tag_for("1.2.3"), "v1.2.3");
    }

    #[test]
    fn test_type_overrides_deserialize() {
        let yaml = "changelog:\n  types:\n    perf: Fixed\n    sec: Security\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.changelog.types.get("perf"),
            Some(&ChangeCategory::Fixed)
        );
        assert_eq!(
            config.changelog.types.get("sec"),
            Some(&ChangeCategory::Security)
        );
    }
}
