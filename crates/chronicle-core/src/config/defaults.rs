//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "chronicle.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "chronicle.toml";

/// File names searched in each directory, in order of preference
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    DEFAULT_CONFIG_YAML,
    DEFAULT_CONFIG_TOML,
    ".chronicle.yaml",
    ".chronicle.toml",
];

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Chronicle Configuration

versioning:
  strategy: semver
  tag_format: "v{version}"

changelog:
  file: CHANGELOG.md
  include_hashes: false
  include_authors: false
  include_merges: true
  # Commit types that never reach the changelog
  exclude_types: []
  # Extra or replacement commit type mappings
  # (Added, Changed, Deprecated, Removed, Fixed, Security)
  types: {}
  # repo_url: https://github.com/owner/repo
"#;
