//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_versioning(config)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_versioning(config: &Config) -> Result<()> {
    if config.versioning.strategy != "semver" {
        return Err(ConfigError::InvalidValue {
            field: "versioning.strategy".to_string(),
            message: "only 'semver' is supported".to_string(),
        }
        .into());
    }

    if !config.versioning.tag_format.contains("{version}") {
        return Err(ConfigError::InvalidValue {
            field: "versioning.tag_format".to_string(),
            message: "must contain {version} placeholder".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file".to_string(),
            message: "file cannot be empty".to_string(),
        }
        .into());
    }

    for commit_type in config.changelog.types.keys() {
        if commit_type.is_empty() || !commit_type.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(ConfigError::InvalidValue {
                field: format!("changelog.types.{}", commit_type),
                message: "commit types must be non-empty word characters".to_string(),
            }
            .into());
        }
    }

    if let Some(url) = &config.changelog.repo_url {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "changelog.repo_url".to_string(),
                message: "must be an http(s) URL".to_string(),
            }
            .into());
        }
    }

    Ok(())
}
