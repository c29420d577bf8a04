//! Exit codes for the CLI

use chronicle_core::error::{ChangelogError, ChronicleError, ConfigError, GitError, VersionError};

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Changelog content error
pub const CHANGELOG_ERROR: i32 = 5;

/// Pick the exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ChronicleError>() {
            return match e {
                ChronicleError::Config(_) => CONFIG_ERROR,
                ChronicleError::Git(_) => GIT_ERROR,
                ChronicleError::Version(_) => VERSION_ERROR,
                ChronicleError::Changelog(_) => CHANGELOG_ERROR,
                _ => ERROR,
            };
        }
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if cause.is::<VersionError>() {
            return VERSION_ERROR;
        }
        if cause.is::<ChangelogError>() {
            return CHANGELOG_ERROR;
        }
    }
    ERROR
}
