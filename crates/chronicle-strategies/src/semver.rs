//! SemVer version strategy

use chronicle_core::error::{Result, VersionError};
use tracing::debug;

use crate::traits::VersionStrategy;
use crate::types::{BumpType, VersionComponents};

/// Semantic Versioning strategy
///
/// Follows the SemVer 2.0.0 specification: https://semver.org/
#[derive(Debug, Clone, Default)]
pub struct SemVerStrategy;

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self
    }
}

impl VersionStrategy for SemVerStrategy {
    fn parse(&self, version: &str) -> Result<VersionComponents> {
        // Strip leading 'v' if present
        let trimmed = version.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let v = semver::Version::parse(trimmed)
            .map_err(|e| VersionError::InvalidVersion(version.to_string(), e.to_string()))?;

        Ok(v.into())
    }

    fn format(&self, components: &VersionComponents) -> String {
        components.to_version_string()
    }

    fn bump(&self, current: &VersionComponents, bump_type: BumpType) -> Result<VersionComponents> {
        let overflow = |component: &str| {
            VersionError::InvalidVersion(
                current.to_string(),
                format!("{} version cannot be incremented", component),
            )
        };

        let mut result = VersionComponents::new(current.major, current.minor, current.patch);
        match bump_type {
            BumpType::Major => {
                result.major = current.major.checked_add(1).ok_or_else(|| overflow("major"))?;
                result.minor = 0;
                result.patch = 0;
            }
            BumpType::Minor => {
                result.minor = current.minor.checked_add(1).ok_or_else(|| overflow("minor"))?;
                result.patch = 0;
            }
            BumpType::Patch => {
                result.patch = current.patch.checked_add(1).ok_or_else(|| overflow("patch"))?;
            }
        }

        debug!(from = %current, to = %result, bump = %bump_type, "bumped version");
        Ok(result)
    }
}
