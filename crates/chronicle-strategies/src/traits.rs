//! Version strategy traits

use chronicle_core::error::Result;

use crate::types::{BumpType, VersionComponents};

/// Trait for version strategies
pub trait VersionStrategy: Send + Sync {
    /// Parse a version string into components
    fn parse(&self, version: &str) -> Result<VersionComponents>;

    /// Format version components into a string
    fn format(&self, components: &VersionComponents) -> String;

    /// Bump the version according to the bump type.
    ///
    /// Fails when the incremented component does not fit.
    fn bump(&self, current: &VersionComponents, bump_type: BumpType) -> Result<VersionComponents>;

    /// Parse, bump and format in one step
    fn next_version(&self, current: &str, bump_type: BumpType) -> Result<String> {
        let parsed = self.parse(current)?;
        Ok(self.format(&self.bump(&parsed, bump_type)?))
    }
}
