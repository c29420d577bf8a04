//! Chronicle Strategies - Version bumping for release management
//!
//! This crate provides the semantic-versioning strategy used to turn a
//! release type into the next version number.

mod semver;
mod traits;
pub mod types;

pub use semver::SemVerStrategy;
pub use traits::VersionStrategy;
pub use types::{BumpType, VersionComponents};
