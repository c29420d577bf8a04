//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::{Changelog, ChangelogVersion};

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render a whole changelog document
    fn format(&self, changelog: &Changelog) -> String;

    /// Render a single version section
    fn format_version(&self, version: &ChangelogVersion) -> String;
}
