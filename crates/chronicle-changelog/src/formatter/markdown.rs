//! Markdown changelog formatter

use chronicle_core::config::ChangelogConfig;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::markup::{format_bullet, format_category_header, format_version_header, PREAMBLE};
use crate::types::{Changelog, ChangelogVersion};

/// Markdown changelog formatter following Keep a Changelog
pub struct MarkdownFormatter {
    /// Replaces the default preamble
    pub header: Option<String>,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self { header: None }
    }

    /// Create a formatter from changelog settings
    pub fn from_config(config: &ChangelogConfig) -> Self {
        Self {
            header: config.header.clone(),
        }
    }

    fn preamble(&self) -> &str {
        self.header.as_deref().unwrap_or(PREAMBLE)
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, changelog), fields(version_count = changelog.versions.len()))]
    fn format(&self, changelog: &Changelog) -> String {
        let mut output = String::new();

        let preamble = self.preamble().trim_end();
        if !preamble.is_empty() {
            output.push_str(preamble);
            output.push('\n');
        }

        for version in &changelog.versions {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&self.format_version(version));
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn format_version(&self, version: &ChangelogVersion) -> String {
        let mut output = format_version_header(version);
        output.push('\n');

        for category in version.categories() {
            output.push('\n');
            output.push_str(&format_category_header(category));
            output.push_str("\n\n");

            for entry in version.entries_in(category) {
                output.push_str(&format_bullet(entry));
                output.push('\n');
            }
        }

        output
    }
}
