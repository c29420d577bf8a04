//! Parsing Keep a Changelog documents back into the model

use chronicle_core::error::Result;
use chronicle_core::ChangeCategory;
use tracing::{debug, instrument, trace};

use crate::markup::{parse_bullet, Line};
use crate::types::{Changelog, ChangelogVersion};

/// Parse changelog text.
///
/// Text before the first version header is treated as preamble. Bullets
/// before any category header belong to `Changed`; an unknown category
/// header keeps the current category. Duplicate labels and an `Unreleased`
/// section below the top are rejected.
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn parse_changelog(text: &str) -> Result<Changelog> {
    let mut changelog = Changelog::new();
    let mut category = ChangeCategory::Changed;

    for (number, raw) in text.lines().enumerate() {
        match Line::classify(raw) {
            Line::VersionHeader { label, link, date } => {
                let mut version = ChangelogVersion::new(label, date.unwrap_or_default());
                version.compare_url = link.map(str::to_string);
                changelog.versions.push(version);
                category = ChangeCategory::Changed;
            }
            Line::CategoryHeader(Some(found)) => category = found,
            Line::CategoryHeader(None) => {
                trace!(line = number + 1, "unknown category header, keeping {}", category);
            }
            Line::Bullet(text) => match changelog.versions.last_mut() {
                Some(version) => version.entries.push(parse_bullet(text, category)),
                None => trace!(line = number + 1, "bullet outside of a version"),
            },
            Line::Other => {}
        }
    }

    changelog.validate()?;

    debug!(versions = changelog.versions.len(), "parsed changelog");
    Ok(changelog)
}
