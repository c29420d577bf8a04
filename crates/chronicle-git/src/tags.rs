//! Tag operations

use chrono::{TimeZone, Utc};
use semver::Version;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use chronicle_core::error::GitError;

impl GitRepo {
    /// Get all tags
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                // Lightweight tag: dated by the commit it points at
                let info = TagInfo::new(&name, commit.id().to_string());
                tags.push(match to_utc(commit.time().seconds()) {
                    Some(ts) => info.with_timestamp(ts),
                    None => info,
                });
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                let mut info = TagInfo::new(&name, tag.target_id().to_string());
                let tagged_at = tag
                    .tagger()
                    .map(|tagger| tagger.when().seconds())
                    .or_else(|| {
                        tag.target()
                            .ok()
                            .and_then(|t| t.peel_to_commit().ok())
                            .map(|c| c.time().seconds())
                    });
                if let Some(ts) = tagged_at.and_then(to_utc) {
                    info = info.with_timestamp(ts);
                }
                tags.push(info);
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Tags carrying a semantic version, newest version first
    #[instrument(skip(self))]
    pub fn version_tags(&self) -> Result<Vec<TagInfo>> {
        let mut versioned: Vec<(TagInfo, Version)> = self
            .tags()?
            .into_iter()
            .filter_map(|t| {
                let version = t.version.as_deref().and_then(|v| Version::parse(v).ok())?;
                Some((t, version))
            })
            .collect();

        versioned.sort_by(|a, b| b.1.cmp(&a.1));
        debug!(count = versioned.len(), "sorted version tags");
        Ok(versioned.into_iter().map(|(t, _)| t).collect())
    }

    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        Ok(self.tags()?.into_iter().find(|t| t.name == name))
    }

    /// Find a tag that must exist
    pub(crate) fn require_tag(&self, name: &str) -> Result<TagInfo> {
        self.find_tag(name)?
            .ok_or_else(|| GitError::TagNotFound(name.to_string()))
    }
}

fn to_utc(seconds: i64) -> Option<chrono::DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}
