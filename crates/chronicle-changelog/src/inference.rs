//! Next version inference from commit records

use chronicle_core::error::Result;
use chronicle_strategies::{BumpType, SemVerStrategy, VersionStrategy};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::types::CommitRecord;

/// Outcome of a version inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInference {
    /// Version the inference started from
    pub current: String,
    /// Inferred next version
    pub next: String,
    /// Component that was incremented
    pub bump: BumpType,
    /// Number of commits considered
    pub commits: usize,
}

/// Pick the bump a set of commits calls for.
///
/// A breaking record always means `major`; otherwise a feature means `minor`;
/// everything else, including no records at all, is a `patch`.
pub fn determine_bump(records: &[CommitRecord]) -> BumpType {
    let mut bump = BumpType::Patch;
    for record in records {
        if record.breaking {
            return BumpType::Major;
        }
        if record.is_feature() {
            bump = bump.max(BumpType::Minor);
        }
    }
    bump
}

/// Infer the version following `current` for the given commits
#[instrument(skip(records), fields(commit_count = records.len()))]
pub fn infer_next_version(current: &str, records: &[CommitRecord]) -> Result<VersionInference> {
    let bump = determine_bump(records);
    let next = SemVerStrategy::new().next_version(current, bump)?;
    debug!(current, next = %next, bump = %bump, "inferred next version");

    Ok(VersionInference {
        current: current.to_string(),
        next,
        bump,
        commits: records.len(),
    })
}
