//! Chronicle Git - Commit history source for changelog generation
//!
//! This crate reads commit history and tags from a git repository and
//! exposes them through the [`LogSource`] trait in the pipe-delimited line
//! format the changelog engine consumes.

mod commits;
mod repository;
mod source;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use source::LogSource;
pub use types::{CommitInfo, TagInfo};
