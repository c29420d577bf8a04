//! Chronicle Changelog - Keep a Changelog generation and parsing
//!
//! Raw commit log lines are normalized into [`CommitRecord`]s, classified
//! into [`ChangelogEntry`]s and rendered as Markdown. Rendered documents can
//! be parsed back into the same model, edited, and rendered again.

pub mod classifier;
pub mod commit;
pub mod document;
pub mod engine;
pub mod formatter;
pub mod inference;
pub mod markup;
pub mod types;

pub use classifier::CategoryClassifier;
pub use commit::{CommitParser, ConventionalParser, ParserConfig};
pub use document::parse_changelog;
pub use engine::ChangelogEngine;
pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use inference::{determine_bump, infer_next_version, VersionInference};
pub use types::{Changelog, ChangelogEntry, ChangelogVersion, CommitRecord, UNRELEASED};
