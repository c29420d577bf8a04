//! Conventional Commits normalizer
//!
//! Turns raw `hash|author|date|subject|body` log lines into
//! [`CommitRecord`]s, reading the subject as a conventional commit header:
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use super::{CommitParser, ParserConfig};
use crate::types::CommitRecord;

/// Number of characters kept from the commit hash
const SHORT_HASH_LEN: usize = 7;

/// Regex for the `type(scope)!: subject` header
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?: (?P<subject>.+)$")
        .expect("Invalid regex")
});

/// "breaking change" followed by whitespace, punctuation or the end of text
static BREAKING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)breaking[ -]change(?:[\s[:punct:]]|$)").expect("Invalid regex")
});

/// Issue references such as `#123`
static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("Invalid regex"));

/// Parser for Conventional Commits log lines
pub struct ConventionalParser {
    config: ParserConfig,
}

impl ConventionalParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

struct Header {
    declared_type: Option<String>,
    scope: Option<String>,
    breaking: bool,
    subject: String,
}

fn parse_header(subject: &str) -> Header {
    let subject = subject.trim();
    match HEADER_REGEX.captures(subject) {
        Some(caps) => Header {
            declared_type: caps.name("type").map(|m| m.as_str().to_string()),
            scope: caps
                .name("scope")
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            breaking: caps.name("breaking").is_some(),
            subject: caps
                .name("subject")
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        },
        None => Header {
            declared_type: None,
            scope: None,
            breaking: false,
            subject: subject.to_string(),
        },
    }
}

/// Issue numbers in order of first occurrence, without duplicates
fn extract_issue_refs(text: &str) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for caps in ISSUE_REGEX.captures_iter(text) {
        let number = &caps[1];
        if !refs.iter().any(|r| r == number) {
            refs.push(number.to_string());
        }
    }
    refs
}

impl CommitParser for ConventionalParser {
    fn parse(&self, line: &str) -> Option<CommitRecord> {
        let mut fields = line.splitn(5, '|');
        let (Some(hash), Some(author), Some(date), Some(subject), Some(body)) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            trace!(line, "skipping malformed log line");
            return None;
        };

        let header = parse_header(subject);
        let body = body.replace("\\n", "\n");
        let body = body.trim();

        let breaking = header.breaking || BREAKING_REGEX.is_match(body);
        let issue_refs = extract_issue_refs(&format!("{}\n{}", header.subject, body));

        Some(CommitRecord {
            hash: hash.trim().chars().take(SHORT_HASH_LEN).collect(),
            author: author.trim().to_string(),
            date: date.trim().to_string(),
            declared_type: header.declared_type,
            scope: header.scope,
            subject: header.subject,
            body: (!body.is_empty()).then(|| body.to_string()),
            breaking,
            issue_refs,
        })
    }

    fn should_include(&self, record: &CommitRecord) -> bool {
        if !self.config.include_merges && record.is_merge() {
            return false;
        }

        match &record.declared_type {
            Some(t) => !self.config.exclude_types.contains(&t.to_lowercase()),
            None => true,
        }
    }
}
