//! Keep a Changelog markup: line rendering and line classification

use std::borrow::Cow;
use std::sync::LazyLock;

use chronicle_core::ChangeCategory;
use regex::Regex;

use crate::types::{ChangelogEntry, ChangelogVersion};

/// Document preamble written before the first version
pub const PREAMBLE: &str = "# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/),
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).
";

const BREAKING_MARKER: &str = "**BREAKING:**";
const BREAKING_MARKER_BARE: &str = "**BREAKING**";

static VERSION_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s+\[(?P<label>[^\]]+)\](?:\((?P<link>[^)]*)\))?(?:\s+-\s+(?P<date>.+?))?\s*$")
        .expect("Invalid regex")
});

static CATEGORY_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+(?P<name>\w+)").expect("Invalid regex"));

static SCOPE_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*(?P<scope>[^*]+?):\*\*(?:\s+|$)").expect("Invalid regex")
});

/// Trailing `(refs)`, possibly preceded by backslashes that escape it
static REFS_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s+)(?P<escape>\\*)\((?P<refs>[^()]+)\)$").expect("Invalid regex")
});

static HASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{7,40}$").expect("Invalid regex"));

/// `## [label](link) - date`
pub fn format_version_header(version: &ChangelogVersion) -> String {
    let mut header = format!("## [{}]", version.version);
    if let Some(url) = &version.compare_url {
        header.push_str(&format!("({})", url));
    }
    if !version.date.is_empty() {
        header.push_str(&format!(" - {}", version.date));
    }
    header
}

/// `### Category`
pub fn format_category_header(category: ChangeCategory) -> String {
    format!("### {}", category)
}

/// One bullet line, without the trailing newline.
///
/// When the entry has no references, a trailing parenthetical in the
/// description that would read back as references gets one extra leading
/// backslash, which [`parse_bullet`] removes again.
pub fn format_bullet(entry: &ChangelogEntry) -> String {
    let mut line = String::from("- ");

    if entry.breaking {
        line.push_str(BREAKING_MARKER);
        line.push(' ');
    } else if let Some(scope) = &entry.scope {
        line.push_str(&format!("**{}:** ", scope));
    }

    let mut refs = Vec::new();
    if let Some(issue) = &entry.issue {
        refs.push(format!("#{}", issue));
    }
    if let Some(pr) = &entry.pr {
        refs.push(format!("!{}", pr));
    }
    if let Some(hash) = &entry.commit_hash {
        refs.push(hash.clone());
    }
    if let Some(author) = &entry.author {
        refs.push(format!("@{}", author));
    }

    if refs.is_empty() {
        line.push_str(&escape_trailing_references(&entry.description));
    } else {
        line.push_str(&entry.description);
        if !entry.description.is_empty() {
            line.push(' ');
        }
        line.push_str(&format!("({})", refs.join(", ")));
    }

    line.truncate(line.trim_end().len());
    line
}

fn escape_trailing_references(description: &str) -> Cow<'_, str> {
    let Some(caps) = REFS_SUFFIX_REGEX.captures(description) else {
        return Cow::Borrowed(description);
    };
    if parse_references(&caps["refs"]).is_none() {
        return Cow::Borrowed(description);
    }

    let at = caps.name("escape").map_or(description.len(), |m| m.start());
    let mut escaped = String::with_capacity(description.len() + 1);
    escaped.push_str(&description[..at]);
    escaped.push('\\');
    escaped.push_str(&description[at..]);
    Cow::Owned(escaped)
}

/// Kind of a single markup line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `## [label]` with optional link and date
    VersionHeader {
        label: &'a str,
        link: Option<&'a str>,
        date: Option<&'a str>,
    },
    /// `### Name`; `None` when the name is not a known category
    CategoryHeader(Option<ChangeCategory>),
    /// `- text`, carrying the text after the marker
    Bullet(&'a str),
    /// Anything else
    Other,
}

impl<'a> Line<'a> {
    /// Classify one line of markup
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim_end();

        if let Some(caps) = VERSION_HEADER_REGEX.captures(line) {
            let label = caps.name("label").map(|m| m.as_str().trim()).unwrap_or("");
            return Line::VersionHeader {
                label,
                link: caps.name("link").map(|m| m.as_str()).filter(|l| !l.is_empty()),
                date: caps.name("date").map(|m| m.as_str()),
            };
        }

        if let Some(caps) = CATEGORY_HEADER_REGEX.captures(line) {
            return Line::CategoryHeader(caps["name"].parse().ok());
        }

        if line == "-" {
            return Line::Bullet("");
        }
        match line.strip_prefix("- ") {
            Some(text) => Line::Bullet(text),
            None => Line::Other,
        }
    }
}

/// Reference fields found in a trailing parenthetical
#[derive(Debug, Default, PartialEq, Eq)]
struct References {
    issue: Option<String>,
    pr: Option<String>,
    commit_hash: Option<String>,
    author: Option<String>,
}

/// Read a comma-separated reference list; `None` when any token is not a reference
fn parse_references(list: &str) -> Option<References> {
    let mut refs = References::default();

    for token in list.split(',').map(str::trim) {
        if let Some(number) = token.strip_prefix('#').filter(|n| is_number(n)) {
            refs.issue.get_or_insert_with(|| number.to_string());
        } else if let Some(number) = token.strip_prefix('!').filter(|n| is_number(n)) {
            refs.pr.get_or_insert_with(|| number.to_string());
        } else if let Some(handle) = token.strip_prefix('@').filter(|h| !h.is_empty()) {
            refs.author.get_or_insert_with(|| handle.to_string());
        } else if HASH_REGEX.is_match(token) {
            refs.commit_hash.get_or_insert_with(|| token.to_string());
        } else {
            return None;
        }
    }

    Some(refs)
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `marker` followed by whitespace or the end of the text
fn strip_marker<'t>(text: &'t str, marker: &str) -> Option<&'t str> {
    let rest = text.strip_prefix(marker)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then(|| rest.trim_start())
}

/// Turn the text of a bullet back into an entry of the given category
pub fn parse_bullet(text: &str, category: ChangeCategory) -> ChangelogEntry {
    let mut rest = text.trim();
    let mut breaking = false;
    let mut scope = None;

    if let Some(stripped) = strip_marker(rest, BREAKING_MARKER)
        .or_else(|| strip_marker(rest, BREAKING_MARKER_BARE))
    {
        breaking = true;
        rest = stripped;
    } else if let Some(caps) = SCOPE_PREFIX_REGEX.captures(rest) {
        scope = Some(caps["scope"].to_string());
        rest = &rest[caps.get(0).map_or(0, |m| m.end())..];
    }

    let mut refs = References::default();
    let mut description = Cow::Borrowed(rest);
    if let Some(caps) = REFS_SUFFIX_REGEX.captures(rest) {
        if let Some(found) = parse_references(&caps["refs"]) {
            match caps.name("escape").filter(|m| !m.is_empty()) {
                Some(escape) => {
                    let at = escape.start();
                    description = Cow::Owned(format!("{}{}", &rest[..at], &rest[at + 1..]));
                }
                None => {
                    refs = found;
                    let end = caps.get(0).map_or(rest.len(), |m| m.start());
                    description = Cow::Borrowed(&rest[..end]);
                }
            }
        }
    }

    let mut entry = ChangelogEntry::new(category, description).with_breaking(breaking);
    entry.scope = scope;
    entry.issue = refs.issue;
    entry.pr = refs.pr;
    entry.commit_hash = refs.commit_hash;
    entry.author = refs.author;
    entry
}
