//! Changelog engine: the entry point tying normalization, classification,
//! inference, rendering and parsing together

use chrono::NaiveDate;
use chronicle_core::config::{Config, VersioningConfig};
use chronicle_core::error::{ChangelogError, Result};
use chronicle_git::LogSource;
use chronicle_strategies::{SemVerStrategy, VersionStrategy};
use tracing::{debug, info, instrument};

use crate::classifier::CategoryClassifier;
use crate::commit::{CommitParser, ConventionalParser, ParserConfig};
use crate::document::parse_changelog;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::inference::{self, VersionInference};
use crate::types::{Changelog, ChangelogEntry, ChangelogVersion, CommitRecord};

/// Version assumed when the history has no release tags
pub const INITIAL_VERSION: &str = "0.0.0";

/// Generates, parses and edits changelog documents
pub struct ChangelogEngine {
    parser: Box<dyn CommitParser>,
    classifier: CategoryClassifier,
    formatter: Box<dyn ChangelogFormatter>,
    versioning: VersioningConfig,
    repo_url: Option<String>,
}

impl ChangelogEngine {
    /// Create an engine from project configuration
    pub fn new(config: &Config) -> Self {
        let changelog = &config.changelog;
        Self {
            parser: Box::new(ConventionalParser::with_config(
                ParserConfig::from_changelog_config(changelog),
            )),
            classifier: CategoryClassifier::from_config(changelog),
            formatter: Box::new(MarkdownFormatter::from_config(changelog)),
            versioning: config.versioning.clone(),
            repo_url: changelog
                .repo_url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    /// Normalize raw log lines, skipping the malformed ones
    pub fn normalize<S: AsRef<str>>(&self, lines: &[S]) -> Vec<CommitRecord> {
        let records: Vec<CommitRecord> = lines
            .iter()
            .filter_map(|line| self.parser.parse(line.as_ref()))
            .collect();
        debug!(
            lines = lines.len(),
            records = records.len(),
            "normalized commit lines"
        );
        records
    }

    /// Filter and classify records into changelog entries
    pub fn entries(&self, records: &[CommitRecord]) -> Vec<ChangelogEntry> {
        records
            .iter()
            .filter(|r| self.parser.should_include(r))
            .map(|r| self.classifier.classify(r))
            .collect()
    }

    /// Build a version section from the commits of one span
    fn version_from_lines(&self, version: ChangelogVersion, lines: &[String]) -> ChangelogVersion {
        let records = self.normalize(lines);
        self.entries(&records)
            .into_iter()
            .fold(version, |mut version, entry| {
                version.add_entry(entry);
                version
            })
    }

    fn compare_url(&self, from_tag: &str, to_tag: &str) -> Option<String> {
        self.repo_url
            .as_ref()
            .map(|url| format!("{}/compare/{}...{}", url, from_tag, to_tag))
    }

    fn release_url(&self, tag: &str) -> Option<String> {
        self.repo_url
            .as_ref()
            .map(|url| format!("{}/releases/tag/{}", url, tag))
    }

    /// Regenerate a whole changelog from commit history.
    ///
    /// Commits after the newest tag form `Unreleased` (omitted when nothing
    /// survives filtering); every tag gets a section dated with its creation
    /// date, holding the commits since the previous tag. Tags listed without
    /// a timestamp are dated through [`LogSource::tag_date`].
    #[instrument(skip(self, source))]
    pub fn generate_from_history(&self, source: &dyn LogSource) -> Result<Changelog> {
        let tags = source.tags()?;
        info!(tag_count = tags.len(), "generating changelog from history");

        let mut changelog = Changelog::new();

        let newest = tags.first().map(|t| t.name.as_str());
        let lines = source.commit_lines(newest, "HEAD")?;
        let mut unreleased = self.version_from_lines(ChangelogVersion::unreleased(), &lines);
        if !unreleased.is_empty() {
            if let Some(url) = newest.and_then(|tag| self.compare_url(tag, "HEAD")) {
                unreleased.compare_url = Some(url);
            }
            changelog.versions.push(unreleased);
        }

        for (index, tag) in tags.iter().enumerate() {
            let label = tag.label();
            if changelog.find(label).is_some() {
                debug!(tag = %tag.name, label, "skipping tag with an already used version");
                continue;
            }

            let previous = tags.get(index + 1).map(|t| t.name.as_str());
            let date = match tag.date() {
                Some(date) => date,
                None => source.tag_date(&tag.name)?,
            };
            let lines = source.commit_lines(previous, &tag.name)?;

            let mut version = self.version_from_lines(
                ChangelogVersion::new(label, date.format("%Y-%m-%d").to_string()),
                &lines,
            );
            version.compare_url = match previous {
                Some(prev) => self.compare_url(prev, &tag.name),
                None => self.release_url(&tag.name),
            };

            debug!(version = label, entries = version.entries.len(), "built version section");
            changelog.versions.push(version);
        }

        Ok(changelog)
    }

    /// Render a document to markup
    pub fn render(&self, changelog: &Changelog) -> String {
        self.formatter.format(changelog)
    }

    /// Render one version section to markup
    pub fn render_version(&self, version: &ChangelogVersion) -> String {
        self.formatter.format_version(version)
    }

    /// Parse markup into a document
    pub fn parse(&self, text: &str) -> Result<Changelog> {
        parse_changelog(text)
    }

    /// Build an entry for a declared commit type
    pub fn entry_for_type(&self, type_name: &str, description: &str) -> ChangelogEntry {
        ChangelogEntry::new(self.classifier.category_for(Some(type_name)), description)
    }

    /// Add an entry to the `Unreleased` section, creating it when missing
    #[instrument(skip(self, changelog, entry), fields(category = %entry.category))]
    pub fn add_entry(&self, changelog: &mut Changelog, entry: ChangelogEntry) -> Result<()> {
        changelog.unreleased_mut()?.add_entry(entry);
        debug!("added entry to unreleased section");
        Ok(())
    }

    /// Turn the pending `Unreleased` changes into a release
    #[instrument(skip(self, changelog))]
    pub fn cut_release(
        &self,
        changelog: &mut Changelog,
        version: &str,
        date: NaiveDate,
    ) -> Result<()> {
        changelog.validate()?;

        let has_pending = changelog
            .versions
            .first()
            .is_some_and(|v| v.is_unreleased() && !v.is_empty());
        if !has_pending {
            return Err(ChangelogError::NoPendingChanges.into());
        }

        let strategy = SemVerStrategy::new();
        let label = strategy.format(&strategy.parse(version)?);
        if changelog.find(&label).is_some() {
            return Err(ChangelogError::DuplicateVersion(label).into());
        }

        let tag = self.versioning.tag_for(&label);
        let release_url = match changelog.latest_release() {
            Some(previous) => {
                self.compare_url(&self.versioning.tag_for(&previous.version), &tag)
            }
            None => self.release_url(&tag),
        };

        let release = &mut changelog.versions[0];
        release.version = label.clone();
        release.date = date.format("%Y-%m-%d").to_string();
        release.compare_url = release_url;

        let mut unreleased = ChangelogVersion::unreleased();
        unreleased.compare_url = self.compare_url(&tag, "HEAD");
        changelog.versions.insert(0, unreleased);

        info!(version = %label, %date, "cut release");
        Ok(())
    }

    /// Infer the next version from the newest tag and the commits after it
    #[instrument(skip(self, source))]
    pub fn infer_next_version(&self, source: &dyn LogSource) -> Result<VersionInference> {
        let tags = source.tags()?;
        let latest = tags.first();

        let current = latest.map(|t| t.label()).unwrap_or(INITIAL_VERSION);
        let lines = source.commit_lines(latest.map(|t| t.name.as_str()), "HEAD")?;

        inference::infer_next_version(current, &self.normalize(&lines))
    }
}

impl Default for ChangelogEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chronicle_core::ChangeCategory;
    use chronicle_core::ChronicleError;
    use chronicle_core::error::VersionError;
    use chronicle_git::TagInfo;
    use chronicle_strategies::BumpType;

    /// In-memory history, oldest commit first
    #[derive(Default)]
    struct FakeHistory {
        commits: Vec<&'static str>,
        tags: Vec<(&'static str, usize, NaiveDate)>,
        timestamped: bool,
        date_lookups: Cell<usize>,
    }

    impl FakeHistory {
        fn commit(mut self, line: &'static str) -> Self {
            self.commits.push(line);
            self
        }

        fn tag(mut self, name: &'static str, date: &str) -> Self {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
            self.tags.push((name, self.commits.len() - 1, date));
            self
        }

        /// List tags with their timestamps, like a git repository does
        fn timestamped(mut self) -> Self {
            self.timestamped = true;
            self
        }

        fn position(&self, rev: &str) -> usize {
            if rev == "HEAD" {
                return self.commits.len();
            }
            self.tags
                .iter()
                .find(|(name, _, _)| *name == rev)
                .map(|(_, index, _)| index + 1)
                .unwrap()
        }
    }

    impl LogSource for FakeHistory {
        fn tags(&self) -> chronicle_git::Result<Vec<TagInfo>> {
            Ok(self
                .tags
                .iter()
                .rev()
                .map(|(name, index, date)| {
                    let info = TagInfo::new(*name, index.to_string());
                    if self.timestamped {
                        info.with_timestamp(date.and_hms_opt(12, 0, 0).unwrap().and_utc())
                    } else {
                        info
                    }
                })
                .collect())
        }

        fn commit_lines(&self, from: Option<&str>, to: &str) -> chronicle_git::Result<Vec<String>> {
            let start = from.map(|f| self.position(f)).unwrap_or(0);
            let end = self.position(to);
            Ok(self.commits[start..end]
                .iter()
                .rev()
                .map(|line| line.to_string())
                .collect())
        }

        fn tag_date(&self, tag: &str) -> chronicle_git::Result<NaiveDate> {
            self.date_lookups.set(self.date_lookups.get() + 1);
            Ok(self
                .tags
                .iter()
                .find(|(name, _, _)| *name == tag)
                .map(|(_, _, date)| *date)
                .unwrap())
        }
    }

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn engine_with_repo_url() -> ChangelogEngine {
        let mut config = Config::default();
        config.changelog.repo_url = Some("https://github.com/acme/widget/".to_string());
        ChangelogEngine::new(&config)
    }

    #[test]
    fn test_feature_commit_infers_minor_and_renders_under_added() {
        let history = FakeHistory::default()
            .commit("0000001|jane|2024-01-01|chore: initial|")
            .tag("v1.2.3", "2024-01-01")
            .commit("abc1234|jane|2024-01-10|feat(auth): add SSO||");
        let engine = ChangelogEngine::default();

        let inference = engine.infer_next_version(&history).unwrap();
        assert_eq!(inference.current, "1.2.3");
        assert_eq!(inference.next, "1.3.0");

        let changelog = engine.generate_from_history(&history).unwrap();
        let unreleased = changelog.unreleased().unwrap();
        assert_eq!(unreleased.entries.len(), 1);
        assert_eq!(unreleased.entries[0].category, ChangeCategory::Added);

        let rendered = engine.render(&changelog);
        assert!(rendered.contains("## [Unreleased]\n\n### Added\n\n- **auth:** add SSO\n"));
    }

    #[test]
    fn test_breaking_fix_forces_major() {
        let history = FakeHistory::default()
            .commit("0000001|jane|2024-01-01|chore: initial|")
            .tag("v1.4.0", "2024-01-01")
            .commit("1111111|jane|2024-01-02|feat: new widget|")
            .commit("2222222|jane|2024-01-03|fix!: correct timezone bug|BREAKING CHANGE: UTC")
            .commit("3333333|jane|2024-01-04|feat: another widget|");
        let engine = ChangelogEngine::default();

        let inference = engine.infer_next_version(&history).unwrap();
        assert_eq!(inference.bump, BumpType::Major);
        assert_eq!(inference.next, "2.0.0");

        let changelog = engine.generate_from_history(&history).unwrap();
        let fixed: Vec<_> = changelog
            .unreleased()
            .unwrap()
            .entries_in(ChangeCategory::Fixed)
            .collect();
        assert_eq!(fixed.len(), 1);
        assert!(fixed[0].breaking);
        assert_eq!(fixed[0].description, "correct timezone bug");
    }

    #[test]
    fn test_infer_without_tags_starts_from_initial_version() {
        let history = FakeHistory::default().commit("abc1234|jane|2024-01-10|feat: first|");
        let inference = ChangelogEngine::default()
            .infer_next_version(&history)
            .unwrap();
        assert_eq!(inference.current, INITIAL_VERSION);
        assert_eq!(inference.next, "0.1.0");
    }

    #[test]
    fn test_generate_versions_from_tags() {
        let history = FakeHistory::default()
            .commit("1111111|jane|2024-01-01|feat: initial release|")
            .tag("v1.0.0", "2024-01-01")
            .commit("2222222|jane|2024-01-20|fix(api): handle null response (#42)|")
            .commit("not a log line")
            .commit("3333333|jane|2024-01-21|security: patch CVE-2024-1|")
            .tag("v1.0.1", "2024-01-22");

        let changelog = ChangelogEngine::default()
            .generate_from_history(&history)
            .unwrap();

        assert!(changelog.unreleased().is_none());
        let labels: Vec<_> = changelog.versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(labels, ["1.0.1", "1.0.0"]);

        let patch = &changelog.versions[0];
        assert_eq!(patch.date, "2024-01-22");
        assert_eq!(
            patch.categories(),
            [ChangeCategory::Fixed, ChangeCategory::Security]
        );
        let fix = patch.entries_in(ChangeCategory::Fixed).next().unwrap();
        assert_eq!(fix.scope.as_deref(), Some("api"));
        assert_eq!(fix.description, "handle null response");
        assert_eq!(fix.issue.as_deref(), Some("42"));

        assert_eq!(changelog.versions[1].entries.len(), 1);
        assert!(patch.compare_url.is_none());
    }

    #[test]
    fn test_generate_with_compare_links() {
        let history = FakeHistory::default()
            .commit("1111111|jane|2024-01-01|feat: initial release|")
            .tag("v1.0.0", "2024-01-01")
            .commit("2222222|jane|2024-01-20|fix: bug|")
            .tag("v1.0.1", "2024-01-22")
            .commit("3333333|jane|2024-01-23|feat: next thing|");

        let changelog = engine_with_repo_url().generate_from_history(&history).unwrap();
        let urls: Vec<_> = changelog
            .versions
            .iter()
            .map(|v| v.compare_url.as_deref().unwrap())
            .collect();
        assert_eq!(
            urls,
            [
                "https://github.com/acme/widget/compare/v1.0.1...HEAD",
                "https://github.com/acme/widget/compare/v1.0.0...v1.0.1",
                "https://github.com/acme/widget/releases/tag/v1.0.0",
            ]
        );
    }

    #[test]
    fn test_excluded_types_are_hidden_but_still_inferred() {
        let mut config = Config::default();
        config.changelog.exclude_types = vec!["chore".to_string()];
        let engine = ChangelogEngine::new(&config);

        let history =
            FakeHistory::default().commit("1111111|jane|2024-01-01|chore!: drop node 16|");

        let changelog = engine.generate_from_history(&history).unwrap();
        assert!(changelog.is_empty());

        let inference = engine.infer_next_version(&history).unwrap();
        assert_eq!(inference.bump, BumpType::Major);
    }

    #[test]
    fn test_parse_through_engine() {
        let text = "## [Unreleased]\n\n### Fixed\n\n- **api:** handle null response (#42)\n";
        let changelog = ChangelogEngine::default().parse(text).unwrap();
        let entry = &changelog.unreleased().unwrap().entries[0];
        assert_eq!(entry.category, ChangeCategory::Fixed);
        assert_eq!(entry.scope.as_deref(), Some("api"));
        assert_eq!(entry.description, "handle null response");
        assert_eq!(entry.issue.as_deref(), Some("42"));
    }

    #[test]
    fn test_add_entry_creates_unreleased_first() {
        let engine = ChangelogEngine::default();
        let mut changelog = Changelog {
            versions: vec![ChangelogVersion::new("1.0.0", "2024-01-01")],
        };

        let entry = engine.entry_for_type("fix", "handle null response");
        engine.add_entry(&mut changelog, entry).unwrap();

        assert_eq!(changelog.versions.len(), 2);
        let unreleased = &changelog.versions[0];
        assert!(unreleased.is_unreleased());
        assert_eq!(unreleased.entries.len(), 1);
        assert_eq!(unreleased.entries[0].category, ChangeCategory::Fixed);

        let rendered = engine.render(&changelog);
        assert!(rendered.contains(
            "## [Unreleased]\n\n### Fixed\n\n- handle null response\n\n## [1.0.0] - 2024-01-01\n"
        ));
    }

    #[test]
    fn test_add_entry_rejects_misplaced_unreleased() {
        let engine = ChangelogEngine::default();
        let mut changelog = Changelog {
            versions: vec![
                ChangelogVersion::new("1.0.0", "2024-01-01"),
                ChangelogVersion::unreleased(),
            ],
        };
        let entry = engine.entry_for_type("feat", "x");
        assert!(matches!(
            engine.add_entry(&mut changelog, entry),
            Err(ChronicleError::Changelog(ChangelogError::NoUnreleasedSection))
        ));
    }

    #[test]
    fn test_cut_release_moves_entries() {
        let engine = ChangelogEngine::default();
        let mut changelog = Changelog::new();
        engine
            .add_entry(&mut changelog, engine.entry_for_type("feat", "new API"))
            .unwrap();
        engine
            .add_entry(&mut changelog, engine.entry_for_type("fix", "crash on start"))
            .unwrap();

        engine
            .cut_release(&mut changelog, "2.0.0", date("2024-03-01"))
            .unwrap();

        assert_eq!(changelog.versions.len(), 2);
        assert!(changelog.versions[0].is_unreleased());
        assert!(changelog.versions[0].is_empty());

        let release = &changelog.versions[1];
        assert_eq!(release.version, "2.0.0");
        assert_eq!(release.date, "2024-03-01");
        assert_eq!(release.entries.len(), 2);

        let rendered = engine.render(&changelog);
        assert!(rendered.contains(
            "## [Unreleased]\n\n## [2.0.0] - 2024-03-01\n\n\
             ### Added\n\n- new API\n\n### Fixed\n\n- crash on start\n"
        ));
    }

    #[test]
    fn test_cut_release_compare_links() {
        let engine = engine_with_repo_url();
        let mut changelog = Changelog {
            versions: vec![ChangelogVersion::new("1.0.0", "2024-01-01")],
        };
        engine
            .add_entry(&mut changelog, engine.entry_for_type("feat", "x"))
            .unwrap();
        engine
            .cut_release(&mut changelog, "v1.1.0", date("2024-02-01"))
            .unwrap();

        assert_eq!(changelog.versions[1].version, "1.1.0");
        assert_eq!(
            changelog.versions[1].compare_url.as_deref(),
            Some("https://github.com/acme/widget/compare/v1.0.0...v1.1.0")
        );
        assert_eq!(
            changelog.versions[0].compare_url.as_deref(),
            Some("https://github.com/acme/widget/compare/v1.1.0...HEAD")
        );
    }

    #[test]
    fn test_cut_release_errors() {
        let engine = ChangelogEngine::default();

        let mut empty = Changelog {
            versions: vec![ChangelogVersion::unreleased()],
        };
        assert!(matches!(
            engine.cut_release(&mut empty, "1.0.0", date("2024-01-01")),
            Err(ChronicleError::Changelog(ChangelogError::NoPendingChanges))
        ));

        let mut missing = Changelog::new();
        assert!(matches!(
            engine.cut_release(&mut missing, "1.0.0", date("2024-01-01")),
            Err(ChronicleError::Changelog(ChangelogError::NoPendingChanges))
        ));

        let mut changelog = Changelog {
            versions: vec![ChangelogVersion::new("1.0.0", "2024-01-01")],
        };
        engine
            .add_entry(&mut changelog, engine.entry_for_type("fix", "x"))
            .unwrap();

        assert!(matches!(
            engine.cut_release(&mut changelog, "one", date("2024-02-01")),
            Err(ChronicleError::Version(VersionError::InvalidVersion(..)))
        ));
        assert!(matches!(
            engine.cut_release(&mut changelog, "1.0.0", date("2024-02-01")),
            Err(ChronicleError::Changelog(ChangelogError::DuplicateVersion(_)))
        ));

        // Failed attempts leave the document untouched
        assert!(changelog.versions[0].is_unreleased());
        assert_eq!(changelog.versions[0].entries.len(), 1);
    }

    fn sample_document(engine: &ChangelogEngine) -> Changelog {
        let mut changelog = Changelog::new();
        let entries = [
            engine.entry_for_type("feat", "add SSO").with_scope("auth"),
            engine
                .entry_for_type("fix", "handle null response")
                .with_scope("api")
                .with_issue("42"),
            engine
                .entry_for_type("refactor", "drop v1 API")
                .with_breaking(true)
                .with_pr("7"),
            engine
                .entry_for_type("security", "patch CVE (upstream)")
                .with_commit_hash("abc1234")
                .with_author("jane"),
        ];
        for entry in entries {
            engine.add_entry(&mut changelog, entry).unwrap();
        }
        engine
            .cut_release(&mut changelog, "1.0.0", date("2024-01-01"))
            .unwrap();
        engine
            .add_entry(&mut changelog, engine.entry_for_type("deprecate", "old flags"))
            .unwrap();
        engine
            .add_entry(&mut changelog, engine.entry_for_type("revert", "experimental cache"))
            .unwrap();
        changelog
    }

    #[test]
    fn test_round_trip() {
        for engine in [ChangelogEngine::default(), engine_with_repo_url()] {
            let changelog = sample_document(&engine);
            let rendered = engine.render(&changelog);
            assert_eq!(engine.parse(&rendered).unwrap(), changelog);
        }
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let engine = ChangelogEngine::default();
        let rendered = engine.render(&sample_document(&engine));
        let reparsed = engine.parse(&rendered).unwrap();
        assert_eq!(engine.render(&reparsed), rendered);
    }

    #[test]
    fn test_category_headers_in_canonical_order() {
        let engine = ChangelogEngine::default();
        let mut changelog = Changelog::new();
        for type_name in ["security", "fix", "revert", "deprecate", "docs", "feat", "fix"] {
            engine
                .add_entry(&mut changelog, engine.entry_for_type(type_name, type_name))
                .unwrap();
        }

        let rendered = engine.render(&changelog);
        let headers: Vec<_> = rendered
            .lines()
            .filter(|line| line.starts_with("### "))
            .collect();
        assert_eq!(
            headers,
            [
                "### Added",
                "### Changed",
                "### Deprecated",
                "### Removed",
                "### Fixed",
                "### Security",
            ]
        );
    }

    #[test]
    fn test_unreleased_stays_unique() {
        let engine = ChangelogEngine::default();
        let mut changelog = Changelog::new();
        for n in 0..3 {
            engine
                .add_entry(&mut changelog, engine.entry_for_type("feat", &format!("f{}", n)))
                .unwrap();
            engine
                .cut_release(&mut changelog, &format!("1.{}.0", n), date("2024-01-01"))
                .unwrap();
        }

        let unreleased: Vec<_> = changelog
            .versions
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_unreleased())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(unreleased, [0]);
        changelog.validate().unwrap();
    }

    #[test]
    fn test_tag_timestamps_are_used_for_dates() {
        let history = FakeHistory::default()
            .commit("1111111|jane|2024-01-01|feat: initial release|")
            .tag("v1.0.0", "2024-01-01")
            .commit("2222222|jane|2024-01-20|fix: bug|")
            .tag("v1.0.1", "2024-01-22")
            .timestamped();

        let changelog = ChangelogEngine::default()
            .generate_from_history(&history)
            .unwrap();
        let dates: Vec<_> = changelog.versions.iter().map(|v| v.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-22", "2024-01-01"]);
        assert_eq!(history.date_lookups.get(), 0);
    }

    #[test]
    fn test_undated_tags_fall_back_to_date_lookup() {
        let history = FakeHistory::default()
            .commit("1111111|jane|2024-01-01|feat: initial release|")
            .tag("v1.0.0", "2024-01-01")
            .commit("2222222|jane|2024-01-20|fix: bug|")
            .tag("v1.0.1", "2024-01-22");

        let changelog = ChangelogEngine::default()
            .generate_from_history(&history)
            .unwrap();
        assert_eq!(changelog.versions[0].date, "2024-01-22");
        assert_eq!(history.date_lookups.get(), 2);
    }

    #[test]
    fn test_tags_sharing_a_version_label_emit_one_section() {
        let history = FakeHistory::default()
            .commit("1111111|jane|2024-01-01|feat: initial release|")
            .tag("v1.0.0", "2024-01-01")
            .commit("2222222|jane|2024-01-02|fix: retag after hotfix|")
            .tag("1.0.0", "2024-01-02");

        let changelog = ChangelogEngine::default()
            .generate_from_history(&history)
            .unwrap();

        let labels: Vec<_> = changelog.versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(labels, ["1.0.0"]);
        let release = &changelog.versions[0];
        assert_eq!(release.date, "2024-01-02");
        assert_eq!(release.entries.len(), 1);
        assert_eq!(release.entries[0].description, "retag after hotfix");
        changelog.validate().unwrap();
    }

    fn edge_case_history() -> FakeHistory {
        FakeHistory::default()
            .commit("1111111|jane|2024-01-01|feat: initial release|")
            .commit("2222222|ann|2024-01-02|docs: explain setup (and teardown)|")
            .tag("v1.0.0", "2024-01-03")
            .commit("3333333|jane|2024-01-10|chore: bump deps (#12)|")
            .commit("4444444|ann|2024-01-11|feat: thanks (@jane)|")
            .commit("5555555|jane|2024-01-12|revert: undo cache (deadbeef)|")
            .commit("6666666|ann|2024-01-13||BREAKING CHANGE: x")
            .commit("7777777|jane|2024-01-14||")
            .commit("8888888|ann|2024-01-15|refactor!: drop v1 API|Closes #7")
            .commit("9999999|jane|2024-01-16|fix(api): handle null response (#42)|")
            .commit("aaaaaaa|ann|2024-01-17|Merge branch 'feature/x'|")
            .tag("v1.1.0", "2024-01-18")
            .commit("bbbbbbb|jane|2024-01-20|feat(ui): dark mode (@design)|")
    }

    fn generated_history_engines() -> Vec<ChangelogEngine> {
        let mut detailed = Config::default();
        detailed.changelog.repo_url = Some("https://github.com/acme/widget".to_string());
        detailed.changelog.include_hashes = true;
        detailed.changelog.include_authors = true;
        vec![ChangelogEngine::default(), ChangelogEngine::new(&detailed)]
    }

    #[test]
    fn test_generated_history_round_trips() {
        let history = edge_case_history();
        for engine in generated_history_engines() {
            let generated = engine.generate_from_history(&history).unwrap();
            assert_eq!(generated.versions.len(), 3);

            let rendered = engine.render(&generated);
            assert_eq!(engine.parse(&rendered).unwrap(), generated);
        }
    }

    #[test]
    fn test_generated_history_rerender_is_idempotent() {
        let history = edge_case_history();
        for engine in generated_history_engines() {
            let rendered = engine.render(&engine.generate_from_history(&history).unwrap());
            let reparsed = engine.parse(&rendered).unwrap();
            assert_eq!(engine.render(&reparsed), rendered);
        }
    }

    #[test]
    fn test_generated_edge_descriptions_render() {
        let engine = ChangelogEngine::default();
        let rendered = engine.render(&engine.generate_from_history(&edge_case_history()).unwrap());

        assert!(rendered.contains("\n- bump deps (#12)\n"));
        assert!(rendered.contains("\n- thanks \\(@jane)\n"));
        assert!(rendered.contains("\n- undo cache \\(deadbeef)\n"));
        assert!(rendered.contains("\n- **BREAKING:**\n"));
        assert!(rendered.contains("\n-\n"));
        assert!(rendered.contains("\n- **BREAKING:** drop v1 API (#7)\n"));
        assert!(rendered.contains("\n- **api:** handle null response (#42)\n"));
        assert!(rendered.contains("\n- explain setup (and teardown)\n"));
        assert!(!rendered.contains("(#42) (#42)"));
    }

    #[test]
    fn test_edge_descriptions_round_trip() {
        let engine = ChangelogEngine::default();
        let mut changelog = Changelog::new();
        let entries = [
            engine.entry_for_type("chore", "bump deps (#12)"),
            engine.entry_for_type("feat", "thanks (@jane)"),
            engine.entry_for_type("fix", "(#12, !3)"),
            engine.entry_for_type("fix", r"keep \(#5)"),
            engine.entry_for_type("refactor", "").with_breaking(true),
            engine.entry_for_type("docs", ""),
            engine.entry_for_type("feat", "").with_scope("ui"),
            engine.entry_for_type("security", "").with_issue("9"),
            engine.entry_for_type("revert", "cache (see #4)").with_pr("11"),
        ];
        for entry in entries {
            engine.add_entry(&mut changelog, entry).unwrap();
        }

        let rendered = engine.render(&changelog);
        let parsed = engine.parse(&rendered).unwrap();
        assert_eq!(parsed, changelog);
        assert_eq!(engine.render(&parsed), rendered);
    }

    #[test]
    fn test_empty_breaking_subject_survives_round_trip() {
        let engine = ChangelogEngine::default();
        let records = engine.normalize(&["abc1234|jane|2024-01-10||BREAKING CHANGE: x"]);
        let mut changelog = Changelog::new();
        for entry in engine.entries(&records) {
            engine.add_entry(&mut changelog, entry).unwrap();
        }

        let entry = &changelog.versions[0].entries[0];
        assert!(entry.breaking);
        assert_eq!(entry.description, "");

        let parsed = engine.parse(&engine.render(&changelog)).unwrap();
        assert_eq!(parsed, changelog);
    }
}
