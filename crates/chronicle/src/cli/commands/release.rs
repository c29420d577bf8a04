//! Release command

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use chronicle_git::GitRepo;

use super::Project;
use crate::cli::{output, Cli, OutputFormat};

/// Turn the Unreleased section into a release
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Version to release (inferred from git history when omitted)
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Release date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Dry run - print the result without writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {} (expected YYYY-MM-DD)", value, e))
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            version = ?self.version,
            date = ?self.date,
            dry_run = self.dry_run,
            "executing release command"
        );
        let cwd = std::env::current_dir()?;
        let project = Project::load(&cwd);

        let version = match &self.version {
            Some(version) => version.clone(),
            None => {
                let repo = GitRepo::discover(&cwd)?;
                let inference = project.engine.infer_next_version(&repo)?;
                if !cli.quiet && cli.format == OutputFormat::Text {
                    output::info(&format!(
                        "Inferred {} release {} from {} commit(s)",
                        inference.bump,
                        output::version_style().apply_to(&inference.next),
                        inference.commits
                    ));
                }
                inference.next
            }
        };
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());

        let mut changelog = project.read_document()?;
        project.engine.cut_release(&mut changelog, &version, date)?;

        if self.dry_run {
            if let Some(release) = changelog.versions.get(1) {
                println!("{}", project.engine.render_version(release));
            }
            return Ok(());
        }

        if !self.yes && cli.format == OutputFormat::Text && !cli.quiet {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Release {} dated {} in {}?",
                    version,
                    date,
                    project.changelog_path.display()
                ))
                .default(true)
                .interact()?;

            if !confirmed {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        project.write_document(&changelog)?;

        // The release is the section right below the fresh Unreleased one
        let released = changelog
            .versions
            .get(1)
            .ok_or_else(|| anyhow::anyhow!("release section missing after cut"))?;
        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(released)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success(&format!(
                        "Released {} ({} entries) in {}",
                        output::version_style().apply_to(&released.version),
                        released.entries.len(),
                        output::path_style().apply_to(project.changelog_path.display())
                    ));
                    println!(
                        "  Tag it with: {}",
                        style(format!(
                            "git tag {}",
                            project.config.versioning.tag_for(&released.version)
                        ))
                        .cyan()
                    );
                }
            }
        }

        Ok(())
    }
}
