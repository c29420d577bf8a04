//! Show command

use clap::Args;
use tracing::info;

use chronicle_changelog::UNRELEASED;
use chronicle_core::error::ChangelogError;
use chronicle_core::workflow::read_required_changelog;

use super::Project;
use crate::cli::{Cli, OutputFormat};

/// Show one version of the changelog
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Version to show (defaults to the latest release)
    #[arg(id = "show_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Show the Unreleased section
    #[arg(short, long, conflicts_with = "version")]
    pub unreleased: bool,
}

impl ShowCommand {
    /// Execute the show command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(version = ?self.version, unreleased = self.unreleased, "executing show command");
        let cwd = std::env::current_dir()?;
        let project = Project::load(&cwd);
        let text = read_required_changelog(&project.changelog_path)?;
        let changelog = project.engine.parse(&text)?;

        let version = if self.unreleased {
            changelog
                .unreleased()
                .ok_or_else(|| ChangelogError::VersionNotFound(UNRELEASED.to_string()))?
        } else if let Some(label) = &self.version {
            let label = label.strip_prefix('v').unwrap_or(label);
            changelog
                .find(label)
                .ok_or_else(|| ChangelogError::VersionNotFound(label.to_string()))?
        } else {
            changelog.latest_release().ok_or_else(|| {
                anyhow::anyhow!("No releases in {}", project.changelog_path.display())
            })?
        };

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(version)?),
            OutputFormat::Text => print!("{}", project.engine.render_version(version)),
        }

        Ok(())
    }
}
