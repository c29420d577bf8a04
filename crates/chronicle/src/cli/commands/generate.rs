//! Generate command

use clap::Args;
use tracing::info;

use chronicle_changelog::ChangelogEngine;
use chronicle_core::workflow::write_changelog;
use chronicle_git::GitRepo;

use super::Project;
use crate::cli::{output, Cli, OutputFormat};

/// Regenerate the changelog from git history
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,

    /// Include commit hashes in entries
    #[arg(long)]
    pub hashes: bool,

    /// Include author names in entries
    #[arg(long)]
    pub authors: bool,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(write = self.write, output = ?self.output, "executing generate command");
        let cwd = std::env::current_dir()?;
        let mut project = Project::load(&cwd);

        if self.hashes || self.authors {
            let mut config = project.config.clone();
            config.changelog.include_hashes |= self.hashes;
            config.changelog.include_authors |= self.authors;
            project.engine = ChangelogEngine::new(&config);
        }

        let repo = GitRepo::discover(&cwd)?;
        let changelog = project.engine.generate_from_history(&repo)?;

        if changelog.is_empty() && !cli.quiet {
            output::warning("No commits or release tags found.");
        }

        if self.write || self.output.is_some() {
            let output_path = self
                .output
                .clone()
                .unwrap_or_else(|| project.changelog_path.clone());
            write_changelog(&output_path, &project.engine.render(&changelog))?;

            if !cli.quiet {
                output::success(&format!(
                    "Changelog written to {}",
                    output::path_style().apply_to(output_path.display())
                ));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&changelog)?);
            }
            OutputFormat::Text => {
                print!("{}", project.engine.render(&changelog));
            }
        }

        Ok(())
    }
}
