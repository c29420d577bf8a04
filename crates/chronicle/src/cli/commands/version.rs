//! Version command

use clap::Args;
use console::style;
use tracing::info;

use chronicle_git::GitRepo;

use super::Project;
use crate::cli::{Cli, OutputFormat};

/// Show the current and next version
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Show current version only
    #[arg(long)]
    pub current: bool,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(current = self.current, "executing version command");
        let cwd = std::env::current_dir()?;
        let project = Project::load(&cwd);

        let repo = GitRepo::discover(&cwd)?;
        let inference = project.engine.infer_next_version(&repo)?;

        if self.current {
            match cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({ "current": inference.current });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => println!("{}", inference.current),
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&inference)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Version Calculation").bold());
                    println!();
                    println!("  Current version:  {}", style(&inference.current).cyan());
                    println!("  Next version:     {}", style(&inference.next).green().bold());
                    println!(
                        "  Next tag:         {}",
                        project.config.versioning.tag_for(&inference.next)
                    );
                    println!("  Bump type:        {}", style(inference.bump).yellow());
                    println!("  Commits analyzed: {}", inference.commits);
                } else {
                    println!("{}", inference.next);
                }
            }
        }

        Ok(())
    }
}
