//! Add command

use clap::Args;
use tracing::info;

use super::Project;
use crate::cli::{output, Cli, OutputFormat};

/// Add an entry to the Unreleased section
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Commit-style change type (feat, fix, docs, security, ...)
    #[arg(value_name = "TYPE")]
    pub change_type: String,

    /// Description of the change
    pub description: String,

    /// Scope shown in front of the description
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Mark the change as breaking
    #[arg(short, long)]
    pub breaking: bool,

    /// Related issue number
    #[arg(long)]
    pub issue: Option<String>,

    /// Related pull request number
    #[arg(long)]
    pub pr: Option<String>,
}

impl AddCommand {
    /// Execute the add command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(change_type = %self.change_type, breaking = self.breaking, "executing add command");
        if self.description.trim().is_empty() {
            anyhow::bail!("Description must not be empty");
        }

        let cwd = std::env::current_dir()?;
        let project = Project::load(&cwd);

        let mut entry = project
            .engine
            .entry_for_type(&self.change_type, &self.description)
            .with_breaking(self.breaking);
        if let Some(scope) = &self.scope {
            entry = entry.with_scope(scope.as_str());
        }
        if let Some(issue) = &self.issue {
            entry = entry.with_issue(issue.as_str());
        }
        if let Some(pr) = &self.pr {
            entry = entry.with_pr(pr.as_str());
        }

        let mut changelog = project.read_document()?;
        project.engine.add_entry(&mut changelog, entry.clone())?;
        project.write_document(&changelog)?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success(&format!(
                        "Added to {} under {}",
                        output::path_style().apply_to(project.changelog_path.display()),
                        entry.category
                    ));
                }
            }
        }

        Ok(())
    }
}
