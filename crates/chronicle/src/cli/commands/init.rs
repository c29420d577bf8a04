//! Init command

use std::path::PathBuf;

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use chronicle_changelog::Changelog;
use chronicle_core::config::{
    Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};

use super::Project;
use crate::cli::output;
use crate::cli::Cli;

/// Initialize a new Chronicle configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;

        // Choose format if not specified
        let format = if self.yes || self.output.is_some() {
            "yaml"
        } else {
            let formats = ["yaml", "toml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            formats[selection]
        };

        let config_path = match (&self.output, format) {
            (Some(path), _) => path.clone(),
            (None, "toml") => cwd.join(DEFAULT_CONFIG_TOML),
            (None, _) => cwd.join(DEFAULT_CONFIG_YAML),
        };
        let toml_output = config_path.extension().is_some_and(|e| e == "toml");

        // Check if config already exists
        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let content = if toml_output {
            let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
            toml::to_string_pretty(&config)?
        } else {
            DEFAULT_CONFIG_TEMPLATE.to_string()
        };
        std::fs::write(&config_path, &content)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
        }

        // Start an empty changelog next to the new configuration
        let config_dir = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&cwd);
        let project = Project::load(config_dir);
        if project.changelog_path.exists() {
            if !cli.quiet {
                output::warning(&format!(
                    "Keeping existing changelog at {}",
                    project.changelog_path.display()
                ));
            }
        } else {
            project.write_document(&Changelog::new())?;
            if !cli.quiet {
                output::success(&format!(
                    "Created changelog at {}",
                    output::path_style().apply_to(project.changelog_path.display())
                ));
            }
        }

        if !cli.quiet {
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to customize categories and links", config_path.display());
            println!("  2. Run {} to record a change", style("chronicle add feat \"...\"").cyan());
            println!("  3. Run {} to cut a release", style("chronicle release").cyan());
        }

        Ok(())
    }
}
