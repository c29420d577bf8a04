//! Completions command

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use tracing::{debug, info};

use crate::cli::{output, Cli};

/// Print a completion script for chronicle
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Target shell (detected from $SHELL when omitted)
    #[arg(value_enum)]
    pub shell: Option<Shell>,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Write the completion script for `shell` into `out`
fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, bin_name, out);
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let shell = match self.shell.or_else(Shell::from_env) {
            Some(shell) => shell,
            None => anyhow::bail!("Could not detect the shell from $SHELL; pass it explicitly"),
        };
        info!(%shell, output = ?self.output, "executing completions command");

        match &self.output {
            Some(path) => {
                let mut file = std::fs::File::create(path)?;
                write_completions(shell, &mut file);
                debug!(path = %path.display(), "wrote completion script");
                if !cli.quiet {
                    output::success(&format!(
                        "{} completions written to {}",
                        shell,
                        output::path_style().apply_to(path.display())
                    ));
                }
            }
            None => write_completions(shell, &mut std::io::stdout().lock()),
        }

        Ok(())
    }
}
