//! CLI commands

mod add;
mod completions;
mod generate;
mod init;
mod release;
mod show;
mod version;

pub use add::AddCommand;
pub use completions::CompletionsCommand;
pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use release::ReleaseCommand;
pub use show::ShowCommand;
pub use version::VersionCommand;

use std::path::{Path, PathBuf};

use chronicle_changelog::{Changelog, ChangelogEngine};
use chronicle_core::config::{load_project_config, Config};
use chronicle_core::workflow::{read_changelog, write_changelog};
use tracing::debug;

/// Configuration, changelog location and engine for the current directory
pub(crate) struct Project {
    pub config: Config,
    pub changelog_path: PathBuf,
    pub engine: ChangelogEngine,
}

impl Project {
    /// Load the project rooted at (or above) `dir`
    pub fn load(dir: &Path) -> Self {
        let loaded = load_project_config(dir);
        let changelog_path = loaded.changelog_path();
        debug!(
            config = ?loaded.path,
            path = %changelog_path.display(),
            "resolved changelog path"
        );

        let engine = ChangelogEngine::new(&loaded.config);
        Self {
            config: loaded.config,
            changelog_path,
            engine,
        }
    }

    /// Parse the changelog file, or start an empty document when it is missing
    pub fn read_document(&self) -> anyhow::Result<Changelog> {
        match read_changelog(&self.changelog_path)? {
            Some(text) => Ok(self.engine.parse(&text)?),
            None => Ok(Changelog::new()),
        }
    }

    /// Render and write the changelog file
    pub fn write_document(&self, changelog: &Changelog) -> anyhow::Result<()> {
        write_changelog(&self.changelog_path, &self.engine.render(changelog))?;
        Ok(())
    }
}
