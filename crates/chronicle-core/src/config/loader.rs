//! Configuration discovery and loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::CONFIG_FILE_NAMES;
use super::types::Config;
use super::validation::validate_config;

/// Directory that may hold the configuration instead of the project root
const GITHUB_DIR: &str = ".github";

/// Serialization format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Format implied by the file extension; anything but `.toml` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    /// Deserialize a configuration document
    pub fn parse(self, content: &str) -> Result<Config> {
        let config: Config = match self {
            Self::Toml => toml::from_str(content).map_err(ConfigError::TomlError)?,
            Self::Yaml => serde_yaml::from_str(content).map_err(ConfigError::YamlError)?,
        };
        Ok(config)
    }
}

/// Configuration in effect for a project directory
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Validated configuration, or the defaults
    pub config: Config,
    /// File the configuration came from
    pub path: Option<PathBuf>,
    /// Directory relative paths in the configuration are resolved against
    pub root: PathBuf,
}

impl LoadedConfig {
    /// Location of the changelog document
    pub fn changelog_path(&self) -> PathBuf {
        self.root.join(&self.config.changelog.file)
    }
}

/// Read, parse and validate one configuration file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::from_path(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Nearest configuration file at or above `start_dir`.
///
/// Each directory is checked for every known file name, first in the
/// directory itself and then in its `.github/` folder.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");

    let found = start_dir.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES.iter().find_map(|name| {
            [dir.join(name), dir.join(GITHUB_DIR).join(name)]
                .into_iter()
                .find(|candidate| candidate.is_file())
        })
    });

    match &found {
        Some(path) => info!(path = %path.display(), "found config file"),
        None => debug!("no config file found"),
    }
    found
}

/// Project directory owning a configuration file
fn project_root(config_path: &Path) -> Option<PathBuf> {
    let dir = config_path.parent()?;
    let root = if dir.file_name().is_some_and(|name| name == GITHUB_DIR) {
        dir.parent().unwrap_or(dir)
    } else {
        dir
    };
    Some(root.to_path_buf())
}

/// Configuration for the project containing `dir`.
///
/// Falls back to the defaults rooted at `dir` when no file exists or the
/// file that exists cannot be loaded.
pub fn load_project_config(dir: &Path) -> LoadedConfig {
    let defaults = || LoadedConfig {
        config: Config::default(),
        path: None,
        root: dir.to_path_buf(),
    };

    let Some(path) = find_config(dir) else {
        debug!(dir = %dir.display(), "no config found, using defaults");
        return defaults();
    };

    match load_config(&path) {
        Ok(config) => LoadedConfig {
            config,
            root: project_root(&path).unwrap_or_else(|| dir.to_path_buf()),
            path: Some(path),
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config could not be loaded, using defaults");
            defaults()
        }
    }
}
