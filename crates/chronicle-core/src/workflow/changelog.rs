//! Changelog persistence

use std::path::Path;

use tracing::{debug, info};

use crate::error::{ChangelogError, Result};

/// Write the rendered changelog to a file, replacing any existing content
pub fn write_changelog(path: &Path, content: &str) -> Result<()> {
    info!(path = %path.display(), bytes = content.len(), "writing changelog");
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Read existing changelog content
pub fn read_changelog(path: &Path) -> Result<Option<String>> {
    if path.exists() {
        debug!(path = %path.display(), "reading existing changelog");
        Ok(Some(std::fs::read_to_string(path)?))
    } else {
        debug!(path = %path.display(), "no existing changelog found");
        Ok(None)
    }
}

/// Read a changelog that must already exist
pub fn read_required_changelog(path: &Path) -> Result<String> {
    read_changelog(path)?.ok_or_else(|| ChangelogError::FileNotFound(path.to_path_buf()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChronicleError;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docs").join("CHANGELOG.md");

        write_changelog(&path, "# Changelog\n").unwrap();
        let content = read_changelog(&path).unwrap();
        assert_eq!(content.as_deref(), Some("# Changelog\n"));
    }

    #[test]
    fn test_read_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGELOG.md");

        assert!(read_changelog(&path).unwrap().is_none());
        assert!(matches!(
            read_required_changelog(&path),
            Err(ChronicleError::Changelog(ChangelogError::FileNotFound(_)))
        ));
    }
}
