//! Git repository access

use std::path::Path;

use git2::Repository;
use tracing::{debug, info, instrument};

use chronicle_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Read-only view of a git repository used as a changelog history source
pub struct GitRepo {
    pub(crate) repo: Repository,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self { repo })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;
        debug!(git_dir = %repo.path().display(), "discovered repository");

        Ok(Self { repo })
    }

    /// Resolve a revision (tag name, hash, `HEAD`) to the commit it points at
    pub(crate) fn resolve_commit(&self, rev: &str) -> Result<git2::Commit<'_>> {
        debug!(rev, "resolving revision");
        let object = self.repo.revparse_single(rev)?;
        object.peel_to_commit().map_err(GitError::Git2)
    }

    /// Whether HEAD points at a commit yet
    pub fn has_commits(&self) -> bool {
        self.repo.head().and_then(|h| h.peel_to_commit()).is_ok()
    }
}
