//! Repository root detection

use std::path::{Path, PathBuf};

/// Name of the metadata directory marking a repository root
pub const GIT_DIR_NAME: &str = ".git";

/// True iff `path` directly contains a `.git` directory
///
/// A single stat; a missing `path` is simply not a repository.
pub fn is_repository(path: &Path) -> bool {
    git_dir(path).is_dir()
}

/// True iff `path` is itself a metadata directory
pub fn is_git_dir(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == GIT_DIR_NAME)
}

/// Metadata directory of the repository rooted at `path`
pub fn git_dir(path: &Path) -> PathBuf {
    path.join(GIT_DIR_NAME)
}
