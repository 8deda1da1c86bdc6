//! File system utilities

use std::path::{Path, PathBuf};

use crate::core::WalkError;

/// Shortens long paths for display
pub fn shorten_path(path: &str, max_length: usize) -> String {
    if path.len() <= max_length {
        return path.to_string();
    }

    let components: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if components.len() <= 2 {
        // Too few components to shorten meaningfully
        return path.to_string();
    }

    // Keep last 2 components with ellipsis prefix
    let prefix = if path.starts_with("./") { "./" } else { "" };
    format!(
        "{}.../{}/{}",
        prefix,
        components[components.len() - 2],
        components[components.len() - 1]
    )
}

/// Validates a target directory before any work starts
///
/// Returns the absolute form of the path so later messages and skip-rule
/// matching see the full location.
pub fn validate_directory_path(path: &Path) -> Result<PathBuf, WalkError> {
    if path.as_os_str().is_empty() {
        return Err(WalkError::EmptyPath);
    }

    let abs_path = std::path::absolute(path).map_err(|source| WalkError::Inaccessible {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata = match std::fs::metadata(&abs_path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(WalkError::PathNotFound(abs_path));
        }
        Err(source) => {
            return Err(WalkError::Inaccessible {
                path: abs_path,
                source,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory(abs_path));
    }

    if let Err(source) = std::fs::read_dir(&abs_path) {
        return Err(WalkError::Inaccessible {
            path: abs_path,
            source,
        });
    }

    Ok(abs_path)
}
