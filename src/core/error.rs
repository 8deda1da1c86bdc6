//! Error types for got
//!
//! Only failures that end a top-level invocation live here: validation of the
//! target directory, a non-repository target in single mode, configuration
//! problems and cancellation. Failures of individual git invocations are
//! carried as `anyhow::Error` and handed to the reporter instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("directory path cannot be empty")]
    EmptyPath,

    #[error("directory does not exist: '{}'", .0.display())]
    PathNotFound(PathBuf),

    #[error("path is not a directory: '{}'", .0.display())]
    NotADirectory(PathBuf),

    #[error("directory is not accessible: '{}': {source}", .path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised only by the single-target entry point
    #[error("[{}] is not a git repository", .0.display())]
    NotARepository(PathBuf),

    /// The shared cancellation token fired; the only error that aborts a walk
    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid configuration in '{}': {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl WalkError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WalkError::Cancelled)
    }
}

pub type Result<T, E = WalkError> = std::result::Result<T, E>;
