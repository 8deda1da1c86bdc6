//! Git operations applied per repository, and their outcomes

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// Git command arguments
const GIT_PULL_ARGS: &[&str] = &["pull"];
const GIT_FETCH_ARGS: &[&str] = &["fetch"];
const GIT_STATUS_ARGS: &[&str] = &["status"];

/// Operation applied to each repository root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `git pull`, mutating
    Pull,
    /// `git fetch`, mutating
    Fetch,
    /// `git status`, read-only and captured
    Status,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Pull, Operation::Fetch, Operation::Status];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Pull => "pull",
            Operation::Fetch => "fetch",
            Operation::Status => "status",
        }
    }

    /// Arguments following the work-tree and git-dir flags
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Operation::Pull => GIT_PULL_ARGS,
            Operation::Fetch => GIT_FETCH_ARGS,
            Operation::Status => GIT_STATUS_ARGS,
        }
    }

    /// Read-only operations have their output captured instead of showing a spinner
    pub fn captures_output(&self) -> bool {
        matches!(self, Operation::Status)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("unknown operation '{s}' (expected pull, fetch or status)"))
    }
}

/// What happened when an operation was applied to one directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Not a repository; nothing was run
    NotRepository,
    /// Git exited successfully
    Succeeded,
    /// Git failed; already reported through the error event
    Failed,
}

impl RunOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RunOutcome::Failed)
    }
}

/// Completed invocation held until a walk flushes its buffer
#[derive(Debug)]
pub struct OperationResult {
    pub path: PathBuf,
    /// Captured output; empty for mutating operations
    pub output: String,
    pub error: Option<anyhow::Error>,
}

impl OperationResult {
    pub fn success(path: &Path, output: String) -> Self {
        Self {
            path: path.to_path_buf(),
            output,
            error: None,
        }
    }

    pub fn failure(path: &Path, error: anyhow::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            output: String::new(),
            error: Some(error),
        }
    }
}
