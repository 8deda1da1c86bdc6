//! Git process invocation behind a replaceable runner

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::repository::git_dir;
use crate::core::{CancelToken, WalkError};

const GIT_BINARY: &str = "git";
pub const WORK_TREE_ARG: &str = "--work-tree=";
pub const GIT_DIR_ARG: &str = "--git-dir=";

/// Executes git on behalf of the executor
///
/// Injected into [`Executor`](super::Executor) so tests can substitute a fake.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs git with `args` and returns its combined stdout and stderr
    ///
    /// A non-zero exit status is an error. Resolves to [`WalkError::Cancelled`]
    /// once `cancel` fires.
    async fn run_git(&self, cancel: &CancelToken, path: &Path, args: &[OsString])
        -> Result<Vec<u8>>;
}

/// Runs the real `git` binary
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCommandRunner;

impl GitCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for GitCommandRunner {
    async fn run_git(
        &self,
        cancel: &CancelToken,
        path: &Path,
        args: &[OsString],
    ) -> Result<Vec<u8>> {
        let mut command = Command::new(GIT_BINARY);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Dropping the output future on cancellation kills the child
        let output = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WalkError::Cancelled.into()),
            output = command.output() => output
                .with_context(|| format!("failed to run git for {}", path.display()))?,
        };

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if !output.status.success() {
            let detail = String::from_utf8_lossy(&combined);
            let detail = detail.trim();
            if detail.is_empty() {
                anyhow::bail!("{}", output.status);
            }
            anyhow::bail!("{}: {}", output.status, detail);
        }

        Ok(combined)
    }
}

/// Builds git arguments scoped to one repository
///
/// Work tree and metadata directory are always explicit so the process
/// working directory never matters.
pub fn scoped_args(path: &Path, args: &[&str]) -> Vec<OsString> {
    let mut work_tree = OsString::from(WORK_TREE_ARG);
    work_tree.push(path);
    let mut git_dir_arg = OsString::from(GIT_DIR_ARG);
    git_dir_arg.push(git_dir(path));

    let mut scoped = Vec::with_capacity(args.len() + 2);
    scoped.push(work_tree);
    scoped.push(git_dir_arg);
    scoped.extend(args.iter().map(OsString::from));
    scoped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CancelHandle;

    #[test]
    fn test_scoped_args() {
        let args = scoped_args(Path::new("/work/repo"), &["status"]);
        assert_eq!(
            args,
            vec![
                OsString::from("--work-tree=/work/repo"),
                OsString::from("--git-dir=/work/repo/.git"),
                OsString::from("status"),
            ]
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_spawn_resolves_to_cancelled() {
        let handle = CancelHandle::new();
        handle.cancel();

        let err = GitCommandRunner::new()
            .run_git(&handle.token(), Path::new("/tmp"), &[OsString::from("--version")])
            .await
            .unwrap_err();

        assert!(err
            .downcast_ref::<WalkError>()
            .is_some_and(WalkError::is_cancelled));
    }
}
