//! Runs one git operation against one directory
//!
//! Two entry points share one runner: the recursive one treats a
//! non-repository as a silent no-op, the single one reports it as an error.
//! A failing git process is reported through the [`Reporter`] and never
//! returned as an error, so a walk keeps going. Only cancellation (and the
//! single-mode "not a repository") comes back as `Err`.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::operation::{Operation, OperationResult, RunOutcome};
use super::repository::is_repository;
use super::runner::{scoped_args, CommandRunner, GitCommandRunner};
use crate::core::{CancelToken, Reporter, Spinner, WalkError, WalkSession};

pub struct Executor {
    runner: Arc<dyn CommandRunner>,
    reporter: Arc<dyn Reporter>,
}

impl Executor {
    pub fn new(runner: Arc<dyn CommandRunner>, reporter: Arc<dyn Reporter>) -> Self {
        Self { runner, reporter }
    }

    /// Executor backed by the real `git` binary
    pub fn with_git(reporter: Arc<dyn Reporter>) -> Self {
        Self::new(Arc::new(GitCommandRunner::new()), reporter)
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    /// Runs `op` on a directory visited by a walk
    ///
    /// Non-repositories return [`RunOutcome::NotRepository`] without running
    /// anything. Results are buffered in `session` until the walk flushes.
    pub async fn run_for_recursive(
        &self,
        session: &mut WalkSession<'_>,
        cancel: &CancelToken,
        path: &Path,
        op: Operation,
    ) -> Result<RunOutcome, WalkError> {
        if !is_repository(path) {
            return Ok(RunOutcome::NotRepository);
        }
        self.run(Some(session), cancel, path, op).await
    }

    /// Runs `op` on an explicitly named directory
    ///
    /// A target that is not a repository is a [`WalkError::NotARepository`].
    /// Output and events are shown immediately.
    pub async fn run_single(
        &self,
        cancel: &CancelToken,
        path: &Path,
        op: Operation,
    ) -> Result<RunOutcome, WalkError> {
        if !is_repository(path) {
            return Err(WalkError::NotARepository(path.to_path_buf()));
        }
        self.run(None, cancel, path, op).await
    }

    async fn run(
        &self,
        session: Option<&mut WalkSession<'_>>,
        cancel: &CancelToken,
        path: &Path,
        op: Operation,
    ) -> Result<RunOutcome, WalkError> {
        if cancel.is_cancelled() {
            return Err(WalkError::Cancelled);
        }

        let args = scoped_args(path, op.args());
        debug!(path = %path.display(), operation = op.name(), "running git");

        let spinner =
            shows_spinner(op, session.as_deref()).then(|| Spinner::start(op.name(), path));
        let result = self.runner.run_git(cancel, path, &args).await;
        drop(spinner);

        if cancel.is_cancelled() {
            return Err(WalkError::Cancelled);
        }

        match result {
            Err(e) => {
                if e.downcast_ref::<WalkError>().is_some_and(WalkError::is_cancelled) {
                    return Err(WalkError::Cancelled);
                }
                warn!(path = %path.display(), operation = op.name(), error = %e, "git failed");
                match session {
                    Some(session) => session
                        .tracker()
                        .show_message(|| self.reporter.error(path, &e)),
                    None => self.reporter.error(path, &e),
                }
                Ok(RunOutcome::Failed)
            }
            Ok(output) => {
                let output = if op.captures_output() {
                    String::from_utf8_lossy(&output).into_owned()
                } else {
                    String::new()
                };
                match session {
                    Some(session) => session.record(OperationResult::success(path, output)),
                    None => {
                        if !output.is_empty() {
                            self.reporter.output(path, &output);
                        }
                        self.reporter.success(path);
                    }
                }
                Ok(RunOutcome::Succeeded)
            }
        }
    }
}

/// Whether a spinner accompanies `op`
///
/// Captured operations never spin. Mutating ones spin unless a drawn
/// progress line already owns the terminal.
pub(crate) fn shows_spinner(op: Operation, session: Option<&WalkSession<'_>>) -> bool {
    !op.captures_output() && session.map_or(true, |s| !s.tracker().is_enabled())
}
