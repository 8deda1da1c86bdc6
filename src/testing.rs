//! Test doubles for the runner and reporter seams
//!
//! Compiled for unit tests and for integration tests through the
//! `test-utils` feature.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::{CancelHandle, CancelToken, Reporter, TraversalSummary, WalkError};
use crate::git::{CommandRunner, GIT_DIR_ARG, WORK_TREE_ARG};

pub const DEFAULT_MOCK_OUTPUT: &str = "mock git output";

#[derive(Default)]
struct MockState {
    commands: Vec<Vec<OsString>>,
    paths: Vec<PathBuf>,
    outputs: HashMap<String, Vec<u8>>,
    errors: HashMap<String, String>,
    path_errors: HashMap<PathBuf, String>,
    cancel_on: HashMap<String, CancelHandle>,
}

/// Fake runner that records invocations and returns canned results
///
/// Results are keyed by the operation's arguments joined with spaces, with
/// the work-tree and git-dir arguments left out (`"status"`, `"pull"`).
/// Unconfigured keys succeed with [`DEFAULT_MOCK_OUTPUT`].
#[derive(Default)]
pub struct MockCommandRunner {
    state: Mutex<MockState>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_output(&self, key: &str, output: &str) {
        self.lock()
            .outputs
            .insert(key.to_string(), output.as_bytes().to_vec());
    }

    pub fn set_error(&self, key: &str, message: &str) {
        self.lock()
            .errors
            .insert(key.to_string(), message.to_string());
    }

    /// Fails every invocation against one repository
    pub fn fail_path(&self, path: &Path, message: &str) {
        self.lock()
            .path_errors
            .insert(path.to_path_buf(), message.to_string());
    }

    /// Cancels `handle` when `key` is invoked, as an interrupt arriving mid-command would
    pub fn cancel_on(&self, key: &str, handle: CancelHandle) {
        self.lock().cancel_on.insert(key.to_string(), handle);
    }

    /// Full argument lists of every invocation, in order
    pub fn commands(&self) -> Vec<Vec<OsString>> {
        self.lock().commands.clone()
    }

    /// Repository paths of every invocation, in order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().paths.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().commands.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Joins the operation arguments, leaving out the repository scoping arguments
pub fn invocation_key(args: &[OsString]) -> String {
    args.iter()
        .map(|arg| arg.to_string_lossy())
        .filter(|arg| !arg.starts_with(WORK_TREE_ARG) && !arg.starts_with(GIT_DIR_ARG))
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run_git(
        &self,
        _cancel: &CancelToken,
        path: &Path,
        args: &[OsString],
    ) -> Result<Vec<u8>> {
        let key = invocation_key(args);
        let mut state = self.lock();
        state.commands.push(args.to_vec());
        state.paths.push(path.to_path_buf());

        if let Some(handle) = state.cancel_on.get(&key) {
            handle.cancel();
            return Err(WalkError::Cancelled.into());
        }
        if let Some(message) = state.path_errors.get(path) {
            anyhow::bail!("{message}");
        }
        if let Some(message) = state.errors.get(&key) {
            anyhow::bail!("{message}");
        }

        Ok(state
            .outputs
            .get(&key)
            .cloned()
            .unwrap_or_else(|| DEFAULT_MOCK_OUTPUT.as_bytes().to_vec()))
    }
}

/// One event seen by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Skipped(PathBuf),
    Success(PathBuf),
    Error(PathBuf, String),
    Output(PathBuf, String),
    WalkStarted(PathBuf, usize),
    Summary(TraversalSummary),
}

/// Reporter that records events in order instead of printing them
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn success_paths(&self) -> Vec<PathBuf> {
        self.collect(|event| match event {
            Event::Success(path) => Some(path.clone()),
            _ => None,
        })
    }

    pub fn error_paths(&self) -> Vec<PathBuf> {
        self.collect(|event| match event {
            Event::Error(path, _) => Some(path.clone()),
            _ => None,
        })
    }

    pub fn skipped_paths(&self) -> Vec<PathBuf> {
        self.collect(|event| match event {
            Event::Skipped(path) => Some(path.clone()),
            _ => None,
        })
    }

    /// Completion events: successes and errors, in emission order
    pub fn completions(&self) -> Vec<Event> {
        self.collect(|event| match event {
            Event::Success(_) | Event::Error(..) => Some(event.clone()),
            _ => None,
        })
    }

    pub fn summaries(&self) -> Vec<TraversalSummary> {
        self.collect(|event| match event {
            Event::Summary(summary) => Some(*summary),
            _ => None,
        })
    }

    fn collect<T>(&self, f: impl Fn(&Event) -> Option<T>) -> Vec<T> {
        self.lock().iter().filter_map(f).collect()
    }

    fn push(&self, event: Event) {
        self.lock().push(event);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Reporter for RecordingReporter {
    fn skipped(&self, path: &Path) {
        self.push(Event::Skipped(path.to_path_buf()));
    }

    fn success(&self, path: &Path) {
        self.push(Event::Success(path.to_path_buf()));
    }

    fn error(&self, path: &Path, cause: &anyhow::Error) {
        self.push(Event::Error(path.to_path_buf(), format!("{cause:#}")));
    }

    fn output(&self, path: &Path, output: &str) {
        self.push(Event::Output(path.to_path_buf(), output.to_string()));
    }

    fn walk_started(&self, root: &Path, total_dirs: usize) {
        self.push(Event::WalkStarted(root.to_path_buf(), total_dirs));
    }

    fn summary(&self, summary: &TraversalSummary) {
        self.push(Event::Summary(*summary));
    }
}
