//! Two-pass repository walk
//!
//! Pass 1 counts the directories pass 2 will visit so the progress line can
//! show a percentage and ETA. Pass 2 visits every directory in file-name
//! order, prunes metadata directories, skip-matched directories and
//! repository internals, and hands each remaining directory to the executor.

use std::mem;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::cancel::CancelToken;
use super::config::WALK_ERROR_CONTEXT;
use super::error::WalkError;
use super::matcher::SkipRules;
use super::progress::ProgressTracker;
use super::report::Reporter;
use super::stats::TraversalSummary;
use crate::git::{is_git_dir, is_repository, Executor, Operation, OperationResult};

/// State owned by one walk: the progress tracker and the results waiting to be flushed
pub struct WalkSession<'a> {
    tracker: &'a ProgressTracker,
    results: Vec<OperationResult>,
}

impl<'a> WalkSession<'a> {
    pub fn new(tracker: &'a ProgressTracker) -> Self {
        Self {
            tracker,
            results: Vec::new(),
        }
    }

    pub fn tracker(&self) -> &'a ProgressTracker {
        self.tracker
    }

    /// Buffers a completed invocation until the walk flushes
    pub fn record(&mut self, result: OperationResult) {
        self.results.push(result);
    }

    pub fn pending(&self) -> &[OperationResult] {
        &self.results
    }

    /// Drains buffered results in arrival order
    pub fn take_results(&mut self) -> Vec<OperationResult> {
        mem::take(&mut self.results)
    }
}

/// Walks a tree and applies one operation to every repository root in it
pub struct Walker {
    executor: Executor,
    rules: SkipRules,
    show_progress: bool,
}

impl Walker {
    pub fn new(executor: Executor, rules: SkipRules) -> Self {
        Self {
            executor,
            rules,
            show_progress: false,
        }
    }

    /// Enables the live progress line on stderr
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Runs `op` on every repository root under `root`
    ///
    /// Per-repository failures are reported and counted, never returned.
    /// Cancellation stops either pass at the next directory; buffered results
    /// and the summary are still emitted before `Cancelled` is returned.
    pub async fn walk(
        &self,
        cancel: &CancelToken,
        root: &Path,
        op: Operation,
    ) -> Result<TraversalSummary, WalkError> {
        let reporter = self.executor.reporter();

        let count = {
            let root = root.to_path_buf();
            let rules = self.rules.clone();
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || count_directories(&root, &rules, &cancel))
        };
        let counted = match count.await {
            Ok(counted) => counted,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(WalkError::Cancelled),
        };
        let total = match counted {
            Ok(total) => total,
            Err(e) => {
                info!(root = %root.display(), "walk stopped while counting: {e}");
                reporter.summary(&TraversalSummary::new());
                return Err(e);
            }
        };
        info!(root = %root.display(), total, operation = op.name(), "starting walk");
        reporter.walk_started(root, total);

        let tracker = ProgressTracker::new(self.show_progress);
        tracker.set_total(total);
        tracker.start();

        let mut session = WalkSession::new(&tracker);
        let mut summary = TraversalSummary::new();
        let result = self
            .visit_all(&mut session, &mut summary, cancel, root, op)
            .await;

        tracker.finish();
        flush(reporter, session.take_results());
        reporter.summary(&summary);

        match result {
            Ok(()) => {
                info!(
                    scanned = summary.scanned,
                    repositories = summary.repositories,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    "walk complete"
                );
                Ok(summary)
            }
            Err(e) => {
                info!(scanned = summary.scanned, "walk stopped: {e}");
                Err(e)
            }
        }
    }

    async fn visit_all(
        &self,
        session: &mut WalkSession<'_>,
        summary: &mut TraversalSummary,
        cancel: &CancelToken,
        root: &Path,
        op: Operation,
    ) -> Result<(), WalkError> {
        let reporter = self.executor.reporter();
        let mut entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = entries.next() {
            if cancel.is_cancelled() {
                return Err(WalkError::Cancelled);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Entries can vanish between listing and visiting
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    warn!(path = %path.display(), error = %err, "{WALK_ERROR_CONTEXT}");
                    // walkdir's Display already carries the io cause
                    let cause = anyhow::anyhow!("{err}").context(WALK_ERROR_CONTEXT);
                    session.tracker().show_message(|| reporter.error(&path, &cause));
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            if is_git_dir(path) {
                entries.skip_current_dir();
                continue;
            }

            let is_repo = is_repository(path);
            session.tracker().update(is_repo);

            if self.rules.should_skip(path) {
                debug!(path = %path.display(), "skipping");
                summary.record_skipped();
                session.tracker().show_message(|| reporter.skipped(path));
                entries.skip_current_dir();
                continue;
            }

            if is_repo {
                summary.record_repository();
            } else {
                summary.record_non_repository();
            }

            let outcome = self
                .executor
                .run_for_recursive(session, cancel, path, op)
                .await?;
            if outcome.is_failure() {
                summary.record_failure();
            }

            if is_repo {
                entries.skip_current_dir();
            }
        }

        Ok(())
    }
}

/// Counts the directories pass 2 will process
///
/// Metadata directories and skip-matched directories are pruned uncounted.
/// A repository root counts once and its subtree is pruned. Unreadable
/// entries are ignored here; pass 2 reports them. Runs on a blocking thread,
/// so `cancel` is polled once per entry.
pub fn count_directories(
    root: &Path,
    rules: &SkipRules,
    cancel: &CancelToken,
) -> Result<usize, WalkError> {
    let mut count = 0;
    let mut entries = WalkDir::new(root).follow_links(false).into_iter();

    while let Some(entry) = entries.next() {
        if cancel.is_cancelled() {
            return Err(WalkError::Cancelled);
        }
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if is_git_dir(path) || rules.should_skip(path) {
            entries.skip_current_dir();
            continue;
        }

        count += 1;
        if is_repository(path) {
            entries.skip_current_dir();
        }
    }

    Ok(count)
}

fn flush(reporter: &dyn Reporter, results: Vec<OperationResult>) {
    for result in results {
        match result.error {
            Some(cause) => reporter.error(&result.path, &cause),
            None => {
                if !result.output.is_empty() {
                    reporter.output(&result.path, &result.output);
                }
                reporter.success(&result.path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CancelHandle;
    use std::fs;
    use tempfile::TempDir;

    fn mkdirs(root: &Path, dirs: &[&str]) {
        for dir in dirs {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
    }

    #[test]
    fn test_count_includes_root_and_plain_directories() {
        let temp_dir = TempDir::new().unwrap();
        mkdirs(temp_dir.path(), &["a/b", "c"]);

        // root, a, a/b, c
        let total = count_directories(temp_dir.path(), &SkipRules::empty(), &CancelToken::never());
        assert_eq!(total.unwrap(), 4);
    }

    #[test]
    fn test_count_prunes_repository_internals() {
        let temp_dir = TempDir::new().unwrap();
        mkdirs(temp_dir.path(), &["repo/.git/objects", "repo/src/deep", "plain"]);

        // root, repo, plain
        let total = count_directories(temp_dir.path(), &SkipRules::empty(), &CancelToken::never());
        assert_eq!(total.unwrap(), 3);
    }

    #[test]
    fn test_count_prunes_skipped_without_counting() {
        let temp_dir = TempDir::new().unwrap();
        mkdirs(temp_dir.path(), &["vendor/lib", "vendor-tools/app"]);
        let rules = SkipRules::new(&["vendor"], false);

        // root, vendor-tools, vendor-tools/app
        let total = count_directories(temp_dir.path(), &rules, &CancelToken::never());
        assert_eq!(total.unwrap(), 3);
    }

    #[test]
    fn test_count_stops_when_cancelled() {
        let temp_dir = TempDir::new().unwrap();
        mkdirs(temp_dir.path(), &["a/b", "c"]);
        let handle = CancelHandle::new();
        handle.cancel();

        let err = count_directories(temp_dir.path(), &SkipRules::empty(), &handle.token())
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_session_buffers_in_arrival_order() {
        let tracker = ProgressTracker::new(false);
        let mut session = WalkSession::new(&tracker);
        session.record(OperationResult::success(Path::new("/one"), String::new()));
        session.record(OperationResult::failure(
            Path::new("/two"),
            anyhow::anyhow!("boom"),
        ));

        let results = session.take_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].path, Path::new("/one"));
        assert!(results[1].error.is_some());
        assert!(session.pending().is_empty());
    }
}
