//! Operator-facing events emitted by the walker and executor

use std::io::Write;
use std::path::Path;

use super::config::{ERROR_MESSAGE_MAX_LENGTH, ERROR_MESSAGE_TRUNCATE_LENGTH};
use super::stats::TraversalSummary;

/// Sink for the events a run produces
///
/// How events look is up to the implementation; the core only decides when
/// they happen. Calls made during a walk are wrapped by the progress tracker
/// so they never land on top of the progress line.
pub trait Reporter: Send + Sync {
    /// A directory matched an exclusion rule and was pruned
    fn skipped(&self, path: &Path);

    /// A git operation on a repository completed successfully
    fn success(&self, path: &Path);

    /// A git operation failed, or the walk could not read an entry
    fn error(&self, path: &Path, cause: &anyhow::Error);

    /// Captured output of a read-only operation, shown before its success event
    fn output(&self, _path: &Path, output: &str) {
        print!("{output}");
        let _ = std::io::stdout().flush();
    }

    /// Announces a recursive walk once the directory count is known
    fn walk_started(&self, _root: &Path, _total_dirs: usize) {}

    /// Final line of a recursive walk
    fn summary(&self, summary: &TraversalSummary) {
        println!("{}", summary.summary_line());
    }
}

/// Plain stdout reporter used by the `got` binary
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn skipped(&self, path: &Path) {
        println!("🟠 Skipping [{}]", path.display());
    }

    fn success(&self, path: &Path) {
        println!("🟢 [{}]: Success", path.display());
    }

    fn error(&self, path: &Path, cause: &anyhow::Error) {
        println!(
            "🔴 [{}]: ERROR {}",
            path.display(),
            clean_error_message(&format!("{cause:#}"))
        );
    }

    fn walk_started(&self, root: &Path, total_dirs: usize) {
        println!(
            "{} {}...",
            super::config::SCANNING_MESSAGE,
            root.display()
        );
        println!("Found {total_dirs} directories to process");
        println!();
    }

    fn summary(&self, summary: &TraversalSummary) {
        println!();
        println!("{}", summary.summary_line());
    }
}

/// Squeezes multi-line git output into one bounded line
pub(crate) fn clean_error_message(error: &str) -> String {
    let cleaned = error
        .replace('\r', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        let truncated: String = cleaned.chars().take(ERROR_MESSAGE_TRUNCATE_LENGTH).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}
