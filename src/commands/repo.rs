//! Pull, fetch and status command implementation
//!
//! Validates the target directory, then either runs the operation once
//! against it or walks the tree under it.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::core::{CancelToken, ConsoleReporter, GotConfig, TraversalSummary, Walker};
use crate::git::{Executor, Operation, RunOutcome};
use crate::utils::{progress_supported, validate_directory_path};

/// Options shared by every repository subcommand
#[derive(Debug, Clone, Default)]
pub struct RepoOptions {
    pub directory: PathBuf,
    pub recursive: bool,
    pub show_progress: bool,
    pub config_path: Option<PathBuf>,
}

/// What a command did, for choosing the exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Single(RunOutcome),
    Walk(TraversalSummary),
}

impl CommandOutcome {
    pub fn has_failures(&self) -> bool {
        match self {
            CommandOutcome::Single(outcome) => outcome.is_failure(),
            CommandOutcome::Walk(summary) => summary.failed > 0,
        }
    }
}

/// Handles `got pull|fetch|status` against the real git binary
pub async fn handle_repo_command(
    op: Operation,
    options: &RepoOptions,
    cancel: &CancelToken,
) -> Result<CommandOutcome> {
    let executor = Executor::with_git(Arc::new(ConsoleReporter));
    run_repo_command(executor, op, options, cancel).await
}

/// Runs a repository command with the given executor
pub async fn run_repo_command(
    executor: Executor,
    op: Operation,
    options: &RepoOptions,
    cancel: &CancelToken,
) -> Result<CommandOutcome> {
    let target = validate_directory_path(&options.directory)?;

    if !options.recursive {
        let outcome = executor.run_single(cancel, &target, op).await?;
        return Ok(CommandOutcome::Single(outcome));
    }

    let (mut config, source) = GotConfig::load(options.config_path.as_deref())?;
    if let Some(path) = source {
        println!("Using config file: {}", path.display());
    }
    config.apply_env();

    let rules = config.skip_rules();
    debug!(patterns = ?rules.patterns(), "skip rules");

    let summary = Walker::new(executor, rules)
        .with_progress(options.show_progress && progress_supported())
        .walk(cancel, &target, op)
        .await?;
    Ok(CommandOutcome::Walk(summary))
}
