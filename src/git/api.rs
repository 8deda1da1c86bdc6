//! Public API for git operations.
//!
//! This module provides the stable public API for git-related functionality:
//! - Repository root detection
//! - Running pull, fetch and status against one repository
//! - The replaceable process runner
//!
//! ## Example: Checking one repository
//!
//! ```rust,no_run
//! use got::core::{CancelToken, ConsoleReporter};
//! use got::git::{Executor, Operation};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! async fn check(path: &Path) {
//!     let executor = Executor::with_git(Arc::new(ConsoleReporter));
//!     if let Err(e) = executor.run_single(&CancelToken::never(), path, Operation::Status).await {
//!         eprintln!("{e}");
//!     }
//! }
//! ```

// Detection
pub use super::repository::{git_dir, is_git_dir, is_repository, GIT_DIR_NAME};

// Execution
pub use super::executor::Executor;
pub use super::operation::{Operation, OperationResult, RunOutcome};

// Process runner
pub use super::runner::{scoped_args, CommandRunner, GitCommandRunner, GIT_DIR_ARG, WORK_TREE_ARG};
