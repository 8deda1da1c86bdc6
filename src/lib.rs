//! # got
//!
//! `got` runs `git pull`, `git fetch` or `git status` against one repository,
//! or against every repository found under a directory tree. It powers the
//! `got` CLI tool.
//!
//! ## Core Features
//!
//! - **Exact skip rules**: exclusion patterns match whole path segments, so
//!   `vendor` never prunes `vendor-tools`.
//! - **Repository-aware walk**: operations run on repository roots only and
//!   never descend into a repository's internals.
//! - **Failure isolation**: a failing repository is reported once and the walk
//!   moves on; only cancellation stops it.
//! - **Live progress**: a throttled progress line with a smoothed ETA that
//!   per-repository messages never corrupt.
//!
//! ## Example
//!
//! ```rust,no_run
//! use got::core::{CancelToken, ConsoleReporter, SkipRules, Walker};
//! use got::git::{Executor, Operation};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let executor = Executor::with_git(Arc::new(ConsoleReporter));
//!     let walker = Walker::new(executor, SkipRules::new(&["target"], true));
//!     let summary = walker
//!         .walk(&CancelToken::never(), Path::new("/home/me/src"), Operation::Fetch)
//!         .await;
//!     println!("{summary:?}");
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
