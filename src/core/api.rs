//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - The two-pass repository walk
//! - Skip rule matching
//! - Progress tracking and event reporting
//! - Configuration and cancellation
//!
//! Internal implementation details are not exposed through this API.

// Walk
pub use super::walker::{count_directories, WalkSession, Walker};
pub use super::stats::TraversalSummary;

// Skip rules
pub use super::matcher::{clean_path, matches_skip_pattern, should_skip_path, SkipRules};

// Progress and events
pub use super::progress::{estimate_eta, render_line, ProgressSnapshot, ProgressTracker, Spinner};
pub use super::report::{ConsoleReporter, Reporter};

// Errors and cancellation
pub use super::cancel::{CancelHandle, CancelToken};
pub use super::error::{Result, WalkError};

// Configuration
pub use super::config::{default_config_path, GotConfig};
pub use super::config::{
    CONFIG_FILE_NAME, DEFAULT_SKIP_PATTERNS, LOG_FILTER_ENV, SKIP_LIST_ENV, USE_DEFAULT_SKIPS_ENV,
};

// User-facing messages
pub use super::config::{INTERRUPT_MESSAGE, SCANNING_MESSAGE};

// Terminal utilities (re-exported from utils)
pub use crate::utils::{set_terminal_title, set_terminal_title_and_flush};
