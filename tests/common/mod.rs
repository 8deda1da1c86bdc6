//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;

pub use self::fixtures::{TestTree, TestTreeBuilder};
pub use self::git::{
    clone_repo_pair, create_multiple_repos, create_test_commit, is_git_available, setup_git_repo,
};

use got::core::{SkipRules, Walker};
use got::git::Executor;
use got::testing::{MockCommandRunner, RecordingReporter};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

static TEST_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Acquires a global lock for tests that modify process-wide state (like env vars)
pub fn lock_test() -> MutexGuard<'static, ()> {
    TEST_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Fake runner and recording reporter wired into one executor
pub struct MockHarness {
    pub runner: Arc<MockCommandRunner>,
    pub reporter: Arc<RecordingReporter>,
}

impl MockHarness {
    pub fn new() -> Self {
        Self {
            runner: Arc::new(MockCommandRunner::new()),
            reporter: Arc::new(RecordingReporter::new()),
        }
    }

    pub fn executor(&self) -> Executor {
        Executor::new(self.runner.clone(), self.reporter.clone())
    }

    /// Walker without a progress line
    pub fn walker(&self, rules: SkipRules) -> Walker {
        Walker::new(self.executor(), rules)
    }
}
