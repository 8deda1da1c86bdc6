//! Counters accumulated during one recursive walk

/// Result counts of one walk
///
/// Every directory visited in the execute pass lands in exactly one of
/// `repositories`, `skipped` or `non_repositories`, so their sum is `scanned`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Directories visited in the execute pass (repository internals excluded)
    pub scanned: usize,
    /// Repository roots the operation was invoked on
    pub repositories: usize,
    /// Directories pruned by an exclusion rule
    pub skipped: usize,
    /// Directories that were neither skipped nor repository roots
    pub non_repositories: usize,
    /// Repository operations that reported a failure
    pub failed: usize,
}

impl TraversalSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_repository(&mut self) {
        self.scanned += 1;
        self.repositories += 1;
    }

    pub fn record_skipped(&mut self) {
        self.scanned += 1;
        self.skipped += 1;
    }

    pub fn record_non_repository(&mut self) {
        self.scanned += 1;
        self.non_repositories += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn found_repositories(&self) -> bool {
        self.repositories > 0
    }

    /// Single closing line of a walk
    ///
    /// `✅ Completed recursive operation on 3 git repositories (scanned 12 directories, skipped 1)`
    /// or `ℹ️  No git repositories found (scanned 4 directories)`.
    pub fn summary_line(&self) -> String {
        let mut summary = if self.found_repositories() {
            let repo_word = if self.repositories == 1 {
                "repository"
            } else {
                "repositories"
            };
            format!(
                "✅ Completed recursive operation on {} git {} (scanned {} directories",
                self.repositories, repo_word, self.scanned
            )
        } else {
            format!(
                "ℹ️  No git repositories found (scanned {} directories",
                self.scanned
            )
        };

        if self.skipped > 0 {
            summary.push_str(&format!(", skipped {}", self.skipped));
        }
        if self.failed > 0 {
            summary.push_str(&format!(", {} failed", self.failed));
        }
        summary.push(')');

        summary
    }
}
