//! Exclusion rule evaluation using whole path segments
//!
//! A pattern never matches by substring: excluding `vendor` prunes
//! `project/vendor/lib` but leaves `project/vendor-tools` alone.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::config::DEFAULT_SKIP_PATTERNS;

/// Immutable, shared set of exclusion patterns
///
/// Built once from configuration; cloning only bumps a reference count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkipRules {
    patterns: Arc<[String]>,
}

impl SkipRules {
    /// Flattens configured patterns into a rule set
    ///
    /// Defaults come first when enabled. Patterns are whitespace-trimmed,
    /// empty ones dropped and duplicates removed, keeping the first occurrence.
    pub fn new<S: AsRef<str>>(patterns: &[S], use_defaults: bool) -> Self {
        let mut flattened: Vec<String> =
            Vec::with_capacity(patterns.len() + DEFAULT_SKIP_PATTERNS.len());
        let mut push = |pattern: &str| {
            let pattern = pattern.trim();
            if !pattern.is_empty() && !flattened.iter().any(|p| p == pattern) {
                flattened.push(pattern.to_string());
            }
        };

        if use_defaults {
            DEFAULT_SKIP_PATTERNS.iter().for_each(|p| push(p));
        }
        patterns.iter().for_each(|p| push(p.as_ref()));

        Self {
            patterns: flattened.into(),
        }
    }

    /// A rule set that never skips anything
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True iff any rule matches the path
    pub fn should_skip(&self, path: &Path) -> bool {
        should_skip_path(path, &self.patterns)
    }
}

/// True iff any pattern in `rules` matches `path`
pub fn should_skip_path<S: AsRef<str>>(path: &Path, rules: &[S]) -> bool {
    if rules.is_empty() {
        return false;
    }
    let cleaned = clean_path(path);
    rules
        .iter()
        .any(|rule| matches_cleaned(&cleaned, rule.as_ref()))
}

/// Checks a single pattern against a path
///
/// Matches when, after lexical normalization of the path, the pattern equals
/// one full segment, the whole path, or the final segment. Case-sensitive.
/// An empty pattern never matches.
pub fn matches_skip_pattern(path: &Path, pattern: &str) -> bool {
    matches_cleaned(&clean_path(path), pattern)
}

fn matches_cleaned(cleaned: &Path, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let pattern = OsStr::new(pattern);

    let segment_match = cleaned.components().any(|component| match component {
        Component::Normal(segment) => segment == pattern,
        Component::ParentDir | Component::CurDir => component.as_os_str() == pattern,
        Component::RootDir | Component::Prefix(_) => false,
    });

    segment_match || cleaned.as_os_str() == pattern || cleaned.file_name() == Some(pattern)
}

/// Lexically normalizes a path without touching the filesystem
///
/// Drops `.` segments and redundant separators, folds `name/..` pairs, and
/// discards `..` directly under the root. Leading `..` of a relative path are
/// kept. An empty result becomes `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
