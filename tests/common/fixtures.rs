//! Directory tree fixtures

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree with automatic cleanup
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Root of the tree
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the tree
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn create_dir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Creates `rel` as a repository root by giving it a `.git` directory
    pub fn create_repo(&self, rel: &str) -> Result<PathBuf> {
        let path = self.create_dir(rel)?;
        std::fs::create_dir_all(path.join(".git").join("objects"))?;
        Ok(path)
    }

    pub fn create_file(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Builder for directory trees mixing plain directories and repositories
#[derive(Default)]
pub struct TestTreeBuilder {
    dirs: Vec<String>,
    repos: Vec<String>,
    files: Vec<(String, String)>,
}

impl TestTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, rel: &str) -> Self {
        self.dirs.push(rel.to_string());
        self
    }

    pub fn repo(mut self, rel: &str) -> Self {
        self.repos.push(rel.to_string());
        self
    }

    pub fn file(mut self, rel: &str, content: &str) -> Self {
        self.files.push((rel.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> Result<TestTree> {
        let tree = TestTree::new()?;
        for dir in &self.dirs {
            tree.create_dir(dir)?;
        }
        for repo in &self.repos {
            tree.create_repo(repo)?;
        }
        for (rel, content) in &self.files {
            tree.create_file(rel, content)?;
        }
        Ok(tree)
    }
}
