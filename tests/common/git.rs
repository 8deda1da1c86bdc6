//! Git testing utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs git in `dir` and returns its stdout, failing on a non-zero exit
fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Initializes a repository with a local identity and unsigned commits
pub fn setup_git_repo(path: &Path) -> Result<()> {
    git(path, &["init", "--quiet"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Writes `file_name` and commits it
pub fn create_test_commit(path: &Path, file_name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;
    git(path, &["add", file_name])?;
    git(path, &["commit", "--quiet", "-m", message])?;
    Ok(())
}

/// Creates `count` committed repositories named `test-repo-N` under `parent_dir`
pub fn create_multiple_repos(parent_dir: &Path, count: usize) -> Result<Vec<PathBuf>> {
    (1..=count)
        .map(|i| -> Result<PathBuf> {
            let repo_path = parent_dir.join(format!("test-repo-{i}"));
            std::fs::create_dir_all(&repo_path)?;
            setup_git_repo(&repo_path)?;
            create_test_commit(&repo_path, "README.md", &format!("# Repo {i}"), "Initial commit")?;
            Ok(repo_path)
        })
        .collect()
}

/// Clones `source` into `dest` so `dest` has a working upstream
pub fn clone_repo(source: &Path, dest: &Path) -> Result<()> {
    let parent = dest.parent().context("clone destination has no parent")?;
    let source = source.to_string_lossy();
    let dest = dest.to_string_lossy();
    git(parent, &["clone", "--quiet", &source, &dest])?;
    Ok(())
}

/// Creates `upstream` with one commit and a `local` clone of it under `parent`
pub fn clone_repo_pair(parent: &Path) -> Result<(PathBuf, PathBuf)> {
    let upstream = parent.join("upstream");
    std::fs::create_dir_all(&upstream)?;
    setup_git_repo(&upstream)?;
    create_test_commit(&upstream, "README.md", "base", "Initial commit")?;

    let local = parent.join("local");
    clone_repo(&upstream, &local)?;
    Ok((upstream, local))
}

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
