//! End-to-end tests against the real git binary

mod common;

use anyhow::Result;
use common::{clone_repo_pair, create_multiple_repos, create_test_commit, is_git_available};
use got::core::{CancelToken, SkipRules, Walker};
use got::git::{Executor, Operation, RunOutcome};
use got::testing::{Event, RecordingReporter};
use std::sync::Arc;
use tempfile::TempDir;

fn git_executor() -> (Executor, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::new());
    (Executor::with_git(reporter.clone()), reporter)
}

#[tokio::test]
async fn test_status_on_clean_repository() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let temp_dir = TempDir::new()?;
    let repos = create_multiple_repos(temp_dir.path(), 1)?;
    let (executor, reporter) = git_executor();

    let outcome = executor
        .run_single(&CancelToken::never(), &repos[0], Operation::Status)
        .await?;

    assert_eq!(outcome, RunOutcome::Succeeded);
    let events = reporter.events();
    assert!(matches!(&events[0], Event::Output(_, output) if output.contains("nothing to commit")));
    assert_eq!(events[1], Event::Success(repos[0].clone()));
    Ok(())
}

#[tokio::test]
async fn test_status_runs_regardless_of_working_directory() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let temp_dir = TempDir::new()?;
    let repos = create_multiple_repos(temp_dir.path(), 1)?;
    std::fs::write(repos[0].join("untracked.txt"), "new")?;
    let (executor, reporter) = git_executor();

    executor
        .run_single(&CancelToken::never(), &repos[0], Operation::Status)
        .await?;

    assert!(matches!(
        &reporter.events()[0],
        Event::Output(_, output) if output.contains("untracked.txt")
    ));
    Ok(())
}

#[tokio::test]
async fn test_recursive_status_across_repositories() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let temp_dir = TempDir::new()?;
    let repos = create_multiple_repos(&temp_dir.path().join("workspace"), 3)?;
    let (executor, reporter) = git_executor();

    let summary = Walker::new(executor, SkipRules::new::<&str>(&[], true))
        .walk(&CancelToken::never(), temp_dir.path(), Operation::Status)
        .await?;

    assert_eq!(summary.repositories, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(reporter.success_paths(), repos);
    Ok(())
}

#[tokio::test]
async fn test_pull_from_clone_succeeds() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let temp_dir = TempDir::new()?;
    let (upstream, local) = clone_repo_pair(temp_dir.path())?;
    create_test_commit(&upstream, "CHANGELOG.md", "v2", "Second commit")?;
    let (executor, reporter) = git_executor();

    let outcome = executor
        .run_single(&CancelToken::never(), &local, Operation::Pull)
        .await?;

    assert_eq!(outcome, RunOutcome::Succeeded, "events: {:?}", reporter.events());
    assert!(local.join("CHANGELOG.md").exists());
    Ok(())
}

#[tokio::test]
async fn test_fetch_from_clone_succeeds() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let temp_dir = TempDir::new()?;
    let (_upstream, local) = clone_repo_pair(temp_dir.path())?;
    let (executor, reporter) = git_executor();

    let outcome = executor
        .run_single(&CancelToken::never(), &local, Operation::Fetch)
        .await?;

    assert_eq!(outcome, RunOutcome::Succeeded);
    assert_eq!(reporter.success_paths(), vec![local]);
    Ok(())
}
