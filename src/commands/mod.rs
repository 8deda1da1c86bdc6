//! Command handlers invoked by the `got` binary

pub mod repo;

pub use repo::{handle_repo_command, run_repo_command, CommandOutcome, RepoOptions};
