//! got: run git pull, fetch or status on one repository, or on every
//! repository under a directory tree.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use got::commands::{handle_repo_command, RepoOptions};
use got::core::{
    set_terminal_title, set_terminal_title_and_flush, CancelHandle, INTERRUPT_MESSAGE,
    LOG_FILTER_ENV,
};
use got::git::Operation;

const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "debug";

fn build_cli() -> ClapCommand {
    let directory = Arg::new("directory")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Directory containing the repository (or repositories with -r)");

    let operation = |op: Operation, about: &'static str| {
        ClapCommand::new(op.name())
            .about(about)
            .arg(directory.clone())
    };

    ClapCommand::new("got")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run git pull, fetch or status across repositories")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .global(true)
                .help("Walk the directory tree and operate on every repository found")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file (defaults to ~/.got.toml)"),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .global(true)
                .help("Disable the progress line during recursive walks")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .help("Enable debug logging on stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(operation(Operation::Pull, "Run git pull"))
        .subcommand(operation(Operation::Fetch, "Run git fetch"))
        .subcommand(operation(Operation::Status, "Run git status"))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn repo_options(matches: &ArgMatches) -> RepoOptions {
    RepoOptions {
        directory: matches
            .get_one::<PathBuf>("directory")
            .cloned()
            .unwrap_or_default(),
        recursive: matches.get_flag("recursive"),
        show_progress: !matches.get_flag("no-progress"),
        config_path: matches.get_one::<PathBuf>("config").cloned(),
    }
}

/// Cancels `handle` on the first SIGINT or SIGTERM
fn spawn_signal_handler(handle: CancelHandle) {
    tokio::spawn(async move {
        wait_for_shutdown().await;
        println!();
        println!("{INTERRUPT_MESSAGE}");
        handle.cancel();
    });
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "unable to listen for interrupt");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            warn!(error = %e, "unable to listen for SIGTERM");
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() {
    ctrl_c().await;
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let Some((name, sub_matches)) = matches.subcommand() else {
        build_cli().print_help()?;
        return Ok(());
    };
    init_logging(sub_matches.get_flag("verbose"));

    let operation: Operation = name.parse().map_err(anyhow::Error::msg)?;
    let options = repo_options(sub_matches);

    // Set terminal title to indicate got is running
    set_terminal_title("🚀 got");

    let cancel = CancelHandle::new();
    spawn_signal_handler(cancel.clone());

    let result = handle_repo_command(operation, &options, &cancel.token()).await;

    // Set terminal title to green checkbox to indicate completion
    set_terminal_title_and_flush("✅ got");

    if result?.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
