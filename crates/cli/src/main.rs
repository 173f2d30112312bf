//! Memory Bank hook — the main entry point.
//!
//! Commands:
//! - `session-start` — print the SessionStart envelope (default, what the host runs)
//! - `doctor`        — show what would be injected for a project
//!
//! The hook never fails from the host's point of view: every path exits 0,
//! and stdout carries nothing but the envelope. Logs go to stderr.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use membank_config::HookConfig;
use std::process::ExitCode;

mod commands;

use commands::Overrides;

#[derive(Parser, Default)]
#[command(
    name = "memory-bank-hook",
    about = "Memory Bank — SessionStart context injection",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: Overrides,

    /// Enable verbose logging (stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Default)]
enum Commands {
    /// Emit Memory Bank context for a starting session
    #[default]
    SessionStart,

    /// Diagnose the Memory Bank of a project
    Doctor {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse arguments. Bad arguments fall back to the default hook run.
fn parse_cli() -> (Cli, Option<clap::Error>) {
    match Cli::try_parse() {
        Ok(cli) => (cli, None),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => (Cli::default(), Some(e)),
    }
}

fn main() -> ExitCode {
    let (cli, parse_error) = parse_cli();

    // Initialize tracing
    let verbose = cli.verbose || HookConfig::debug_requested(|key| std::env::var_os(key));
    let filter = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Some(e) = parse_error {
        tracing::warn!(kind = ?e.kind(), "Ignoring invalid arguments");
    }

    let result = match cli.command.unwrap_or_default() {
        Commands::SessionStart => commands::session_start::run(&cli.overrides),
        Commands::Doctor { json } => commands::doctor::run(&cli.overrides, json),
    };

    if let Err(e) = result {
        tracing::warn!(error = %e, "Memory Bank hook finished with an error");
    }

    ExitCode::SUCCESS
}
