//! # lcr CLI entry point
//!
//! Parses command-line arguments, loads the optional config file,
//! initializes tracing, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lcr_cli::config::{self, LogFormat};
use lcr_cli::replay::{run_check, run_replay, CheckArgs, ReplayArgs};

/// Lifecycle event reconciler.
///
/// Replays scripted, out-of-order lifecycle events through the
/// reconciliation engine and prints what each drain returns.
#[derive(Parser, Debug)]
#[command(name = "lcr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario and print every drain result.
    Replay(ReplayArgs),

    /// Parse a scenario and print a summary without running it.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = config::load(cli.config.as_deref());
    let log_format = loaded
        .as_ref()
        .map(|c| c.log_format)
        .unwrap_or_default();
    init_tracing(cli.verbose, log_format);

    tracing::debug!("lcr starting");

    let result = loaded
        .map_err(anyhow::Error::from)
        .and_then(|config| match &cli.command {
            Commands::Replay(args) => run_replay(args, &config),
            Commands::Check(args) => run_check(args),
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Verbosity flags pick the level; without them `RUST_LOG` applies, then `warn`.
fn env_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
