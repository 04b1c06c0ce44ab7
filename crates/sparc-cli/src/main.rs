//! # sparc-validate entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! With no subcommand, runs `validate` with its defaults.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sparc_cli::tree::{run_tree, TreeArgs};
use sparc_cli::validate::{run_validate, ValidateArgs};

/// Validates SPARC research-swarm artifacts against their JSON schemas and
/// checks project directory conventions.
#[derive(Parser, Debug)]
#[command(name = "sparc-validate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate all artifacts and the project structure.
    Validate(ValidateArgs),

    /// Print a directory tree.
    Tree(TreeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "sparc-validate starting");

    let result = match cli.command {
        Some(Commands::Validate(args)) => run_validate(&args),
        Some(Commands::Tree(args)) => run_tree(&args),
        None => run_validate(&ValidateArgs::default()),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
