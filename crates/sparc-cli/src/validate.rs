//! # Validate Subcommand
//!
//! Runs the validation driver over a schema directory and a project root,
//! renders the report to stdout, and maps the outcome to an exit code:
//! `0` pass, `1` errors recorded, `2` fatal.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::driver::run_validation;
use crate::report::{render_json, render_text};

/// Report format written to stdout.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// The full run report as pretty JSON.
    Json,
}

/// Arguments for the `sparc-validate validate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Directory holding the `*.json` schemas.
    #[arg(long, default_value = "schemas")]
    pub schemas_dir: PathBuf,

    /// Project root containing the `P-XXX` directories.
    #[arg(long, default_value = "project")]
    pub project_dir: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Default for ValidateArgs {
    fn default() -> Self {
        Self {
            schemas_dir: PathBuf::from("schemas"),
            project_dir: PathBuf::from("project"),
            format: OutputFormat::Text,
        }
    }
}

/// Execute the validate subcommand, writing the report to stdout.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validate_to(args, &mut out)
}

/// Execute the validate subcommand, writing the report to `out`.
///
/// Returns exit code: 0 on success, 1 on validation failure, 2 on fatal error.
pub fn run_validate_to(args: &ValidateArgs, out: &mut dyn Write) -> Result<u8> {
    let report = match run_validation(&args.schemas_dir, &args.project_dir) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "validation aborted");
            writeln!(out, "FATAL: {e}").context("failed to write report")?;
            return Ok(2);
        }
    };

    match args.format {
        OutputFormat::Text => render_text(&report, out),
        OutputFormat::Json => render_json(&report, out),
    }
    .context("failed to write report")?;

    Ok(report.summary.exit_code())
}
