//! # Tree Subcommand
//!
//! Prints a directory listing in the familiar `tree` layout. Directories
//! sort before files, names compare case-insensitively, and symlinked
//! directories are listed but not entered.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the `sparc-validate tree` subcommand.
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Directory to list.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

/// Execute the tree subcommand, writing the listing to stdout.
pub fn run_tree(args: &TreeArgs) -> Result<u8> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_tree(&args.path, &mut out)
        .with_context(|| format!("failed to list {}", args.path.display()))?;
    Ok(0)
}

/// Write the tree rooted at `root`.
///
/// # Errors
///
/// Fails if `root` cannot be resolved or listed. Unreadable subdirectories
/// are logged and shown empty.
pub fn render_tree(root: &Path, out: &mut dyn Write) -> io::Result<()> {
    let resolved = root.canonicalize()?;
    let name = resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string());
    writeln!(out, "{name}/")?;
    let entries = sorted_entries(root)?;
    render_entries(entries, "", out)
}

struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
    is_symlink: bool,
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: path.is_dir(),
            is_symlink,
            path,
        });
    }
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

fn render_entries(entries: Vec<Entry>, prefix: &str, out: &mut dyn Write) -> io::Result<()> {
    let count = entries.len();
    for (i, entry) in entries.into_iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        let suffix = if entry.is_dir { "/" } else { "" };
        writeln!(out, "{prefix}{connector}{}{suffix}", entry.name)?;

        if !entry.is_dir || entry.is_symlink {
            continue;
        }
        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        match sorted_entries(&entry.path) {
            Ok(children) => render_entries(children, &child_prefix, out)?,
            Err(e) => {
                tracing::warn!(dir = %entry.path.display(), error = %e, "cannot list directory");
            }
        }
    }
    Ok(())
}
