//! # sparc-cli — Artifact Gatekeeper for the SPARC Research Swarm
//!
//! Provides the `sparc-validate` command-line interface: validates every
//! workflow JSON artifact under a project tree against its schema, checks
//! the project directory conventions, and exits non-zero on any error.
//!
//! ## Subcommands
//!
//! - `sparc-validate validate` — Full validation pass (the default when no
//!   subcommand is given).
//! - `sparc-validate tree` — Directory listing for inspecting a project.
//!
//! ## Exit Codes
//!
//! The exit code is the machine-readable contract consumed by pipeline
//! gates:
//!
//! ```bash
//! sparc-validate                               # 0 pass, 1 errors, 2 fatal
//! sparc-validate validate --project-dir project --format json
//! sparc-validate tree project/P-001
//! ```

pub mod driver;
pub mod locator;
pub mod report;
pub mod structure;
pub mod tree;
pub mod validate;

pub use driver::{run_validation, RunError, ValidationDriver};
pub use locator::{ArtifactLocator, GlobRule, RuleMatches, GLOB_RULES};
pub use report::{render_json, render_text, ArtifactResult, RuleResults, RunReport, RunSummary};
pub use structure::{check_structure, InvalidProject, ProjectFinding, StructureReport};
