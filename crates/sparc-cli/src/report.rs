//! # Run Report
//!
//! Per-artifact results, the aggregate [`RunSummary`], and the text and
//! JSON renderings written to stdout. The exit code is derived from the
//! summary alone.

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use sparc_core::{ArtifactVariant, Classification};
use sparc_schema::{ArtifactFailure, SkippedSchema, UnavailableRole, ValidatorRole};

use crate::structure::StructureReport;

/// Outcome for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactResult {
    /// Artifact path as located.
    pub path: PathBuf,
    /// Top-level classification; `None` when the file did not parse.
    pub classification: Option<Classification>,
    /// Validator family the artifact was counted under.
    pub variant: ArtifactVariant,
    /// Role the artifact was (or would have been) validated against.
    pub role: ValidatorRole,
    /// `None` on pass.
    pub failure: Option<ArtifactFailure>,
}

impl ArtifactResult {
    /// Whether the artifact passed.
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Results for every artifact matched by one glob rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResults {
    /// The rule's filename pattern.
    pub pattern: String,
    /// Results in path order.
    pub artifacts: Vec<ArtifactResult>,
}

/// Aggregate counters for one run.
///
/// Invariants: `total_files == standard_files + specialized_files` and
/// `total_errors >= structural_errors`. Only the driver records into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Artifacts processed.
    pub total_files: usize,
    /// Artifacts routed to a standard role.
    pub standard_files: usize,
    /// Artifacts routed to a specialized role.
    pub specialized_files: usize,
    /// Structural plus per-artifact errors.
    pub total_errors: usize,
    /// Invalid project IDs.
    pub structural_errors: usize,
}

impl RunSummary {
    pub(crate) fn record_structural(&mut self, errors: usize) {
        self.structural_errors += errors;
        self.total_errors += errors;
    }

    pub(crate) fn record_artifact(&mut self, result: &ArtifactResult) {
        self.total_files += 1;
        match result.variant {
            ArtifactVariant::Standard => self.standard_files += 1,
            ArtifactVariant::Specialized => self.specialized_files += 1,
        }
        if !result.passed() {
            self.total_errors += 1;
        }
    }

    /// Whether the run passed: no errors of any kind.
    pub fn passed(&self) -> bool {
        self.total_errors == 0
    }

    /// Process exit code: `0` on pass, `1` otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Everything one run observed.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Schema directory used.
    pub schema_dir: PathBuf,
    /// Project root walked.
    pub project_root: PathBuf,
    /// Schema filenames loaded, sorted.
    pub schemas_loaded: Vec<String>,
    /// Schema files that failed to load.
    pub schemas_skipped: Vec<SkippedSchema>,
    /// Roles with a compiled validator.
    pub available_roles: Vec<ValidatorRole>,
    /// Roles without a validator.
    pub unavailable_roles: Vec<UnavailableRole>,
    /// Directory-convention findings.
    pub structure: StructureReport,
    /// Per-rule artifact results, in rule-table order, rules with no
    /// matches omitted.
    pub rules: Vec<RuleResults>,
    /// Final counters.
    pub summary: RunSummary,
}

impl RunReport {
    /// Every failed artifact, in report order.
    pub fn failures(&self) -> impl Iterator<Item = &ArtifactResult> {
        self.rules
            .iter()
            .flat_map(|r| r.artifacts.iter())
            .filter(|a| !a.passed())
    }
}

/// Write the human-readable report.
pub fn render_text(report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Loading schemas from {}", report.schema_dir.display())?;
    for name in &report.schemas_loaded {
        writeln!(out, "  loaded: {name}")?;
    }
    for skipped in &report.schemas_skipped {
        writeln!(out, "  SKIP: {} — {}", skipped.filename, skipped.reason)?;
    }
    writeln!(out, "Created {} validators", report.available_roles.len())?;
    for unavailable in &report.unavailable_roles {
        writeln!(out, "  unavailable: {} — {}", unavailable.role, unavailable.reason)?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "Validating project structure in {}",
        report.project_root.display()
    )?;
    render_structure(&report.structure, out)?;
    writeln!(out)?;

    for rule in &report.rules {
        writeln!(out, "Validating {} files...", rule.pattern)?;
        for artifact in &rule.artifacts {
            render_artifact(artifact, out)?;
        }
        writeln!(out)?;
    }

    let s = &report.summary;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "VALIDATION SUMMARY")?;
    writeln!(out, "Total files validated: {}", s.total_files)?;
    writeln!(out, "Standard research files: {}", s.standard_files)?;
    writeln!(out, "SPARC autonomous files: {}", s.specialized_files)?;
    writeln!(out, "Structural errors: {}", s.structural_errors)?;
    writeln!(out, "Total errors: {}", s.total_errors)?;
    if s.passed() {
        writeln!(out, "PASSED: all validations passed")?;
    } else {
        writeln!(out, "FAILED: {} error(s)", s.total_errors)?;
    }
    Ok(())
}

fn render_structure(structure: &StructureReport, out: &mut dyn Write) -> io::Result<()> {
    if structure.is_empty() {
        writeln!(
            out,
            "  WARN: no project directories found (should match pattern P-XXX)"
        )?;
        return Ok(());
    }
    for invalid in &structure.invalid_projects {
        writeln!(out, "  ERROR: {}", invalid.error)?;
    }
    for project in &structure.projects {
        if project.is_sparc() {
            writeln!(
                out,
                "  {}: SPARC autonomous development project ({} specialized section(s))",
                project.project_id,
                project.sparc_sections.len()
            )?;
        } else {
            writeln!(out, "  {}: research project", project.project_id)?;
        }
        if project.missing_dirs.is_empty() {
            writeln!(out, "    ok")?;
        }
        for missing in &project.missing_dirs {
            writeln!(out, "    WARN: missing directory: {missing}")?;
        }
    }
    Ok(())
}

fn render_artifact(artifact: &ArtifactResult, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "  {:<7} {} ({})",
        format!("[{}]", artifact.variant.tag()),
        artifact.path.display(),
        artifact.role
    )?;
    let Some(failure) = &artifact.failure else {
        return writeln!(out, "    Valid");
    };
    writeln!(out, "    FAIL: {failure}")?;
    if let ArtifactFailure::SchemaViolation { violations, .. } = failure {
        for violation in violations {
            writeln!(out, "      {violation}")?;
        }
    }
    Ok(())
}

/// Write the report as pretty-printed JSON.
pub fn render_json(report: &RunReport, out: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).map_err(io::Error::from)?;
    writeln!(out)
}
