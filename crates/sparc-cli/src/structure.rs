//! # Structure Checker
//!
//! Verifies the project directory conventions, independent of schema
//! content. Only the project identifier format is load-bearing (other
//! tooling builds paths from it), so an invalid ID is an error. Missing
//! subdirectories are warnings and never fail the run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use sparc_core::{ProjectId, SectionId};

/// Subdirectories every project must have.
pub const BASE_REQUIRED_DIRS: &[&str] = &["control", "control/planning", "sections"];

/// Additional subdirectories required once a project has SPARC sections.
pub const SPARC_REQUIRED_DIRS: &[&str] = &[
    "control/synthesis",
    "control/validation",
    "evidence",
    "evidence/domain",
    "evidence/technology",
    "evidence/security",
    "evidence/requirements",
    "evidence/operations",
];

/// Required subdirectories for a project, base set first.
pub fn required_dirs(has_sparc_sections: bool) -> Vec<&'static str> {
    let mut dirs = BASE_REQUIRED_DIRS.to_vec();
    if has_sparc_sections {
        dirs.extend_from_slice(SPARC_REQUIRED_DIRS);
    }
    dirs
}

/// Findings for one well-formed project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFinding {
    /// The project identifier.
    pub project_id: ProjectId,
    /// SPARC sections found under `sections/`, sorted.
    pub sparc_sections: Vec<SectionId>,
    /// Required subdirectories absent on disk, in requirement order.
    pub missing_dirs: Vec<String>,
}

impl ProjectFinding {
    /// Whether the project has SPARC sections.
    pub fn is_sparc(&self) -> bool {
        !self.sparc_sections.is_empty()
    }
}

/// A project candidate whose name failed the format check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidProject {
    /// Directory name as found.
    pub name: String,
    /// Format error message.
    pub error: String,
}

/// Structural findings for a whole project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    /// Well-formed projects, sorted by ID.
    pub projects: Vec<ProjectFinding>,
    /// Candidates with invalid IDs, sorted by name. Each is one error.
    pub invalid_projects: Vec<InvalidProject>,
}

impl StructureReport {
    /// Structural error count: one per invalid project ID.
    pub fn error_count(&self) -> usize {
        self.invalid_projects.len()
    }

    /// Advisory warning count: one per missing directory.
    pub fn warning_count(&self) -> usize {
        self.projects.iter().map(|p| p.missing_dirs.len()).sum()
    }

    /// True when the root holds no project candidates at all.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.invalid_projects.is_empty()
    }
}

/// Check every project directory directly under `project_root`.
///
/// # Errors
///
/// Returns the I/O error if `project_root` itself cannot be listed.
/// Failures deeper in the tree are logged and do not abort the check.
pub fn check_structure(project_root: &Path) -> std::io::Result<StructureReport> {
    let mut report = StructureReport::default();

    for (name, path) in list_dirs(project_root)? {
        if !ProjectId::is_candidate(&name) {
            continue;
        }
        match ProjectId::new(name.as_str()) {
            Ok(project_id) => {
                tracing::info!(project = %project_id, "validating project structure");
                report.projects.push(check_project(project_id, &path));
            }
            Err(e) => {
                tracing::error!(project = %name, error = %e, "invalid project directory");
                report.invalid_projects.push(InvalidProject {
                    name,
                    error: e.to_string(),
                });
            }
        }
    }

    if report.is_empty() {
        tracing::warn!(root = %project_root.display(), "no project directories found");
    }
    Ok(report)
}

fn check_project(project_id: ProjectId, project_dir: &Path) -> ProjectFinding {
    let sections_dir = project_dir.join("sections");
    let sparc_sections: Vec<SectionId> = if sections_dir.is_dir() {
        match list_dirs(&sections_dir) {
            Ok(dirs) => dirs
                .into_iter()
                .filter_map(|(name, _)| SectionId::new(name).ok())
                .collect(),
            Err(e) => {
                tracing::warn!(dir = %sections_dir.display(), error = %e, "cannot list sections");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    if !sparc_sections.is_empty() {
        tracing::info!(
            project = %project_id,
            sections = sparc_sections.len(),
            "found SPARC autonomous development project"
        );
    }

    let missing_dirs: Vec<String> = required_dirs(!sparc_sections.is_empty())
        .into_iter()
        .filter(|rel| !project_dir.join(rel).is_dir())
        .map(|rel| {
            tracing::warn!(project = %project_id, dir = rel, "missing directory");
            rel.to_string()
        })
        .collect();

    ProjectFinding {
        project_id,
        sparc_sections,
        missing_dirs,
    }
}

/// Immediate subdirectories of `dir` with UTF-8 names, sorted by name.
fn list_dirs(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            dirs.push((name.to_string(), path));
        }
    }
    dirs.sort();
    Ok(dirs)
}
