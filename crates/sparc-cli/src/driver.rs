//! # Validation Driver
//!
//! One read-only pass over a project tree:
//!
//! 1. Load the schema registry and compile the validator set (fatal if no
//!    schema loads).
//! 2. Check directory conventions (fatal if the project root cannot be
//!    listed).
//! 3. Locate artifacts by glob rule, then parse, classify, and validate
//!    each one against the role its classification selects.
//! 4. Fold everything into a [`RunReport`].
//!
//! Per-artifact failures are isolated: one bad file never stops the rest.

use std::path::{Path, PathBuf};

use thiserror::Error;

use sparc_core::{classify, ArtifactVariant};
use sparc_schema::{load_artifact, SchemaRegistry, SchemaRegistryError, ValidatorSet};

use crate::locator::{ArtifactLocator, GlobRule, GLOB_RULES};
use crate::report::{ArtifactResult, RuleResults, RunReport, RunSummary};
use crate::structure::check_structure;

/// Conditions that abort a run before any summary exists.
#[derive(Error, Debug)]
pub enum RunError {
    /// Schema directory unreadable or empty.
    #[error(transparent)]
    Schema(#[from] SchemaRegistryError),

    /// The project root could not be listed.
    #[error("cannot read project directory '{}': {reason}", .path.display())]
    ProjectRootUnreadable {
        /// The project root.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// A glob-rule pattern did not compile.
    #[error("invalid artifact pattern: {0}")]
    GlobRule(#[from] globset::Error),
}

/// Validates located artifacts against a prebuilt validator set.
#[derive(Debug)]
pub struct ValidationDriver<'a> {
    validators: &'a ValidatorSet,
    locator: ArtifactLocator<'a>,
}

impl<'a> ValidationDriver<'a> {
    /// Create a driver over `validators` routing by `rules`.
    ///
    /// # Errors
    ///
    /// [`RunError::GlobRule`] if a rule pattern is not a valid glob.
    pub fn new(validators: &'a ValidatorSet, rules: &'a [GlobRule]) -> Result<Self, RunError> {
        Ok(Self {
            validators,
            locator: ArtifactLocator::new(rules)?,
        })
    }

    /// Parse, classify, and validate one artifact.
    pub fn validate_artifact(&self, rule: &GlobRule, path: &Path) -> ArtifactResult {
        let document = match load_artifact(path) {
            Ok(document) => document,
            Err(failure) => {
                tracing::error!(path = %path.display(), error = %failure, "artifact did not load");
                return ArtifactResult {
                    path: path.to_path_buf(),
                    classification: None,
                    variant: ArtifactVariant::Standard,
                    role: rule.standard,
                    failure: Some(failure),
                };
            }
        };

        let classification = classify(&document);
        let variant = classification.variant();
        let role = rule.role_for(variant);
        tracing::debug!(
            path = %path.display(),
            %variant,
            %role,
            markers = ?classification.markers(),
            "classified artifact"
        );

        let failure = self.validators.validate(role, &document).err();
        if let Some(failure) = &failure {
            tracing::error!(path = %path.display(), %role, error = %failure, "validation failed");
        }

        ArtifactResult {
            path: path.to_path_buf(),
            classification: Some(classification),
            variant,
            role,
            failure,
        }
    }

    /// Locate and validate every artifact under `project_root`, recording
    /// each into `summary`. Rules with no matches are omitted.
    pub fn validate_tree(&self, project_root: &Path, summary: &mut RunSummary) -> Vec<RuleResults> {
        let mut results = Vec::new();
        for matches in self.locator.locate(project_root) {
            if matches.paths.is_empty() {
                continue;
            }
            tracing::info!(pattern = matches.rule.pattern, files = matches.paths.len(), "validating files");

            let artifacts: Vec<ArtifactResult> = matches
                .paths
                .iter()
                .map(|path| self.validate_artifact(matches.rule, path))
                .collect();
            for artifact in &artifacts {
                summary.record_artifact(artifact);
            }
            results.push(RuleResults {
                pattern: matches.rule.pattern.to_string(),
                artifacts,
            });
        }
        results
    }
}

/// Run a full validation pass with the workflow's glob-rule table.
///
/// # Errors
///
/// Only the fatal conditions of [`RunError`]. Every per-artifact and
/// structural problem is recorded in the returned report instead.
pub fn run_validation(schema_dir: &Path, project_root: &Path) -> Result<RunReport, RunError> {
    let registry = SchemaRegistry::load(schema_dir)?;
    let validators = ValidatorSet::from_registry(&registry);
    tracing::info!(
        schemas = registry.schema_count(),
        validators = validators.len(),
        "loaded schema registry"
    );

    let structure =
        check_structure(project_root).map_err(|e| RunError::ProjectRootUnreadable {
            path: project_root.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut summary = RunSummary::default();
    summary.record_structural(structure.error_count());

    let driver = ValidationDriver::new(&validators, GLOB_RULES)?;
    let rules = driver.validate_tree(project_root, &mut summary);

    tracing::info!(
        total_files = summary.total_files,
        total_errors = summary.total_errors,
        "validation pass complete"
    );

    Ok(RunReport {
        schema_dir: schema_dir.to_path_buf(),
        project_root: project_root.to_path_buf(),
        schemas_loaded: registry.schema_names().into_iter().map(str::to_string).collect(),
        schemas_skipped: registry.skipped().to_vec(),
        available_roles: validators.available_roles(),
        unavailable_roles: validators.unavailable_roles(),
        structure,
        rules,
        summary,
    })
}
