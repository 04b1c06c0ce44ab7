//! # Artifact Validation
//!
//! Compiled validators bound to roles, and the per-artifact failure
//! taxonomy. Every failure here is recorded and the run continues; the
//! fatal cases live in [`crate::registry`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::registry::SchemaRegistry;
use crate::role::ValidatorRole;

/// A single schema violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the offending node in the artifact.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Why a single artifact did not pass. Counted once per artifact.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactFailure {
    /// The file could not be read.
    #[error("cannot read file: {reason}")]
    Unreadable {
        /// Underlying I/O failure.
        reason: String,
    },

    /// The file is not well-formed JSON.
    #[error("invalid JSON: {reason}")]
    MalformedJson {
        /// Parser message, including line and column.
        reason: String,
    },

    /// The role's schema was never loaded or did not compile.
    #[error("no validator available for {role}: {reason}")]
    ValidatorUnavailable {
        /// Requested role.
        role: ValidatorRole,
        /// Why the role has no validator.
        reason: String,
    },

    /// The document does not conform to the role's schema.
    #[error("validation failed against '{schema}' ({} violation(s))", .violations.len())]
    SchemaViolation {
        /// Role validated against.
        role: ValidatorRole,
        /// Schema filename bound to the role.
        schema: String,
        /// Every violation reported by the validator, in reporting order.
        violations: Vec<Violation>,
    },
}

/// Read and parse an artifact.
///
/// # Errors
///
/// [`ArtifactFailure::Unreadable`] or [`ArtifactFailure::MalformedJson`].
pub fn load_artifact(path: &Path) -> Result<Value, ArtifactFailure> {
    let content = std::fs::read_to_string(path).map_err(|e| ArtifactFailure::Unreadable {
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| ArtifactFailure::MalformedJson {
        reason: e.to_string(),
    })
}

/// A role that has no compiled validator this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnavailableRole {
    /// The role.
    pub role: ValidatorRole,
    /// Why it is unavailable.
    pub reason: String,
}

/// One compiled validator per available role.
///
/// Built once per run from a [`SchemaRegistry`] and read-only afterwards.
pub struct ValidatorSet {
    validators: BTreeMap<ValidatorRole, Validator>,
    unavailable: BTreeMap<ValidatorRole, String>,
}

impl ValidatorSet {
    /// Compile a validator for every role whose schema is loaded.
    ///
    /// Roles with no schema file, or whose schema fails to compile, are
    /// recorded as unavailable with the reason.
    pub fn from_registry(registry: &SchemaRegistry) -> Self {
        let mut validators = BTreeMap::new();
        let mut unavailable = BTreeMap::new();

        for &role in ValidatorRole::all() {
            let filename = role.schema_filename();
            if registry.get_schema(filename).is_none() {
                tracing::debug!(%role, schema = filename, "role has no schema");
                unavailable.insert(role, format!("schema '{filename}' not loaded"));
                continue;
            }
            match registry.build_validator(filename) {
                Ok(validator) => {
                    validators.insert(role, validator);
                }
                Err(e) => {
                    tracing::error!(%role, schema = filename, error = %e, "validator did not compile");
                    unavailable.insert(role, e.to_string());
                }
            }
        }

        Self {
            validators,
            unavailable,
        }
    }

    /// Number of compiled validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if no role has a validator.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Whether `role` has a compiled validator.
    pub fn is_available(&self, role: ValidatorRole) -> bool {
        self.validators.contains_key(&role)
    }

    /// Roles with a compiled validator, in declaration order.
    pub fn available_roles(&self) -> Vec<ValidatorRole> {
        self.validators.keys().copied().collect()
    }

    /// Roles without a validator, with reasons, in declaration order.
    pub fn unavailable_roles(&self) -> Vec<UnavailableRole> {
        self.unavailable
            .iter()
            .map(|(&role, reason)| UnavailableRole {
                role,
                reason: reason.clone(),
            })
            .collect()
    }

    /// Validate a parsed document against `role`.
    ///
    /// # Errors
    ///
    /// - [`ArtifactFailure::ValidatorUnavailable`] if the role has no validator.
    /// - [`ArtifactFailure::SchemaViolation`] with every violation if the
    ///   document does not conform.
    pub fn validate(&self, role: ValidatorRole, document: &Value) -> Result<(), ArtifactFailure> {
        let Some(validator) = self.validators.get(&role) else {
            let reason = self
                .unavailable
                .get(&role)
                .cloned()
                .unwrap_or_else(|| format!("schema '{}' not loaded", role.schema_filename()));
            return Err(ArtifactFailure::ValidatorUnavailable { role, reason });
        };

        let violations: Vec<Violation> = validator
            .iter_errors(document)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ArtifactFailure::SchemaViolation {
                role,
                schema: role.schema_filename().to_string(),
                violations,
            })
        }
    }
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorSet")
            .field("available", &self.available_roles())
            .field("unavailable", &self.unavailable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry_with(schemas: &[(&str, Value)]) -> (tempfile::TempDir, SchemaRegistry) {
        let dir = tempfile::tempdir().unwrap();
        for (name, value) in schemas {
            std::fs::write(dir.path().join(name), value.to_string()).unwrap();
        }
        let registry = SchemaRegistry::load(dir.path()).unwrap();
        (dir, registry)
    }

    fn state_schema() -> Value {
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["section_id", "status"],
            "properties": {
                "section_id": { "type": "string" },
                "status": { "enum": ["draft", "review", "final"] }
            }
        })
    }

    #[test]
    fn builds_validators_only_for_present_roles() {
        let (_dir, registry) = registry_with(&[
            ("section_state.schema.json", state_schema()),
            ("claims.schema.json", json!({"type": "object"})),
            ("unrelated.schema.json", json!({})),
        ]);
        let set = ValidatorSet::from_registry(&registry);

        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(
            set.available_roles(),
            vec![ValidatorRole::State, ValidatorRole::Claims]
        );
        assert!(set.is_available(ValidatorRole::State));
        assert!(!set.is_available(ValidatorRole::SparcState));
        assert_eq!(set.unavailable_roles().len(), ValidatorRole::all().len() - 2);
    }

    #[test]
    fn conforming_document_passes() {
        let (_dir, registry) = registry_with(&[("section_state.schema.json", state_schema())]);
        let set = ValidatorSet::from_registry(&registry);
        let doc = json!({ "section_id": "01-intro", "status": "draft" });
        assert_eq!(set.validate(ValidatorRole::State, &doc), Ok(()));
    }

    #[test]
    fn missing_required_property_reports_root_path() {
        let (_dir, registry) = registry_with(&[("section_state.schema.json", state_schema())]);
        let set = ValidatorSet::from_registry(&registry);
        let doc = json!({ "section_id": "01-intro" });

        let Err(ArtifactFailure::SchemaViolation { role, schema, violations }) =
            set.validate(ValidatorRole::State, &doc)
        else {
            panic!("expected a schema violation");
        };
        assert_eq!(role, ValidatorRole::State);
        assert_eq!(schema, "section_state.schema.json");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].instance_path, "");
        assert_eq!(violations[0].schema_path, "/required");
        assert!(violations[0].message.contains("status"), "{}", violations[0].message);
    }

    #[test]
    fn nested_violation_reports_instance_pointer() {
        let (_dir, registry) = registry_with(&[("section_state.schema.json", state_schema())]);
        let set = ValidatorSet::from_registry(&registry);
        let doc = json!({ "section_id": "01-intro", "status": "published" });

        let err = set.validate(ValidatorRole::State, &doc).unwrap_err();
        let ArtifactFailure::SchemaViolation { violations, .. } = err else {
            panic!("expected a schema violation");
        };
        assert_eq!(violations[0].instance_path, "/status");
        assert_eq!(violations[0].schema_path, "/properties/status/enum");
    }

    #[test]
    fn unavailable_role_is_a_failure_not_a_panic() {
        let (_dir, registry) = registry_with(&[("section_state.schema.json", state_schema())]);
        let set = ValidatorSet::from_registry(&registry);

        let err = set
            .validate(ValidatorRole::SparcState, &json!({}))
            .unwrap_err();
        assert_eq!(
            err,
            ArtifactFailure::ValidatorUnavailable {
                role: ValidatorRole::SparcState,
                reason: "schema 'sparc_section_state.schema.json' not loaded".to_string(),
            }
        );
        assert!(err.to_string().starts_with("no validator available for sparc_state"));
    }

    #[test]
    fn uncompilable_schema_makes_role_unavailable() {
        let (_dir, registry) = registry_with(&[
            ("section_state.schema.json", state_schema()),
            ("claims.schema.json", json!({"type": "not-a-type"})),
        ]);
        let set = ValidatorSet::from_registry(&registry);
        assert!(!set.is_available(ValidatorRole::Claims));

        let err = set.validate(ValidatorRole::Claims, &json!({})).unwrap_err();
        let ArtifactFailure::ValidatorUnavailable { reason, .. } = err else {
            panic!("expected unavailable");
        };
        assert!(reason.contains("claims.schema.json"), "{reason}");
    }

    #[test]
    fn load_artifact_distinguishes_read_and_parse_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("state.json");
        let bad = dir.path().join("claims.json");
        std::fs::write(&good, r#"{"a": 1}"#).unwrap();
        std::fs::write(&bad, r#"{"a": "#).unwrap();

        assert_eq!(load_artifact(&good).unwrap(), json!({"a": 1}));
        assert!(matches!(
            load_artifact(&bad),
            Err(ArtifactFailure::MalformedJson { .. })
        ));
        assert!(matches!(
            load_artifact(&dir.path().join("missing.json")),
            Err(ArtifactFailure::Unreadable { .. })
        ));
    }

    #[test]
    fn violation_display_format() {
        let root = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: "\"status\" is a required property".to_string(),
        };
        assert_eq!(root.to_string(), "(root): \"status\" is a required property");

        let nested = Violation {
            instance_path: "/claims/0/confidence".to_string(),
            schema_path: "/properties/claims/items/properties/confidence/maximum".to_string(),
            message: "1.5 is greater than the maximum of 1".to_string(),
        };
        assert!(nested.to_string().starts_with("/claims/0/confidence: "));
    }

    #[test]
    fn failure_serializes_with_kind_tag() {
        let failure = ArtifactFailure::ValidatorUnavailable {
            role: ValidatorRole::SparcClaims,
            reason: "schema 'sparc_claims.schema.json' not loaded".to_string(),
        };
        let encoded = serde_json::to_value(&failure).unwrap();
        assert_eq!(encoded["kind"], "validator_unavailable");
        assert_eq!(encoded["role"], "sparc_claims");
    }
}
