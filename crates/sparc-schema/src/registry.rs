//! # Schema Registry
//!
//! Loads every JSON Schema document in the schema directory into a map
//! from filename to parsed value. Schemas are immutable once loaded and
//! live for one validation run.
//!
//! ## Schema Resolution
//!
//! Cross-schema `$ref`s are resolved against the loaded set, never the
//! network. A reference resolves if its URI equals a schema's `$id`, or if
//! its last path segment equals a loaded filename. Anything else fails
//! validator compilation with the unresolved URI in the reason.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Fatal registry errors. Any of these aborts the run.
#[derive(Error, Debug)]
pub enum SchemaRegistryError {
    /// The schema directory could not be listed.
    #[error("cannot read schema directory '{path}': {reason}")]
    SchemaDirUnreadable {
        /// The schema directory.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// The directory listed fine but no schema document could be loaded.
    #[error("no schemas found in '{path}'")]
    NoSchemasFound {
        /// The schema directory.
        path: PathBuf,
    },

    /// A schema was requested by filename but is not loaded.
    #[error("schema '{schema_name}' not found in '{}'", .schema_dir.display())]
    SchemaNotFound {
        /// Requested filename.
        schema_name: String,
        /// The schema directory that was searched.
        schema_dir: PathBuf,
    },

    /// The schema document loaded but could not be compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild {
        /// Schema filename.
        schema_name: String,
        /// Compiler message.
        reason: String,
    },
}

/// A `*.json` file in the schema directory that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSchema {
    /// Filename within the schema directory.
    pub filename: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Resolves `$ref` URIs to schemas held in memory.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        Err(format!("unresolved $ref '{uri_str}' (not among loaded schemas)").into())
    }
}

/// All schema documents loaded from one directory.
#[derive(Debug)]
pub struct SchemaRegistry {
    schema_dir: PathBuf,
    schemas: BTreeMap<String, Value>,
    skipped: Vec<SkippedSchema>,
}

impl SchemaRegistry {
    /// Load every `*.json` file in `schema_dir`.
    ///
    /// Hidden files are ignored. Files that cannot be read or parsed are
    /// logged and recorded in [`SchemaRegistry::skipped`]; they only become
    /// fatal when nothing at all loads.
    ///
    /// # Errors
    ///
    /// - [`SchemaRegistryError::SchemaDirUnreadable`] if the directory
    ///   cannot be listed.
    /// - [`SchemaRegistryError::NoSchemasFound`] if zero schemas load.
    pub fn load(schema_dir: impl Into<PathBuf>) -> Result<Self, SchemaRegistryError> {
        let schema_dir = schema_dir.into();
        let unreadable = |e: std::io::Error| SchemaRegistryError::SchemaDirUnreadable {
            path: schema_dir.clone(),
            reason: e.to_string(),
        };

        let mut schemas = BTreeMap::new();
        let mut skipped = Vec::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(unreadable)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry.map_err(unreadable)?.path());
        }
        paths.sort();

        for path in paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') || !name.ends_with(".json") || !path.is_file() {
                continue;
            }

            let parsed = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read file: {e}"))
                .and_then(|content| {
                    serde_json::from_str::<Value>(&content)
                        .map_err(|e| format!("invalid JSON: {e}"))
                });

            match parsed {
                Ok(value) => {
                    tracing::info!(schema = name, "loaded schema");
                    schemas.insert(name.to_string(), value);
                }
                Err(reason) => {
                    tracing::error!(schema = name, %reason, "skipping schema");
                    skipped.push(SkippedSchema {
                        filename: name.to_string(),
                        reason,
                    });
                }
            }
        }

        if schemas.is_empty() {
            return Err(SchemaRegistryError::NoSchemasFound { path: schema_dir });
        }

        Ok(Self {
            schema_dir,
            schemas,
            skipped,
        })
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Schema files that were present but could not be loaded.
    pub fn skipped(&self) -> &[SkippedSchema] {
        &self.skipped
    }

    fn build_options(&self) -> ValidationOptions {
        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &self.schemas {
            if let Some(id) = value.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
        opts
    }

    /// Compile a Draft 2020-12 validator for a loaded schema.
    ///
    /// # Errors
    ///
    /// - [`SchemaRegistryError::SchemaNotFound`] if `schema_name` is not loaded.
    /// - [`SchemaRegistryError::ValidatorBuild`] if the schema is not a valid
    ///   schema or references something outside the loaded set.
    pub fn build_validator(&self, schema_name: &str) -> Result<Validator, SchemaRegistryError> {
        let schema = self
            .schemas
            .get(schema_name)
            .ok_or_else(|| SchemaRegistryError::SchemaNotFound {
                schema_name: schema_name.to_string(),
                schema_dir: self.schema_dir.clone(),
            })?;

        self.build_options()
            .build(schema)
            .map_err(|e| SchemaRegistryError::ValidatorBuild {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_json(dir: &Path, name: &str, value: &Value) {
        std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
    }

    #[test]
    fn loads_every_json_file_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "claims.schema.json", &json!({"type": "object"}));
        write_json(dir.path(), "extra.json", &json!({"type": "array"}));
        std::fs::write(dir.path().join("README.md"), "not a schema").unwrap();

        let registry = SchemaRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.schema_count(), 2);
        assert_eq!(registry.schema_names(), vec!["claims.schema.json", "extra.json"]);
        assert_eq!(
            registry.get_schema("extra.json"),
            Some(&json!({"type": "array"}))
        );
        assert_eq!(registry.schema_dir(), dir.path());
    }

    #[test]
    fn ignores_hidden_files_and_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "paths.schema.json", &json!({}));
        write_json(dir.path(), ".draft.json", &json!({}));
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let registry = SchemaRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.schema_names(), vec!["paths.schema.json"]);
    }

    #[test]
    fn empty_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaRegistry::load(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaRegistryError::NoSchemasFound { .. }), "{err}");
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaRegistry::load(dir.path().join("absent")).unwrap_err();
        assert!(
            matches!(err, SchemaRegistryError::SchemaDirUnreadable { .. }),
            "{err}"
        );
    }

    #[test]
    fn malformed_schema_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "claims.schema.json", &json!({"type": "object"}));
        std::fs::write(dir.path().join("broken.schema.json"), "{ nope").unwrap();

        let registry = SchemaRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.schema_count(), 1);
        assert_eq!(registry.skipped().len(), 1);
        assert_eq!(registry.skipped()[0].filename, "broken.schema.json");
        assert!(registry.skipped()[0].reason.starts_with("invalid JSON"));
    }

    #[test]
    fn only_malformed_schemas_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.schema.json"), "[").unwrap();
        let err = SchemaRegistry::load(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaRegistryError::NoSchemasFound { .. }));
    }

    #[test]
    fn build_validator_for_unknown_schema() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "paths.schema.json", &json!({}));
        let registry = SchemaRegistry::load(dir.path()).unwrap();
        let err = registry.build_validator("claims.schema.json").unwrap_err();
        assert!(matches!(err, SchemaRegistryError::SchemaNotFound { .. }));
    }

    #[test]
    fn build_validator_rejects_invalid_schema() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "paths.schema.json", &json!({"type": 12}));
        let registry = SchemaRegistry::load(dir.path()).unwrap();
        let err = registry.build_validator("paths.schema.json").unwrap_err();
        assert!(matches!(err, SchemaRegistryError::ValidatorBuild { .. }), "{err}");
    }

    #[test]
    fn cross_schema_ref_resolves_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "common.schema.json",
            &json!({
                "$schema": "https://json-schema.org/draft/2020-12/schema",
                "$defs": { "id": { "type": "string", "pattern": "^C-" } }
            }),
        );
        write_json(
            dir.path(),
            "claims.schema.json",
            &json!({
                "$schema": "https://json-schema.org/draft/2020-12/schema",
                "type": "object",
                "properties": { "claim_id": { "$ref": "common.schema.json#/$defs/id" } }
            }),
        );

        let registry = SchemaRegistry::load(dir.path()).unwrap();
        let validator = registry.build_validator("claims.schema.json").unwrap();
        assert!(validator.is_valid(&json!({"claim_id": "C-1"})));
        assert!(!validator.is_valid(&json!({"claim_id": "X-1"})));
    }

    #[test]
    fn cross_schema_ref_resolves_by_id() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "common.schema.json",
            &json!({
                "$id": "https://schemas.example.org/sparc/common.schema.json",
                "$defs": { "score": { "type": "integer", "minimum": 0 } }
            }),
        );
        write_json(
            dir.path(),
            "verification.schema.json",
            &json!({
                "$id": "https://schemas.example.org/sparc/verification.schema.json",
                "properties": {
                    "score": { "$ref": "https://schemas.example.org/sparc/common.schema.json#/$defs/score" }
                }
            }),
        );

        let registry = SchemaRegistry::load(dir.path()).unwrap();
        let validator = registry.build_validator("verification.schema.json").unwrap();
        assert!(validator.is_valid(&json!({"score": 3})));
        assert!(!validator.is_valid(&json!({"score": -1})));
    }

    #[test]
    fn unresolvable_ref_fails_compilation() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            dir.path(),
            "claims.schema.json",
            &json!({ "properties": { "x": { "$ref": "https://elsewhere.invalid/missing.json" } } }),
        );
        let registry = SchemaRegistry::load(dir.path()).unwrap();
        let err = registry.build_validator("claims.schema.json").unwrap_err();
        assert!(matches!(err, SchemaRegistryError::ValidatorBuild { .. }), "{err}");
    }
}
