//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

/// A throwaway workspace holding `schemas/` and `project/`.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("schemas")).unwrap();
        std::fs::create_dir_all(dir.path().join("project")).unwrap();
        Self { dir }
    }

    pub fn schema_dir(&self) -> PathBuf {
        self.dir.path().join("schemas")
    }

    pub fn project_root(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn schema(&self, filename: &str, schema: Value) -> &Self {
        write(&self.schema_dir().join(filename), &schema.to_string());
        self
    }

    /// A project with the base directory set in place.
    pub fn project(&self, id: &str) -> PathBuf {
        let root = self.project_root().join(id);
        mkdir(&root.join("control/planning"));
        mkdir(&root.join("sections"));
        root
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.project_root().join(rel);
        mkdir(&path);
        path
    }

    pub fn artifact(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.project_root().join(rel);
        write(&path, contents);
        path
    }
}

/// Schema for `state.json` with a closed `status` vocabulary.
pub fn section_state_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://sparc.example/schemas/section_state.schema.json",
        "type": "object",
        "required": ["section", "status"],
        "properties": {
            "section": { "type": "string" },
            "status": { "enum": ["draft", "review", "final"] },
            "owner": {
                "type": "object",
                "properties": { "agent": { "type": "string" } }
            }
        }
    })
}

pub fn mkdir(path: &Path) {
    std::fs::create_dir_all(path).unwrap();
}

pub fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        mkdir(parent);
    }
    std::fs::write(path, contents).unwrap();
}
