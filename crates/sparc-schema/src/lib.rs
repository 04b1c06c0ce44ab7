//! # sparc-schema — Schema Registry & Artifact Validation
//!
//! Loads the workflow's JSON Schemas (Draft 2020-12) and validates
//! artifacts against them.
//!
//! ## Registry (`registry`)
//!
//! [`SchemaRegistry::load`] reads every `*.json` file in the schema
//! directory and indexes it by filename. An unreadable directory, or one
//! that yields zero schemas, is fatal: there is no partial-schema mode.
//!
//! ## Roles (`role`)
//!
//! [`ValidatorRole`] names the logical validators (`state`, `claims`,
//! `sparc_claims`, ...) and the schema filename each one is bound to.
//!
//! ## Validation (`validate`)
//!
//! [`ValidatorSet::from_registry`] compiles one validator per role whose
//! schema is present. A role with no schema is unavailable, and validating
//! against it is a recorded [`ArtifactFailure::ValidatorUnavailable`], not
//! a crash.
//!
//! ## Crate Policy
//!
//! - No internal crate dependencies. Classification lives in `sparc-core`
//!   and the caller picks the role.
//! - The registry and validator set are built once per run and passed by
//!   reference. There is no process-wide schema state.

pub mod registry;
pub mod role;
pub mod validate;

pub use registry::{SchemaRegistry, SchemaRegistryError, SkippedSchema};
pub use role::ValidatorRole;
pub use validate::{load_artifact, ArtifactFailure, UnavailableRole, ValidatorSet, Violation};
