#![deny(missing_docs)]

//! # sparc-core — Foundational Types for SPARC Artifact Validation
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `serde_json`
//! and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for directory identifiers.** A [`ProjectId`] is
//!    validated at construction; code that holds one never re-checks the
//!    `P-XXX` format.
//!
//! 2. **Single [`MarkerKey`] enum.** The top-level keys that switch an
//!    artifact onto the specialized (SPARC) validator path are declared in
//!    one place. Classification matches exhaustively over that enum; there
//!    are no inline key checks elsewhere in the workspace.
//!
//! 3. **Classification is total.** [`classify`] never fails: every JSON
//!    value maps to exactly one [`Classification`], and every
//!    classification routes to exactly one [`ArtifactVariant`].

pub mod error;
pub mod identity;
pub mod variant;

pub use error::IdentifierError;
pub use identity::{ProjectId, SectionId};
pub use variant::{classify, ArtifactVariant, Classification, MarkerKey};
