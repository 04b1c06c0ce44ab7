//! # Error Hierarchy
//!
//! Structured error types for identifier validation, built with `thiserror`.
//! Each variant carries the rejected input and the expected format so an
//! operator can rename the offending directory without guesswork.

use thiserror::Error;

/// Identifier format violations for project and section directories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Project directory name is not `P-` followed by three characters.
    #[error("invalid project ID format: \"{0}\" (should be P-XXX)")]
    InvalidProjectId(String),

    /// Section directory name does not match `S-<area>-<name>`.
    #[error("invalid section ID format: \"{0}\" (should be S-<area>-<name>)")]
    InvalidSectionId(String),
}
