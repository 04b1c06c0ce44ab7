//! # Identity Newtypes
//!
//! Directory-name identifiers for the project tree. Downstream tooling
//! builds paths from these names, so the format is enforced at
//! construction time.
//!
//! - [`ProjectId`]: `P-XXX`, the `P-` prefix and exactly five characters.
//! - [`SectionId`]: `S-<area>-<name>`, specialized (SPARC) sections under a
//!   project's `sections/` directory.

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Project identifier, e.g. `P-001`.
///
/// # Validation
///
/// - Must start with `P-`
/// - Must be exactly [`ProjectId::LENGTH`] characters long
///
/// The characters after the prefix are not restricted further.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Required identifier prefix.
    pub const PREFIX: &'static str = "P-";

    /// Required identifier length in characters.
    pub const LENGTH: usize = 5;

    /// Create a project identifier from a directory name, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidProjectId`] if the name does not
    /// start with `P-` or is not exactly five characters long.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = value.into();
        if !s.starts_with(Self::PREFIX) || s.chars().count() != Self::LENGTH {
            return Err(IdentifierError::InvalidProjectId(s));
        }
        Ok(Self(s))
    }

    /// Whether a directory name is meant to be a project directory.
    ///
    /// Candidates are names whose text before the first `-` is `P` plus at
    /// most one more character. Every candidate is then checked with
    /// [`ProjectId::new`], so near-misses such as `PX-001` or `P-0001`
    /// surface as format errors instead of being silently ignored. Words
    /// (`notes`, `Papers-archive`, `Plans-v2`) are not candidates.
    pub fn is_candidate(name: &str) -> bool {
        let Some((head, _)) = name.split_once('-') else {
            return false;
        };
        head.starts_with('P') && head.chars().count() <= 2
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Specialized section identifier, e.g. `S-auth-login`.
///
/// Matches the shell pattern `S-*-*`: the `S-` prefix followed by a
/// remainder that itself contains a `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(String);

impl SectionId {
    /// Required identifier prefix.
    pub const PREFIX: &'static str = "S-";

    /// Create a section identifier from a directory name, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidSectionId`] if the name does not
    /// match `S-*-*`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = value.into();
        match s.strip_prefix(Self::PREFIX) {
            Some(rest) if rest.contains('-') => Ok(Self(s)),
            _ => Err(IdentifierError::InvalidSectionId(s)),
        }
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
