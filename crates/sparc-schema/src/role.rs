//! # Validator Roles
//!
//! A role is a logical validator identity bound to exactly one schema file.
//! The table below is the whole binding; nothing else in the workspace
//! spells out a schema filename.

use serde::{Deserialize, Serialize};

/// Logical validator identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorRole {
    /// Research section state (`state.json`).
    State,
    /// Agent handoff (`handoff.json`).
    Handoff,
    /// Research claims (`claims*.json`).
    Claims,
    /// Claim verification (`verification*.json`).
    Verification,
    /// Adversarial review (`adversarial*.json`).
    Adversarial,
    /// Project path table (`paths.json`).
    Paths,
    /// SPARC section state.
    SparcState,
    /// SPARC claims.
    SparcClaims,
    /// SPARC verification.
    SparcVerification,
    /// Autonomous synthesis (`autonomous-synthesis*.json`).
    AutonomousSynthesis,
}

impl ValidatorRole {
    /// Every role, in declaration order.
    pub fn all() -> &'static [ValidatorRole] {
        &[
            Self::State,
            Self::Handoff,
            Self::Claims,
            Self::Verification,
            Self::Adversarial,
            Self::Paths,
            Self::SparcState,
            Self::SparcClaims,
            Self::SparcVerification,
            Self::AutonomousSynthesis,
        ]
    }

    /// Role key as used in reports, e.g. `sparc_claims`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Handoff => "handoff",
            Self::Claims => "claims",
            Self::Verification => "verification",
            Self::Adversarial => "adversarial",
            Self::Paths => "paths",
            Self::SparcState => "sparc_state",
            Self::SparcClaims => "sparc_claims",
            Self::SparcVerification => "sparc_verification",
            Self::AutonomousSynthesis => "autonomous_synthesis",
        }
    }

    /// Schema filename this role compiles from.
    pub fn schema_filename(&self) -> &'static str {
        match self {
            Self::State => "section_state.schema.json",
            Self::Handoff => "handoff.schema.json",
            Self::Claims => "claims.schema.json",
            Self::Verification => "verification.schema.json",
            Self::Adversarial => "adversarial.schema.json",
            Self::Paths => "paths.schema.json",
            Self::SparcState => "sparc_section_state.schema.json",
            Self::SparcClaims => "sparc_claims.schema.json",
            Self::SparcVerification => "sparc_verification.schema.json",
            Self::AutonomousSynthesis => "autonomous_synthesis.schema.json",
        }
    }
}

impl std::fmt::Display for ValidatorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
