//! # Artifact Variants — Marker Keys and Classification
//!
//! Workflow artifacts come in two flavours. Standard research artifacts are
//! validated against the research schemas; specialized (SPARC autonomous
//! development) artifacts carry extra context and are validated against the
//! SPARC schemas. The flavour is not encoded in the filename, so it is
//! sniffed from the document's top-level keys.
//!
//! [`MarkerKey`] is the single declaration of the keys that select the
//! specialized path. Adding a marker means adding a variant here; the
//! compiler then forces [`MarkerKey::as_str`] to name it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A top-level key whose presence marks an artifact as specialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKey {
    /// `sparc_context`: SPARC section state.
    SparcContext,
    /// `autonomous_development_context`: SPARC claims and verification.
    AutonomousDevelopmentContext,
    /// `autonomous_development_readiness`: autonomous synthesis.
    AutonomousDevelopmentReadiness,
}

impl MarkerKey {
    /// Every marker key, in declaration order.
    pub fn all() -> &'static [MarkerKey] {
        &[
            Self::SparcContext,
            Self::AutonomousDevelopmentContext,
            Self::AutonomousDevelopmentReadiness,
        ]
    }

    /// The JSON object key this marker matches.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SparcContext => "sparc_context",
            Self::AutonomousDevelopmentContext => "autonomous_development_context",
            Self::AutonomousDevelopmentReadiness => "autonomous_development_readiness",
        }
    }
}

impl std::fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which validator family an artifact is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactVariant {
    /// Standard research artifact.
    Standard,
    /// SPARC autonomous-development artifact.
    Specialized,
}

impl ArtifactVariant {
    /// Short report tag: `STD` or `SPARC`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Standard => "STD",
            Self::Specialized => "SPARC",
        }
    }
}

impl std::fmt::Display for ArtifactVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Specialized => f.write_str("specialized"),
        }
    }
}

/// Result of inspecting an artifact's top-level shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// A JSON object with no marker keys.
    Standard,
    /// A JSON object carrying one or more marker keys. Never empty.
    Specialized {
        /// Markers found, in [`MarkerKey::all`] order.
        markers: Vec<MarkerKey>,
    },
    /// The top level is not a JSON object.
    Unclassifiable,
}

impl Classification {
    /// The validator family this classification routes to.
    ///
    /// Unclassifiable documents take the standard path; they will fail
    /// whichever object schema they meet there.
    pub fn variant(&self) -> ArtifactVariant {
        match self {
            Self::Specialized { .. } => ArtifactVariant::Specialized,
            Self::Standard | Self::Unclassifiable => ArtifactVariant::Standard,
        }
    }

    /// Marker keys that drove the decision (empty unless specialized).
    pub fn markers(&self) -> &[MarkerKey] {
        match self {
            Self::Specialized { markers } => markers,
            Self::Standard | Self::Unclassifiable => &[],
        }
    }
}

/// Classify a parsed artifact by its top-level keys.
///
/// Total and deterministic: any JSON value yields exactly one
/// classification. Every marker routes to the same specialized family, so
/// several markers on one document are recorded but never conflict.
pub fn classify(document: &Value) -> Classification {
    let Some(object) = document.as_object() else {
        return Classification::Unclassifiable;
    };

    let markers: Vec<MarkerKey> = MarkerKey::all()
        .iter()
        .copied()
        .filter(|marker| object.contains_key(marker.as_str()))
        .collect();

    if markers.is_empty() {
        Classification::Standard
    } else {
        Classification::Specialized { markers }
    }
}
