//! # Artifact Locator
//!
//! The glob-rule table routes artifact filenames to a pair of validator
//! roles, and the locator walks a project tree collecting every file that
//! matches a rule. Patterns match the file name only, at any depth below
//! the root, with shell-glob conventions: hidden files and directories are
//! not entered. Symlinks are followed; a link cycle is reported as an
//! unreadable entry and skipped.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use sparc_core::ArtifactVariant;
use sparc_schema::ValidatorRole;

/// One routing entry: filename pattern to (standard, specialized) roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlobRule {
    /// Filename glob, e.g. `claims*.json`.
    pub pattern: &'static str,
    /// Role used for standard research artifacts.
    pub standard: ValidatorRole,
    /// Role used for specialized (SPARC) artifacts.
    pub specialized: ValidatorRole,
}

impl GlobRule {
    /// The role an artifact of `variant` is validated against.
    pub fn role_for(&self, variant: ArtifactVariant) -> ValidatorRole {
        match variant {
            ArtifactVariant::Standard => self.standard,
            ArtifactVariant::Specialized => self.specialized,
        }
    }
}

/// The workflow's artifact routing table. Patterns are disjoint.
pub const GLOB_RULES: &[GlobRule] = &[
    GlobRule {
        pattern: "state.json",
        standard: ValidatorRole::State,
        specialized: ValidatorRole::SparcState,
    },
    GlobRule {
        pattern: "handoff.json",
        standard: ValidatorRole::Handoff,
        specialized: ValidatorRole::Handoff,
    },
    GlobRule {
        pattern: "claims*.json",
        standard: ValidatorRole::Claims,
        specialized: ValidatorRole::SparcClaims,
    },
    GlobRule {
        pattern: "verification*.json",
        standard: ValidatorRole::Verification,
        specialized: ValidatorRole::SparcVerification,
    },
    GlobRule {
        pattern: "adversarial*.json",
        standard: ValidatorRole::Adversarial,
        specialized: ValidatorRole::Adversarial,
    },
    GlobRule {
        pattern: "autonomous-synthesis*.json",
        standard: ValidatorRole::AutonomousSynthesis,
        specialized: ValidatorRole::AutonomousSynthesis,
    },
    GlobRule {
        pattern: "paths.json",
        standard: ValidatorRole::Paths,
        specialized: ValidatorRole::Paths,
    },
];

/// Files located for one rule, sorted by path.
#[derive(Debug, Clone)]
pub struct RuleMatches<'r> {
    /// The rule the files matched.
    pub rule: &'r GlobRule,
    /// Matching files.
    pub paths: Vec<PathBuf>,
}

/// Compiled matchers for a rule table.
#[derive(Debug)]
pub struct ArtifactLocator<'r> {
    rules: &'r [GlobRule],
    matchers: Vec<GlobMatcher>,
}

impl<'r> ArtifactLocator<'r> {
    /// Compile the patterns of `rules`.
    ///
    /// # Errors
    ///
    /// Returns the `globset` error for the first pattern that is not a
    /// valid glob.
    pub fn new(rules: &'r [GlobRule]) -> Result<Self, globset::Error> {
        let matchers = rules
            .iter()
            .map(|rule| Glob::new(rule.pattern).map(|g| g.compile_matcher()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules, matchers })
    }

    /// The first rule whose pattern matches `file_name`.
    pub fn rule_for(&self, file_name: &str) -> Option<usize> {
        self.matchers.iter().position(|m| m.is_match(file_name))
    }

    /// Walk `root` once and bucket every matching file by rule.
    ///
    /// The result has one entry per rule, in table order, including rules
    /// with no matches. Entries that cannot be read mid-walk, including
    /// symlink cycles, are logged and skipped.
    pub fn locate(&self, root: &Path) -> Vec<RuleMatches<'r>> {
        let mut buckets: Vec<Vec<PathBuf>> = vec![Vec::new(); self.rules.len()];

        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                tracing::warn!(path = %entry.path().display(), "skipping file with non-UTF-8 name");
                continue;
            };
            if let Some(index) = self.rule_for(name) {
                tracing::debug!(path = %entry.path().display(), pattern = self.rules[index].pattern, "located artifact");
                buckets[index].push(entry.into_path());
            }
        }

        self.rules
            .iter()
            .zip(buckets)
            .map(|(rule, mut paths)| {
                paths.sort();
                RuleMatches { rule, paths }
            })
            .collect()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
