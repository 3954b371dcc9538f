//! Corpus-wide dependency analysis.
//!
//! Structure:
//! - `usage`: which known names a proof mentions
//! - `builder`: phase 2, filling `uses` / `used_by` over the whole corpus
//! - `rehydrate`: recovering proof text for records loaded from an export
//! - `graph`: read-only queries over linked declarations

mod builder;
mod graph;
mod rehydrate;
mod usage;

pub use builder::{compute_uses, invert_uses, link_declarations};
pub use graph::{DependencyGraph, GraphStats};
pub use rehydrate::{rehydrate_proofs, relink_from_sources};
pub use usage::referenced_names;

use serde::Serialize;
use std::fmt;

/// Non-fatal problem found while linking the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphWarning {
    /// No proof text was available; `uses` is empty.
    MissingProof { name: String, file: String },
    /// The record's file is not among the loaded sources.
    UnresolvedFile { name: String, file: String },
    /// The record's file no longer declares that name.
    NotFoundInFile { name: String, file: String },
    /// Several declarations share one name; lookups resolve to the last.
    DuplicateName { name: String, files: Vec<String> },
}

impl GraphWarning {
    pub fn name(&self) -> &str {
        match self {
            Self::MissingProof { name, .. }
            | Self::UnresolvedFile { name, .. }
            | Self::NotFoundInFile { name, .. }
            | Self::DuplicateName { name, .. } => name,
        }
    }

    /// The single file concerned, if there is one.
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::MissingProof { file, .. }
            | Self::UnresolvedFile { file, .. }
            | Self::NotFoundInFile { file, .. } => Some(file),
            Self::DuplicateName { .. } => None,
        }
    }
}

impl fmt::Display for GraphWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProof { name, file } => write!(f, "{file}: {name} has no proof"),
            Self::UnresolvedFile { name, file } => {
                write!(f, "{file}: could not find file for {name}")
            }
            Self::NotFoundInFile { name, file } => write!(f, "{file}: {name} not found"),
            Self::DuplicateName { name, files } => {
                write!(f, "{name} declared in {}", files.join(", "))
            }
        }
    }
}
