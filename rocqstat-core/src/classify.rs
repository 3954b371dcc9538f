//! Role classification: primary results vs. supporting facts.

use crate::declaration::{DeclKind, Declaration, Role};

/// Marker words used when none are configured.
pub const DEFAULT_MARKER_WORDS: &[&str] = &["main"];

/// Assigns [`Role`]s from a declaration's kind and description.
///
/// A declaration is primary if its kind is theorem-grade or if its
/// lower-cased description contains any marker word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    /// Lower-cased, non-empty.
    marker_words: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_WORDS.iter().copied())
    }
}

impl Classifier {
    pub fn new(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let marker_words = words
            .into_iter()
            .map(|w| w.into().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { marker_words }
    }

    pub fn marker_words(&self) -> &[String] {
        &self.marker_words
    }

    pub fn classify_parts(&self, kind: DeclKind, description: &str) -> Role {
        if kind.is_theorem_grade() {
            return Role::Primary;
        }
        let lowered = description.to_lowercase();
        if self.marker_words.iter().any(|w| lowered.contains(w.as_str())) {
            Role::Primary
        } else {
            Role::Supporting
        }
    }

    pub fn classify(&self, decl: &Declaration) -> Role {
        self.classify_parts(decl.kind, &decl.description)
    }

    /// Re-classifies records in place, e.g. after changing marker words.
    pub fn annotate(&self, decls: &mut [Declaration]) {
        for decl in decls {
            decl.role = self.classify(decl);
        }
    }
}
