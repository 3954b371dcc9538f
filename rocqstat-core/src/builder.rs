//! Builder pattern API for corpus analysis.
//!
//! Provides a fluent interface for configuring and running an analysis:
//!
//! ```rust,ignore
//! use rocqstat_core::prelude::*;
//!
//! let result = Rocqstat::new("/path/to/theories")
//!     .add_root("/path/to/more")
//!     .marker_words(["main", "key"])
//!     .comment_mode(CommentMode::Nested)
//!     .analyze()?;
//!
//! println!("Declarations: {}", result.stats.total_declarations);
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::classify::Classifier;
use crate::config::RocqstatConfig;
use crate::corpus::{analyze_corpus, CorpusStats};
use crate::declaration::Declaration;
use crate::depgraph::{relink_from_sources, DependencyGraph, GraphWarning};
use crate::extract::CommentMode;
use crate::options::ScanOptions;
use crate::scan::{load_sources, SkippedFile, SourceLoad};

/// Builder for configuring corpus analysis.
#[derive(Debug, Clone)]
pub struct Rocqstat {
    /// Source roots, scanned in order
    roots: Vec<PathBuf>,

    /// Custom excluded directory names
    excluded_dirs: Vec<String>,

    /// Marker words; `None` keeps the default set
    marker_words: Option<Vec<String>>,

    comment_mode: CommentMode,
}

impl Rocqstat {
    /// Create a new analysis builder for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
            excluded_dirs: Vec::new(),
            marker_words: None,
            comment_mode: CommentMode::default(),
        }
    }

    /// Add another source root. Records from it follow earlier roots.
    pub fn add_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Replace the marker words that promote a declaration to primary.
    pub fn marker_words(mut self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.marker_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    pub fn comment_mode(mut self, mode: CommentMode) -> Self {
        self.comment_mode = mode;
        self
    }

    /// Apply values from a loaded rocqstat.toml.
    ///
    /// Call before the explicit setters so that those take precedence.
    pub fn with_config(mut self, config: &RocqstatConfig) -> Self {
        self.excluded_dirs.extend(config.excluded_dirs().iter().cloned());
        if let Some(words) = &config.marker_words {
            self.marker_words = Some(words.clone());
        }
        if let Some(nested) = config.nested_comments {
            self.comment_mode = if nested {
                CommentMode::Nested
            } else {
                CommentMode::LineLocal
            };
        }
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Scan options resolved from this builder.
    pub fn options(&self) -> ScanOptions {
        let classifier = match &self.marker_words {
            Some(words) => Classifier::new(words.iter().cloned()),
            None => Classifier::default(),
        };
        ScanOptions {
            comment_mode: self.comment_mode,
            classifier,
        }
    }

    fn load(&self) -> Result<SourceLoad> {
        let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
        load_sources(&self.roots, &excludes).context("Failed to gather .v files")
    }

    /// Run the analysis and return results.
    ///
    /// Fails only when discovery fails or no `.v` file is found at all.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Gather and read files
        let load = self.load()?;
        if load.files.is_empty() {
            bail!("No .v files found under {}", self.describe_roots());
        }

        // 2. Scan, then link
        let analysis = analyze_corpus(&load.files, &self.options());

        Ok(AnalysisResult {
            roots: self.roots.clone(),
            declarations: analysis.declarations,
            warnings: analysis.warnings,
            skipped: load.skipped,
            stats: analysis.stats,
        })
    }

    /// Relink declarations loaded from an export against the current sources.
    pub fn relink(&self, mut declarations: Vec<Declaration>) -> Result<AnalysisResult> {
        let load = self.load()?;
        let warnings =
            relink_from_sources(&mut declarations, &load.files, &self.options().stripper());
        let stats = CorpusStats::from_declarations(&declarations);

        Ok(AnalysisResult {
            roots: self.roots.clone(),
            declarations,
            warnings,
            skipped: load.skipped,
            stats,
        })
    }

    fn describe_roots(&self) -> String {
        self.roots
            .iter()
            .map(|r| r.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of running corpus analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Roots that were analyzed
    pub roots: Vec<PathBuf>,

    /// Linked records in corpus order
    pub declarations: Vec<Declaration>,

    /// Non-fatal linking problems
    pub warnings: Vec<GraphWarning>,

    /// Files or roots left out of the corpus
    pub skipped: Vec<SkippedFile>,

    pub stats: CorpusStats,
}

impl AnalysisResult {
    /// Name-indexed view for graph queries.
    pub fn graph(&self) -> DependencyGraph<'_> {
        DependencyGraph::new(&self.declarations)
    }

    pub fn primary(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|d| d.is_primary())
    }

    /// Whether anything was skipped or reported.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty() || !self.skipped.is_empty()
    }
}
