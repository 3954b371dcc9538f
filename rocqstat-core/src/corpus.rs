//! Whole-corpus orchestration.
//!
//! Phase 1 scans every file independently (in parallel, results kept in
//! input order). Phase 2 links the complete record list. The phases are
//! separated by collecting phase 1 in full: no proof is matched against a
//! partial name set.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

use crate::declaration::{Declaration, Role};
use crate::depgraph::{link_declarations, GraphWarning};
use crate::options::ScanOptions;
use crate::extract::scan_file;
use crate::scan::SourceFile;

/// Corpus summary numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub total_declarations: usize,
    /// Files contributing at least one declaration.
    pub total_files: usize,
    pub primary: usize,
    pub supporting: usize,
    /// Declarations of theorem-grade kind.
    pub theorems: usize,
    /// Sum of all `uses` lengths.
    pub total_dependencies: usize,
    /// Largest single `uses` length.
    pub max_dependencies: usize,
}

impl CorpusStats {
    pub fn from_declarations(decls: &[Declaration]) -> Self {
        let files: HashSet<&str> = decls.iter().map(|d| d.file.as_str()).collect();
        let primary = decls.iter().filter(|d| d.role == Role::Primary).count();

        Self {
            total_declarations: decls.len(),
            total_files: files.len(),
            primary,
            supporting: decls.len() - primary,
            theorems: decls.iter().filter(|d| d.kind.is_theorem_grade()).count(),
            total_dependencies: decls.iter().map(|d| d.uses.len()).sum(),
            max_dependencies: decls.iter().map(|d| d.uses.len()).max().unwrap_or(0),
        }
    }
}

/// Linked records plus what went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct CorpusAnalysis {
    pub declarations: Vec<Declaration>,
    pub warnings: Vec<GraphWarning>,
    pub stats: CorpusStats,
}

/// Phase 1: scans every file, concatenating records in file order.
pub fn scan_corpus(files: &[SourceFile], options: &ScanOptions) -> Vec<Declaration> {
    let per_file: Vec<Vec<Declaration>> = files
        .par_iter()
        .map(|f| scan_file(&f.path, &f.content, options))
        .collect();

    let decls: Vec<Declaration> = per_file.into_iter().flatten().collect();
    info!(files = files.len(), declarations = decls.len(), "scanned corpus");
    decls
}

/// Runs both phases over an in-memory corpus.
pub fn analyze_corpus(files: &[SourceFile], options: &ScanOptions) -> CorpusAnalysis {
    let mut declarations = scan_corpus(files, options);
    let warnings = link_declarations(&mut declarations, &options.stripper());
    let stats = CorpusStats::from_declarations(&declarations);

    CorpusAnalysis {
        declarations,
        warnings,
        stats,
    }
}
