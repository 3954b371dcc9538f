//! rocqstat-core: declaration extraction and dependency analysis for Rocq/Coq corpora
//!
//! This library scans `.v` proof sources line by line, pulls out every
//! lemma-like declaration with its signature, description and proof size,
//! and links declarations through the names their proofs mention.
//!
//! # Features
//!
//! - **Declaration extraction**: kind, name, section, signature, description
//! - **Proof measurement**: bounded proof spans, comment-aware line counts
//! - **Role classification**: primary results vs supporting lemmas
//! - **Dependency graph**: `uses` / `used_by` over the whole corpus
//! - **Graph queries**: transitive dependencies, cycles, orphans, DOT export
//! - **Export round trip**: relink declarations loaded from JSON
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use rocqstat_core::prelude::*;
//!
//! let result = Rocqstat::new("/path/to/theories").analyze()?;
//!
//! for decl in result.primary() {
//!     println!("{} ({} lines)", decl.name, decl.proof_line_count);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`scan`]: Parallel file discovery and loading
//! - [`extract`]: Per-file scanning (comments, sections, signatures, proofs)
//! - [`classify`]: Primary/supporting classification
//! - [`corpus`]: Two-phase orchestration and corpus statistics
//! - [`depgraph`]: Dependency linking and graph queries
//! - [`builder`]: Fluent builder API for configuration
//! - [`error`]: Typed error handling

pub mod builder;
pub mod classify;
pub mod common;
pub mod config;
pub mod corpus;
pub mod declaration;
pub mod depgraph;
pub mod error;
pub mod extract;
pub mod logging;
pub mod options;
pub mod prelude;
pub mod scan;

// Common trait re-exports
pub use common::GraphTraversal;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{IoResultExt, RocqstatError, RocqstatResult};

// Builder API
pub use builder::{AnalysisResult, Rocqstat};

// Configuration
pub use config::{load_config, load_config_file, OutputConfig, RocqstatConfig, CONFIG_FILE_NAME};

// Records
pub use declaration::{
    load_declarations, write_declarations, DeclKind, Declaration, ProofBody, Role,
};

// Classification
pub use classify::{Classifier, DEFAULT_MARKER_WORDS};
pub use options::ScanOptions;

// Per-file extraction
pub use extract::{
    associate_description, assemble_signature, extract_proof, find_proof_by_name, scan_file,
    PROOF_LINE_LIMIT, PROOF_SEARCH_LIMIT, SIGNATURE_LINE_LIMIT,
    strip_comments, CommentMode, CommentStripper, FileScanner, ProofLookup, SectionTracker,
    TOP_LEVEL,
};

// Corpus orchestration
pub use corpus::{analyze_corpus, scan_corpus, CorpusAnalysis, CorpusStats};

// Dependency graph
pub use depgraph::{
    link_declarations, referenced_names, rehydrate_proofs, relink_from_sources,
    DependencyGraph, GraphStats, GraphWarning,
};

// Logging
pub use logging::init_structured_logging;

// File scanning
pub use scan::{
    gather_v_files, load_sources, normalize_path_string, path_to_normalized_string,
    SkippedFile, SourceFile, SourceLoad,
};
