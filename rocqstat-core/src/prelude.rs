//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use rocqstat_core::prelude::*;
//! ```
//!
//! This provides the most commonly needed types for corpus analysis
//! without polluting the namespace with rarely-used items.

// Core record types
pub use crate::declaration::{DeclKind, Declaration, Role};
pub use crate::error::{RocqstatError, RocqstatResult};

// Builder API
pub use crate::builder::{AnalysisResult, Rocqstat};

// Scanning options
pub use crate::classify::Classifier;
pub use crate::extract::CommentMode;
pub use crate::options::ScanOptions;

// In-memory corpora
pub use crate::corpus::{analyze_corpus, CorpusStats};
pub use crate::scan::SourceFile;

// Graph queries
pub use crate::common::GraphTraversal;
pub use crate::depgraph::{DependencyGraph, GraphWarning};

// Configuration
pub use crate::config::{load_config, RocqstatConfig};
