//! Common utilities shared across the extractors and the dependency graph.

mod graph_trait;
pub mod patterns;

pub use graph_trait::GraphTraversal;
pub use patterns::collapse_whitespace;
