//! Declaration extraction from proof-assistant source files.
//!
//! # Architecture
//!
//! ```text
//!   comment.rs      section.rs
//!       │               │
//!       ▼               ▼
//!  signature.rs  description.rs  proof.rs
//!       │               │            │
//!       └───────┬───────┴────────────┘
//!               ▼
//!          scanner.rs  ──►  Vec<Declaration>
//! ```
//!
//! All heuristics are line-local and bounded: signatures by
//! [`SIGNATURE_LINE_LIMIT`], proof search by [`PROOF_SEARCH_LIMIT`], proof
//! bodies by [`PROOF_LINE_LIMIT`], and every scan by the next declaration.

pub mod comment;
pub mod description;
pub mod proof;
pub mod scanner;
pub mod section;
pub mod signature;

pub use comment::{strip_comments, strip_nested, CommentMode, CommentStripper};
pub use description::associate_description;
pub use proof::{extract_proof, is_counted_line, PROOF_LINE_LIMIT, PROOF_SEARCH_LIMIT};
pub use scanner::{find_proof_by_name, scan_file, FileScanner, ProofLookup};
pub use section::{ScopeEvent, SectionTracker, TOP_LEVEL};
pub use signature::{assemble_signature, Signature, SIGNATURE_LINE_LIMIT};
