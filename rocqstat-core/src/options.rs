//! Options threaded through a scan.

use crate::classify::Classifier;
use crate::extract::{CommentMode, CommentStripper};

/// Everything the scanner needs besides the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub comment_mode: CommentMode,
    pub classifier: Classifier,
}

impl ScanOptions {
    pub fn stripper(&self) -> CommentStripper {
        CommentStripper::new(self.comment_mode)
    }
}
