//! Name references inside proof text.
//!
//! A known name is referenced when it matches `\bname\b` in the
//! comment-stripped proof. Names are word-character runs, so that match holds
//! exactly when the name equals one of the maximal word runs of the text.
//! Tokenising once per proof gives the same result as testing every name
//! separately, in O(|proof|) instead of O(|proof| × |names|).

use std::collections::{BTreeSet, HashSet};

use crate::common::patterns;
use crate::extract::CommentStripper;

/// Known names referenced by `proof_text`, sorted, `own_name` excluded.
pub fn referenced_names(
    proof_text: &str,
    known: &HashSet<&str>,
    own_name: &str,
    stripper: &CommentStripper,
) -> Vec<String> {
    let visible = stripper.strip_text(proof_text);

    let found: BTreeSet<&str> = patterns::word()
        .find_iter(&visible)
        .map(|m| m.as_str())
        .filter(|w| *w != own_name && known.contains(w))
        .collect();

    found.into_iter().map(String::from).collect()
}
