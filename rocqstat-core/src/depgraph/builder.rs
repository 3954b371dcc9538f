//! Phase 2: linking declarations through their proof text.
//!
//! Must run after every file has been scanned: the known-name set is the
//! whole corpus. `uses` sets are computed in parallel against that read-only
//! set; `used_by` is then derived once by inverting the finished `uses`.

use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{info, warn};

use crate::declaration::Declaration;
use crate::extract::CommentStripper;

use super::usage::referenced_names;
use super::GraphWarning;

/// Computes `uses` for every declaration without mutating anything.
pub fn compute_uses(decls: &[Declaration], stripper: &CommentStripper) -> Vec<Vec<String>> {
    let known: HashSet<&str> = decls.iter().map(|d| d.name.as_str()).collect();

    decls
        .par_iter()
        .map(|d| match &d.proof {
            Some(body) => referenced_names(&body.text, &known, &d.name, stripper),
            None => Vec::new(),
        })
        .collect()
}

/// Rebuilds every `used_by` from the current `uses`.
///
/// `used_by(X) = { Y.name : X.name ∈ Y.uses }`, sorted and deduplicated;
/// records sharing a name see the same set.
pub fn invert_uses(decls: &mut [Declaration]) {
    let mut inverse: HashMap<String, BTreeSet<String>> = HashMap::new();
    for d in decls.iter() {
        for used in &d.uses {
            inverse
                .entry(used.clone())
                .or_default()
                .insert(d.name.clone());
        }
    }

    for d in decls.iter_mut() {
        d.used_by = inverse
            .get(&d.name)
            .map(|users| users.iter().cloned().collect())
            .unwrap_or_default();
    }
}

/// Names declared more than once, with the files that declare them.
fn duplicate_names(decls: &[Declaration]) -> Vec<GraphWarning> {
    let mut seen: HashMap<&str, Vec<&str>> = HashMap::new();
    for d in decls {
        seen.entry(d.name.as_str()).or_default().push(d.file.as_str());
    }

    let mut dups: Vec<GraphWarning> = seen
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(name, files)| GraphWarning::DuplicateName {
            name: name.to_string(),
            files: files.into_iter().map(String::from).collect(),
        })
        .collect();
    dups.sort_by(|a, b| a.name().cmp(b.name()));
    dups
}

/// Fills `uses` and `used_by` on every record.
///
/// Declarations without retained proof text get an empty `uses` and a
/// [`GraphWarning::MissingProof`]. Nothing here is fatal.
pub fn link_declarations(decls: &mut [Declaration], stripper: &CommentStripper) -> Vec<GraphWarning> {
    let computed = compute_uses(decls, stripper);

    let mut warnings = duplicate_names(decls);
    for (decl, uses) in decls.iter_mut().zip(computed) {
        if decl.proof.is_none() {
            warnings.push(GraphWarning::MissingProof {
                name: decl.name.clone(),
                file: decl.file.clone(),
            });
        }
        decl.uses = uses;
    }

    invert_uses(decls);

    for w in &warnings {
        warn!(warning = %w, "dependency graph");
    }
    let edges: usize = decls.iter().map(|d| d.uses.len()).sum();
    info!(declarations = decls.len(), dependencies = edges, "linked declarations");

    warnings
}
