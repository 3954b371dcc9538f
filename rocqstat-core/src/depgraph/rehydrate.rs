//! Recovering proof text for declarations loaded from an export.
//!
//! Exports carry no proof text. Before relinking, each record's proof is
//! re-located in its home file by name: the first declaration line with that
//! name, bounded by the next declaration.

use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::declaration::Declaration;
use crate::extract::{find_proof_by_name, CommentStripper, ProofLookup};
use crate::scan::SourceFile;

use super::builder::link_declarations;
use super::GraphWarning;

/// Fills `proof` on every record that lacks it, from `sources`.
///
/// When several roots hold the same relative path, the first one in
/// `sources` is used. Records whose file is not among `sources`, or whose
/// name no longer appears in it, are left without a proof and reported.
pub fn rehydrate_proofs(
    decls: &mut [Declaration],
    sources: &[SourceFile],
    stripper: &CommentStripper,
) -> Vec<GraphWarning> {
    let mut by_path: HashMap<&str, &str> = HashMap::with_capacity(sources.len());
    for source in sources {
        by_path
            .entry(source.path.as_str())
            .or_insert(source.content.as_str());
    }

    let mut warnings = Vec::new();
    let mut recovered = 0usize;

    for decl in decls.iter_mut().filter(|d| d.proof.is_none()) {
        let Some(content) = by_path.get(decl.file.as_str()) else {
            warn!(file = %decl.file, name = %decl.name, "could not find file");
            warnings.push(GraphWarning::UnresolvedFile {
                name: decl.name.clone(),
                file: decl.file.clone(),
            });
            continue;
        };

        match find_proof_by_name(content, &decl.name, stripper) {
            ProofLookup::Found(body) => {
                decl.proof = Some(body);
                recovered += 1;
            }
            ProofLookup::NoProof => {}
            ProofLookup::NotFound => {
                warn!(file = %decl.file, name = %decl.name, "declaration not found in file");
                warnings.push(GraphWarning::NotFoundInFile {
                    name: decl.name.clone(),
                    file: decl.file.clone(),
                });
            }
        }
    }

    info!(recovered, unresolved = warnings.len(), "rehydrated proofs");
    warnings
}

/// Rehydrates then relinks a loaded export.
///
/// A record already reported as unresolved is not reported again as a
/// missing proof.
pub fn relink_from_sources(
    decls: &mut [Declaration],
    sources: &[SourceFile],
    stripper: &CommentStripper,
) -> Vec<GraphWarning> {
    let mut warnings = rehydrate_proofs(decls, sources, stripper);

    let reported: HashSet<(String, String)> = warnings
        .iter()
        .filter_map(|w| w.file().map(|f| (w.name().to_string(), f.to_string())))
        .collect();

    warnings.extend(link_declarations(decls, stripper).into_iter().filter(|w| {
        !matches!(w, GraphWarning::MissingProof { name, file }
            if reported.contains(&(name.clone(), file.clone())))
    }));
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::scan_file;
    use crate::options::ScanOptions;

    const A: &str = "Lemma lemma_a : True.\nProof. exact I. Qed.\n\nLemma lemma_b : True.\nProof.\n  apply lemma_a.\nQed.\n";

    fn exported() -> Vec<Declaration> {
        let mut decls = scan_file("A.v", A, &ScanOptions::default());
        link_declarations(&mut decls, &CommentStripper::default());
        let json = serde_json::to_string(&decls).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_relink_reproduces_graph() {
        let mut loaded = exported();
        assert!(loaded.iter().all(|d| d.proof.is_none()));

        let sources = vec![SourceFile::new("A.v", A)];
        let warnings = relink_from_sources(&mut loaded, &sources, &CommentStripper::default());

        assert!(warnings.is_empty());
        assert_eq!(loaded[1].uses, vec!["lemma_a"]);
        assert_eq!(loaded[0].used_by, vec!["lemma_b"]);
    }

    #[test]
    fn test_unresolved_file_reported_once() {
        let mut loaded = exported();
        let warnings = relink_from_sources(&mut loaded, &[], &CommentStripper::default());

        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, GraphWarning::UnresolvedFile { .. })));
        assert!(loaded.iter().all(|d| d.uses.is_empty() && d.used_by.is_empty()));
    }

    #[test]
    fn test_shared_relative_path_uses_first_root() {
        let first = "Lemma x : True.\nProof. exact I. Qed.\n\nLemma a : True.\nProof. apply x. Qed.\n";
        let second = "Lemma y : True.\nProof. exact I. Qed.\n\nLemma a : True.\nProof. apply y. Qed.\n";

        let mut decls = scan_file("A.v", first, &ScanOptions::default());
        decls.extend(scan_file("B.v", "Lemma y : True.\nProof. exact I. Qed.\n", &ScanOptions::default()));
        link_declarations(&mut decls, &CommentStripper::default());
        let json = serde_json::to_string(&decls).unwrap();
        let mut loaded: Vec<Declaration> = serde_json::from_str(&json).unwrap();

        let sources = vec![
            SourceFile::new("A.v", first),
            SourceFile::new("A.v", second),
            SourceFile::new("B.v", "Lemma y : True.\nProof. exact I. Qed.\n"),
        ];
        let warnings = relink_from_sources(&mut loaded, &sources, &CommentStripper::default());

        assert!(warnings.is_empty());
        let a = loaded.iter().find(|d| d.name == "a").unwrap();
        assert_eq!(a.uses, vec!["x"]);
        let y = loaded.iter().find(|d| d.name == "y").unwrap();
        assert!(y.used_by.is_empty());
    }

    #[test]
    fn test_renamed_declaration_not_found() {
        let mut loaded = exported();
        let edited = A.replace("lemma_b", "lemma_c");
        let sources = vec![SourceFile::new("A.v", edited)];

        let warnings = rehydrate_proofs(&mut loaded, &sources, &CommentStripper::default());

        assert_eq!(
            warnings,
            vec![GraphWarning::NotFoundInFile {
                name: "lemma_b".into(),
                file: "A.v".into()
            }]
        );
        assert!(loaded[0].proof.is_some());
        assert!(loaded[1].proof.is_none());
    }
}
