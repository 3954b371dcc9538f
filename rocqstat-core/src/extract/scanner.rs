//! Per-file declaration scanning.
//!
//! One [`FileScanner`] owns the state for one file: its line list and its
//! section stack. Nothing is shared between files, so files can be scanned
//! on independent workers.

use tracing::{debug, warn};

use crate::common::patterns;
use crate::declaration::{DeclKind, Declaration, ProofBody};
use crate::options::ScanOptions;

use super::comment::CommentStripper;
use super::description::associate_description;
use super::proof::extract_proof;
use super::section::SectionTracker;
use super::signature::assemble_signature;

/// Scanner for a single source file.
pub struct FileScanner<'a> {
    file: &'a str,
    lines: Vec<&'a str>,
    options: &'a ScanOptions,
    stripper: CommentStripper,
}

impl<'a> FileScanner<'a> {
    /// `file` is the path reported in records (relative to its root).
    pub fn new(file: &'a str, content: &'a str, options: &'a ScanOptions) -> Self {
        Self {
            file,
            lines: content.lines().collect(),
            options,
            stripper: options.stripper(),
        }
    }

    /// Indices of every line that starts a declaration.
    fn declaration_starts(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| patterns::declaration().is_match(line))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Scans the file, emitting one classified record per declaration.
    pub fn scan(&self) -> Vec<Declaration> {
        let starts = self.declaration_starts();
        let mut sections = SectionTracker::new();
        let mut decls = Vec::with_capacity(starts.len());

        for (idx, line) in self.lines.iter().enumerate() {
            if sections.observe(line).is_some() {
                continue;
            }

            let Some(caps) = patterns::declaration().captures(line) else {
                continue;
            };
            let Ok(kind) = caps[1].parse::<DeclKind>() else {
                continue;
            };
            let name = caps[2].to_string();

            let next = starts.partition_point(|&s| s <= idx);
            let bound = starts.get(next).copied().unwrap_or(self.lines.len());

            let signature = assemble_signature(&self.lines, idx, bound, &self.stripper);
            if !signature.complete {
                debug!(file = %self.file, name = %name, line = idx + 1, "signature truncated");
            }

            let description = associate_description(&self.lines, idx);
            let proof = extract_proof(&self.lines, idx, bound, &self.stripper);

            match &proof {
                None => warn!(
                    file = %self.file,
                    name = %name,
                    line = idx + 1,
                    "no proof boundary found"
                ),
                Some(body) if body.truncated => warn!(
                    file = %self.file,
                    name = %name,
                    line = idx + 1,
                    "proof has no terminator within bounds, truncated"
                ),
                Some(_) => {}
            }

            let mut decl = Declaration {
                file: self.file.to_string(),
                section: sections.current().to_string(),
                name,
                kind,
                line: idx + 1,
                signature: signature.text,
                description,
                proof_line_count: proof.as_ref().map_or(0, |p| p.line_count),
                role: Default::default(),
                uses: Vec::new(),
                used_by: Vec::new(),
                proof,
            };
            decl.role = self.options.classifier.classify(&decl);
            decls.push(decl);
        }

        debug!(file = %self.file, declarations = decls.len(), "scanned file");
        decls
    }
}

/// Scans one file's content.
pub fn scan_file(file: &str, content: &str, options: &ScanOptions) -> Vec<Declaration> {
    FileScanner::new(file, content, options).scan()
}

/// Outcome of looking a declaration up by name in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofLookup {
    /// No declaration with that name in the file.
    NotFound,
    /// The declaration exists but no proof boundary follows it.
    NoProof,
    Found(ProofBody),
}

/// Locates the first declaration named `name` in `content` and extracts its proof.
///
/// Used to recover proof text for records that were loaded without it.
pub fn find_proof_by_name(content: &str, name: &str, stripper: &CommentStripper) -> ProofLookup {
    let lines: Vec<&str> = content.lines().collect();
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| patterns::declaration().is_match(line))
        .map(|(idx, _)| idx)
        .collect();

    let Some(pos) = starts.iter().position(|&idx| {
        patterns::declaration()
            .captures(lines[idx])
            .is_some_and(|caps| &caps[2] == name)
    }) else {
        return ProofLookup::NotFound;
    };
    let bound = starts.get(pos + 1).copied().unwrap_or(lines.len());

    match extract_proof(&lines, starts[pos], bound, stripper) {
        Some(body) => ProofLookup::Found(body),
        None => ProofLookup::NoProof,
    }
}
