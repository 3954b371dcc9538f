//! Proof boundary extraction.
//!
//! Phase 1 looks for the opening keyword on the declaration line and up to
//! [`PROOF_SEARCH_LIMIT`] lines below it. A terminator seen first means a
//! one-line proof. Phase 2 accumulates verbatim lines from the opening line
//! until a terminator, for at most [`PROOF_LINE_LIMIT`] lines. Both phases
//! stop at the caller's bound (the next declaration in the file).
//!
//! Keyword matching runs on a comment-stripped view; the returned text keeps
//! comments.

use crate::common::patterns;
use crate::declaration::ProofBody;

use super::comment::{strip_nested, CommentStripper};

/// Lines searched below the declaration line for the opening keyword.
pub const PROOF_SEARCH_LIMIT: usize = 30;

/// Maximum number of lines in one proof body, opening line included.
pub const PROOF_LINE_LIMIT: usize = 500;

/// True for lines that count towards a proof's length: not blank and not
/// made of comments only.
pub fn is_counted_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    !(trimmed.starts_with("(*") && strip_nested(trimmed).trim().is_empty())
}

/// Extracts the proof of the declaration at `lines[start]`.
///
/// Returns `None` when no opening keyword or terminator is found in the
/// search window.
pub fn extract_proof(
    lines: &[&str],
    start: usize,
    bound: usize,
    stripper: &CommentStripper,
) -> Option<ProofBody> {
    let bound = bound.min(lines.len());
    let search_end = bound.min(start.saturating_add(PROOF_SEARCH_LIMIT + 1));

    let mut open = None;
    for idx in start..search_end {
        let visible = stripper.strip_line(lines[idx].trim());
        if patterns::proof_open().is_match(&visible) {
            open = Some(idx);
            break;
        }
        if patterns::proof_terminator().is_match(&visible) {
            return Some(ProofBody {
                text: lines[idx].to_string(),
                line_count: 1,
                start: idx,
                truncated: false,
            });
        }
    }
    let open = open?;

    let body_end = bound.min(open.saturating_add(PROOF_LINE_LIMIT));
    let mut collected: Vec<&str> = Vec::new();
    let mut terminated = false;

    for &line in &lines[open..body_end] {
        collected.push(line);
        if patterns::proof_terminator().is_match(&stripper.strip_line(line)) {
            terminated = true;
            break;
        }
    }

    let line_count = collected
        .iter()
        .filter(|l| is_counted_line(l))
        .count()
        .max(1);

    Some(ProofBody {
        text: collected.join("\n"),
        line_count,
        start: open,
        truncated: !terminated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> Option<ProofBody> {
        let lines: Vec<&str> = src.lines().collect();
        extract_proof(&lines, 0, lines.len(), &CommentStripper::default())
    }

    #[test]
    fn test_standard_proof() {
        let body = extract(
            "Lemma double_ok : forall n, double n = n + n.\nProof.\n  induction n; simpl; auto.\nQed.",
        )
        .unwrap();
        assert_eq!(body.line_count, 3);
        assert_eq!(body.start, 1);
        assert_eq!(body.text, "Proof.\n  induction n; simpl; auto.\nQed.");
        assert!(!body.truncated);
    }

    #[test]
    fn test_one_line_terminator_without_proof_keyword() {
        let body = extract("Lemma a : True.\nexact I. Defined.").unwrap();
        assert_eq!(body.line_count, 1);
        assert_eq!(body.text, "exact I. Defined.");
    }

    #[test]
    fn test_proof_and_terminator_on_one_line() {
        let body = extract("Lemma a : True.\nProof. exact I. Qed.\nLemma b : True.").unwrap();
        assert_eq!(body.line_count, 1);
        assert_eq!(body.text, "Proof. exact I. Qed.");
    }

    #[test]
    fn test_blank_and_comment_lines_not_counted() {
        let src = "Lemma a : True.\nProof.\n\n  (* explain *)\n  (* long\n     note *)\n  exact I. (* done *)\nQed.";
        let body = extract(src).unwrap();
        // Proof. / note *) / exact I. / Qed.
        assert_eq!(body.line_count, 4);
        assert!(body.text.contains("(* explain *)"));
    }

    #[test]
    fn test_commented_terminator_is_ignored() {
        let body = extract("Lemma a : True.\nProof.\n  (* Qed. *)\n  exact I.\nAdmitted.").unwrap();
        assert!(body.text.ends_with("Admitted."));
        assert_eq!(body.line_count, 3);
    }

    #[test]
    fn test_missing_proof_returns_none() {
        let mut src = String::from("Lemma far : True.\n");
        for _ in 0..PROOF_SEARCH_LIMIT {
            src.push_str("  (* filler *)\n");
        }
        src.push_str("Proof.\nQed.\n");
        assert!(extract(&src).is_none());
    }

    #[test]
    fn test_proof_at_edge_of_window_is_found() {
        let mut src = String::from("Lemma near : True.\n");
        for _ in 0..PROOF_SEARCH_LIMIT - 1 {
            src.push_str("  (* filler *)\n");
        }
        src.push_str("Proof.\nQed.\n");
        assert_eq!(extract(&src).unwrap().line_count, 2);
    }

    #[test]
    fn test_runaway_proof_is_capped() {
        let mut src = String::from("Lemma long : True.\nProof.\n");
        for _ in 0..(PROOF_LINE_LIMIT + 100) {
            src.push_str("  auto.\n");
        }
        let body = extract(&src).unwrap();
        assert!(body.truncated);
        assert_eq!(body.text.lines().count(), PROOF_LINE_LIMIT);
        assert_eq!(body.line_count, PROOF_LINE_LIMIT);
    }

    #[test]
    fn test_bound_prevents_reading_next_declaration() {
        let lines = vec!["Lemma a : True.", "Lemma b : True.", "Proof.", "Qed."];
        assert!(extract_proof(&lines, 0, 1, &CommentStripper::default()).is_none());
        assert!(extract_proof(&lines, 1, lines.len(), &CommentStripper::default()).is_some());
    }

    #[test]
    fn test_counted_line() {
        assert!(is_counted_line("  auto."));
        assert!(is_counted_line("(* why *) auto."));
        assert!(!is_counted_line("   "));
        assert!(!is_counted_line("(* only a comment *)"));
        assert!(!is_counted_line("(* opens here"));
    }
}
