//! Multi-line signature assembly.
//!
//! Lines are accumulated from the declaration keyword until either:
//! - a line contains the proof-opening keyword (the keyword and everything
//!   after it on that line are dropped), or
//! - a line ends with `.` while brackets are balanced and a `:` has been seen.
//!
//! The scan never exceeds [`SIGNATURE_LINE_LIMIT`] lines and never crosses
//! the caller's bound (the next declaration).

use crate::common::{collapse_whitespace, patterns};

use super::comment::CommentStripper;

/// Maximum number of lines in one signature, declaration line included.
pub const SIGNATURE_LINE_LIMIT: usize = 20;

/// An assembled, whitespace-normalised signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub text: String,
    /// False when the scan stopped at the line cap or the bound.
    pub complete: bool,
}

/// Net change in paren, bracket and brace depth for one line.
fn bracket_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '(' | '[' | '{' => acc + 1,
        ')' | ']' | '}' => acc - 1,
        _ => acc,
    })
}

/// Assembles the signature of the declaration starting at `lines[start]`.
pub fn assemble_signature(
    lines: &[&str],
    start: usize,
    bound: usize,
    stripper: &CommentStripper,
) -> Signature {
    let end = bound
        .min(start.saturating_add(SIGNATURE_LINE_LIMIT))
        .min(lines.len());
    let window = lines.get(start..end).unwrap_or_default();

    let mut parts: Vec<String> = Vec::with_capacity(4);
    let mut balance = 0i64;
    let mut found_colon = false;
    let mut complete = false;

    for raw in window {
        let mut line = stripper.strip_line(raw.trim());

        if let Some(m) = patterns::proof_open().find(&line) {
            line.truncate(m.start());
            parts.push(line);
            complete = true;
            break;
        }

        balance += bracket_delta(&line);
        found_colon |= line.contains(':');
        let ends_with_period = line.trim_end().ends_with('.');
        parts.push(line);

        if ends_with_period && balance <= 0 && found_colon {
            complete = true;
            break;
        }
    }

    let joined = collapse_whitespace(&parts.join(" "));
    let text = patterns::trailing_proof().replace(&joined, "").into_owned();

    Signature { text, complete }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(src: &str) -> Signature {
        let lines: Vec<&str> = src.lines().collect();
        assemble_signature(&lines, 0, lines.len(), &CommentStripper::default())
    }

    #[test]
    fn test_single_line() {
        let sig = assemble("Lemma double_ok : forall n, double n = n + n.\nProof.\nQed.");
        assert_eq!(sig.text, "Lemma double_ok : forall n, double n = n + n.");
        assert!(sig.complete);
    }

    #[test]
    fn test_multi_line_with_binders() {
        let sig = assemble(
            "Lemma le_pos (n : nat)\n    (H : 0 < n) :\n  n <> 0.\nProof.\n  lia.\nQed.",
        );
        assert_eq!(sig.text, "Lemma le_pos (n : nat) (H : 0 < n) : n <> 0.");
    }

    #[test]
    fn test_period_inside_open_brackets_does_not_stop() {
        let sig = assemble("Lemma f : (forall x,\n  P x.\n  ) -> Q.\nProof.");
        assert_eq!(sig.text, "Lemma f : (forall x, P x. ) -> Q.");
    }

    #[test]
    fn test_proof_keyword_truncates_line() {
        let sig = assemble("Lemma triv : True. Proof. exact I. Qed.");
        assert_eq!(sig.text, "Lemma triv : True.");

        let sig = assemble("Theorem t :\n  True\nProof.\n");
        assert_eq!(sig.text, "Theorem t : True");
        assert!(sig.complete);
    }

    #[test]
    fn test_comments_are_removed() {
        let sig = assemble("Lemma c (* the name *) : True. (* trailing *)");
        assert_eq!(sig.text, "Lemma c : True.");
    }

    #[test]
    fn test_cap_truncates_runaway_signature() {
        let mut src = String::from("Lemma endless :\n");
        for i in 0..40 {
            src.push_str(&format!("  (x{} \n", i));
        }
        let sig = assemble(&src);
        assert!(!sig.complete);
        assert!(sig.text.contains("x18"));
        assert!(!sig.text.contains("x19"));
    }

    #[test]
    fn test_bound_stops_scan() {
        let lines = vec!["Lemma a : True", "Lemma b : True."];
        let sig = assemble_signature(&lines, 0, 1, &CommentStripper::default());
        assert_eq!(sig.text, "Lemma a : True");
        assert!(!sig.complete);
    }

    #[test]
    fn test_bracket_delta() {
        assert_eq!(bracket_delta("({[ ]})"), 0);
        assert_eq!(bracket_delta("(a (b"), 2);
        assert_eq!(bracket_delta("}])"), -3);
    }
}
