//! Pre-compiled keyword patterns shared by the extractors.
//!
//! Every pattern is compiled once behind a `OnceLock` and reused across
//! Rayon workers.

use regex::Regex;
use std::sync::OnceLock;

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    // SAFETY: all patterns in this module are hardcoded and covered by tests.
    cell.get_or_init(|| Regex::new(pattern).expect("Hardcoded regex pattern is valid"))
}

/// `Lemma|Theorem|... <name>` as the first token of a line.
pub fn declaration() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(
        &REGEX,
        r"^\s*(Lemma|Theorem|Corollary|Proposition|Fact|Remark)\s+(\w+)",
    )
}

/// `Section <name>.`
pub fn section_open() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"^\s*Section\s+(\w+)\s*\.")
}

/// `End <name>.`
pub fn section_close() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"^\s*End\s+(\w+)\s*\.")
}

/// Proof-opening keyword.
pub fn proof_open() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"\bProof\b")
}

/// One of the three proof terminators.
pub fn proof_terminator() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"\b(?:Qed|Defined|Admitted)\b")
}

/// A trailing `Proof` / `Proof.` left at the end of an assembled signature.
pub fn trailing_proof() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"\s*\bProof\.?\s*$")
}

/// Single-line `(* ... *)`, non-greedy, never crossing a newline.
pub fn line_comment() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"\(\*.*?\*\)")
}

/// `(* ... *)` spanning newlines, non-greedy.
pub fn block_comment() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"(?s)\(\*.*?\*\)")
}

/// Maximal runs of word characters. A name matches `\bname\b` exactly when
/// it equals one of these runs.
pub fn word() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"\w+")
}

/// Runs of whitespace, for normalising signatures and descriptions.
pub fn whitespace() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compile(&REGEX, r"\s+")
}

/// Collapses whitespace runs to single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace().replace_all(text.trim(), " ").into_owned()
}
