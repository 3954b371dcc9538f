//! Associating a declaration with the comment directly above it.
//!
//! Walks backward from the declaration, skipping blank lines. A single-line
//! `(* ... *)` is taken as is; otherwise the walk collects a multi-line block
//! that ends on the nearest non-blank line and opens on the nearest line above
//! containing `(*` (code before the marker is dropped). A block with no such
//! opening line, or anything else, means no description: it is never inferred
//! from text further away.

use crate::common::collapse_whitespace;

/// Strips `*` continuation markers and surrounding whitespace from a fragment.
fn clean_fragment(fragment: &str) -> &str {
    fragment.trim().trim_start_matches('*').trim()
}

/// Recovers the description for the declaration at `lines[start]`.
pub fn associate_description(lines: &[&str], start: usize) -> String {
    let mut idx = start.min(lines.len());

    while idx > 0 && lines[idx - 1].trim().is_empty() {
        idx -= 1;
    }
    if idx == 0 {
        return String::new();
    }

    let nearest = lines[idx - 1].trim();
    if nearest.starts_with("(*") && nearest.ends_with("*)") {
        if nearest.len() < 4 {
            return String::new();
        }
        let inner = clean_fragment(&nearest[2..nearest.len() - 2]);
        return collapse_whitespace(inner.trim_end_matches('*'));
    }

    if !nearest.ends_with("*)") {
        return String::new();
    }

    // Multi-line block, collected bottom-up from its closing line.
    let mut fragments: Vec<&str> = Vec::new();
    let mut body = &nearest[..nearest.len() - 2];

    loop {
        if let Some(open) = body.rfind("(*") {
            fragments.push(clean_fragment(&body[open + 2..]));
            break;
        }
        fragments.push(clean_fragment(body));

        idx -= 1;
        if idx == 0 {
            // Unterminated block: no opening line above.
            return String::new();
        }
        body = lines[idx - 1].trim();
        if body.ends_with("*)") {
            // Closes an earlier comment, so this block has no opening line.
            return String::new();
        }
    }

    let ordered: Vec<&str> = fragments
        .into_iter()
        .rev()
        .filter(|f| !f.is_empty())
        .collect();
    collapse_whitespace(&ordered.join(" "))
}
