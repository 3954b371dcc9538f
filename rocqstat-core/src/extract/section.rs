//! Section scope tracking.
//!
//! The stack starts with an implicit `Top-level` entry that is never popped.
//! Any `End <name>.` pops the innermost section; the name is not checked.

use crate::common::patterns;

/// Name reported for declarations outside every section.
pub const TOP_LEVEL: &str = "Top-level";

/// What a line did to the scope stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeEvent {
    Opened(String),
    /// `popped` is `None` when the close had nothing to pop.
    Closed { name: String, popped: Option<String> },
}

/// Stack of open sections for one file.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    stack: Vec<String>,
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionTracker {
    pub fn new() -> Self {
        Self {
            stack: vec![TOP_LEVEL.to_string()],
        }
    }

    /// Applies a line to the stack. Returns `None` if the line is not a scope marker.
    pub fn observe(&mut self, line: &str) -> Option<ScopeEvent> {
        if let Some(caps) = patterns::section_open().captures(line) {
            let name = caps[1].to_string();
            self.stack.push(name.clone());
            return Some(ScopeEvent::Opened(name));
        }

        if let Some(caps) = patterns::section_close().captures(line) {
            let popped = if self.stack.len() > 1 {
                self.stack.pop()
            } else {
                None
            };
            return Some(ScopeEvent::Closed {
                name: caps[1].to_string(),
                popped,
            });
        }

        None
    }

    /// Innermost open scope.
    pub fn current(&self) -> &str {
        self.stack.last().map_or(TOP_LEVEL, String::as_str)
    }

    /// Number of open named sections (0 at top level).
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Full stack, outermost first, `Top-level` included.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_top_level() {
        let t = SectionTracker::new();
        assert_eq!(t.current(), TOP_LEVEL);
        assert_eq!(t.depth(), 0);
    }

    #[test]
    fn test_nested_sections() {
        let mut t = SectionTracker::new();
        assert_eq!(t.observe("Section Outer."), Some(ScopeEvent::Opened("Outer".into())));
        t.observe("  Section Inner.");
        assert_eq!(t.current(), "Inner");
        assert_eq!(t.depth(), 2);
        t.observe("End Inner.");
        assert_eq!(t.current(), "Outer");
    }

    #[test]
    fn test_unmatched_close_is_noop() {
        let mut t = SectionTracker::new();
        let event = t.observe("End Ghost.");
        assert_eq!(
            event,
            Some(ScopeEvent::Closed {
                name: "Ghost".into(),
                popped: None
            })
        );
        assert_eq!(t.stack(), [TOP_LEVEL.to_string()]);
    }

    #[test]
    fn test_mismatched_name_still_pops_innermost() {
        let mut t = SectionTracker::new();
        t.observe("Section A.");
        t.observe("Section B.");
        t.observe("End A.");
        assert_eq!(t.current(), "A");
    }

    #[test]
    fn test_non_marker_lines_ignored() {
        let mut t = SectionTracker::new();
        assert_eq!(t.observe("Lemma x : True."), None);
        assert_eq!(t.observe("(* Section Fake. *)"), None);
        assert_eq!(t.depth(), 0);
    }
}
