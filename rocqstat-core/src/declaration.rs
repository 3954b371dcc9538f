//! Declaration records: the core's output contract.
//!
//! A [`Declaration`] is created once per scan of a file. Only the two
//! graph-derived fields (`uses`, `used_by`) are filled in later, by the
//! dependency phase over the whole corpus.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{IoResultExt, RocqstatError, RocqstatResult};

/// Declaration keywords recognised at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeclKind {
    Lemma,
    Theorem,
    Corollary,
    Proposition,
    Fact,
    Remark,
}

impl DeclKind {
    /// All kinds, in the order they appear in the declaration pattern.
    pub const ALL: [DeclKind; 6] = [
        Self::Lemma,
        Self::Theorem,
        Self::Corollary,
        Self::Proposition,
        Self::Fact,
        Self::Remark,
    ];

    /// The source keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lemma => "Lemma",
            Self::Theorem => "Theorem",
            Self::Corollary => "Corollary",
            Self::Proposition => "Proposition",
            Self::Fact => "Fact",
            Self::Remark => "Remark",
        }
    }

    /// Theorem-grade kinds are always classified as primary results.
    pub fn is_theorem_grade(&self) -> bool {
        matches!(self, Self::Theorem)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclKind {
    type Err = RocqstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| RocqstatError::invalid_argument(format!("unknown declaration kind: {s}")))
    }
}

/// Derived role of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Theorem-grade or explicitly marked as a main result.
    Primary,
    /// Everything else.
    #[default]
    Supporting,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Supporting => "supporting",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verbatim proof text between the opening keyword and the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofBody {
    /// Lines joined with `\n`, comments retained.
    pub text: String,
    /// Non-blank, non-comment-only lines in the span (at least 1).
    pub line_count: usize,
    /// 0-based index of the first line of the span.
    pub start: usize,
    /// True when the span ended at a cap or the next declaration instead of
    /// a terminator keyword.
    pub truncated: bool,
}

/// One matched lemma-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Path of origin, relative to its source root.
    pub file: String,
    /// Innermost enclosing section, `Top-level` if none.
    pub section: String,
    pub name: String,
    pub kind: DeclKind,
    /// 1-based line of the declaration keyword.
    #[serde(default)]
    pub line: usize,
    pub signature: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub proof_line_count: usize,
    #[serde(default)]
    pub role: Role,
    /// Names referenced by this declaration's proof, sorted, self excluded.
    #[serde(default)]
    pub uses: Vec<String>,
    /// Names of declarations whose `uses` contains this name, sorted.
    #[serde(default)]
    pub used_by: Vec<String>,
    /// Retained for the dependency phase; not part of exports.
    #[serde(skip)]
    pub proof: Option<ProofBody>,
}

impl Declaration {
    /// The retained proof text, empty if no proof boundary was found.
    pub fn proof_text(&self) -> &str {
        self.proof.as_ref().map_or("", |p| p.text.as_str())
    }

    pub fn is_primary(&self) -> bool {
        self.role == Role::Primary
    }
}

/// Reads declarations from a JSON export written by [`write_declarations`].
///
/// Proof text is not part of exports; use
/// [`rehydrate_proofs`](crate::depgraph::rehydrate_proofs) to recover it.
pub fn load_declarations(path: &Path) -> RocqstatResult<Vec<Declaration>> {
    let content = fs::read_to_string(path).with_path(path)?;
    serde_json::from_str(&content).map_err(|e| RocqstatError::deserialize(path, e.to_string()))
}

/// Writes declarations as pretty JSON.
pub fn write_declarations(path: &Path, decls: &[Declaration]) -> RocqstatResult<()> {
    let json = serde_json::to_string_pretty(decls).map_err(|e| RocqstatError::Internal {
        message: format!("JSON serialization failed: {e}"),
    })?;
    fs::write(path, json).with_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Declaration {
        Declaration {
            file: "theories/Nat.v".to_string(),
            section: "Top-level".to_string(),
            name: "add_comm".to_string(),
            kind: DeclKind::Theorem,
            line: 4,
            signature: "Theorem add_comm : forall n m, n + m = m + n.".to_string(),
            description: "commutativity".to_string(),
            proof_line_count: 3,
            role: Role::Primary,
            uses: vec!["add_succ".to_string()],
            used_by: Vec::new(),
            proof: Some(ProofBody {
                text: "Proof.\n  auto.\nQed.".to_string(),
                line_count: 3,
                start: 4,
                truncated: false,
            }),
        }
    }

    #[test]
    fn test_kind_round_trip_through_keyword() {
        for kind in DeclKind::ALL {
            assert_eq!(kind.as_str().parse::<DeclKind>().unwrap(), kind);
        }
        assert!("Definition".parse::<DeclKind>().is_err());
    }

    #[test]
    fn test_only_theorem_is_theorem_grade() {
        let grade: Vec<_> = DeclKind::ALL.into_iter().filter(DeclKind::is_theorem_grade).collect();
        assert_eq!(grade, vec![DeclKind::Theorem]);
    }

    #[test]
    fn test_json_uses_camel_case_and_skips_proof() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["proofLineCount"], 3);
        assert_eq!(json["usedBy"], serde_json::json!([]));
        assert_eq!(json["role"], "primary");
        assert_eq!(json["kind"], "Theorem");
        assert!(json.get("proof").is_none());
    }

    #[test]
    fn test_export_and_reload_drops_proof() {
        let dir = std::env::temp_dir().join(format!("rocqstat_decl_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("export.json");

        write_declarations(&path, &[sample()]).unwrap();
        let loaded = load_declarations(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "add_comm");
        assert!(loaded[0].proof.is_none());
        assert_eq!(loaded[0].proof_text(), "");
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = std::env::temp_dir().join(format!("rocqstat_decl_bad_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_declarations(&path).unwrap_err();
        assert!(matches!(err, RocqstatError::Deserialize { .. }));
    }
}
