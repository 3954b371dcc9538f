//! Parallel, deterministic discovery and loading of `.v` source files.
//!
//! - Early directory pruning via `WalkDir::filter_entry` (O(1) subtree skip)
//! - Parallel reads via Rayon; output order follows the sorted path list
//! - Unreadable files become [`SkippedFile`] entries, never errors

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Directories pruned by default (VCS metadata and build output).
pub const EXCLUDED_DIRS: &[&str] = &[".git", "_build", "_opam", "target", "node_modules"];

/// Maximum file size to load (10 MB).
const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// A loaded source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to its source root, forward slashes.
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A file (or root) left out of the corpus, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything read from a set of roots.
#[derive(Debug, Clone, Default)]
pub struct SourceLoad {
    pub files: Vec<SourceFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Outcome of reading one file.
#[derive(Debug)]
pub enum LoadResult {
    Ok(SourceFile),
    /// Read failed (logged, can be skipped)
    Skipped(PathBuf, String),
}

/// Normalize a path string to use forward slashes consistently.
#[inline]
pub fn normalize_path_string(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert a Path to a normalized string (forward slashes).
#[inline]
pub fn path_to_normalized_string(path: &Path) -> String {
    normalize_path_string(&path.display().to_string())
}

/// Checks if a directory entry should be pruned (excluded from traversal).
///
/// The walk root itself is never pruned.
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Gathers all `.v` files under `root`, sorted.
///
/// Combines [`EXCLUDED_DIRS`] with `excludes` into one lookup set.
pub fn gather_v_files(root: &Path, excludes: &[&str]) -> Result<Vec<PathBuf>> {
    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if e.file_type().is_file() && path.extension().is_some_and(|ext| ext == "v") {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Failed to gather .v files from {}", root.display()))?;

    // par_bridge does not preserve walk order
    files.sort();
    Ok(files)
}

/// Reads one file, reporting it relative to `root`.
pub fn load_source(root: &Path, path: &Path) -> LoadResult {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return LoadResult::Skipped(path.to_path_buf(), format!("I/O error: {}", e)),
    };

    if content.len() > MAX_FILE_SIZE {
        return LoadResult::Skipped(
            path.to_path_buf(),
            format!("File too large ({} bytes, max {})", content.len(), MAX_FILE_SIZE),
        );
    }

    let relative = path.strip_prefix(root).unwrap_or(path);
    debug!(file = %relative.display(), bytes = content.len(), "loaded source");
    LoadResult::Ok(SourceFile::new(path_to_normalized_string(relative), content))
}

/// Discovers and reads every `.v` file under each root, in root order.
///
/// Missing roots and unreadable files are reported in `skipped`; only a
/// failing directory walk is an error.
pub fn load_sources(roots: &[PathBuf], excludes: &[&str]) -> Result<SourceLoad> {
    let mut load = SourceLoad::default();

    for root in roots {
        if !root.is_dir() {
            warn!(root = %root.display(), "directory not found");
            load.skipped.push(SkippedFile {
                path: root.clone(),
                reason: "directory not found".to_string(),
            });
            continue;
        }

        let paths = gather_v_files(root, excludes)?;
        let results: Vec<LoadResult> = paths.par_iter().map(|p| load_source(root, p)).collect();

        for result in results {
            match result {
                LoadResult::Ok(file) => load.files.push(file),
                LoadResult::Skipped(path, reason) => {
                    warn!(file = %path.display(), %reason, "skipping file");
                    load.skipped.push(SkippedFile { path, reason });
                }
            }
        }
    }

    info!(files = load.files.len(), skipped = load.skipped.len(), "loaded sources");
    Ok(load)
}
