//! Output formatting: declaration tables, dependency listings, statistics.
//!
//! Every renderer returns a `String`; `main` decides where it goes.

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde_json::json;

use rocqstat_core::{AnalysisResult, Declaration, GraphTraversal};

/// Output format for tables and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Tsv,
    Json,
    /// Graphviz; only meaningful for the dependency graph.
    Dot,
}

/// Escapes a cell for a Markdown table.
fn md_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Flattens a cell for TSV.
fn tsv_cell(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}

// ============================================================================
// Declaration table
// ============================================================================

/// One row per declaration: file, section, name, kind, proof lines,
/// signature, description.
pub fn render_table(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    let decls = &result.declarations;
    match format {
        OutputFormat::Markdown => Ok(table_markdown(decls)),
        OutputFormat::Tsv => Ok(table_tsv(decls)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(decls).context("JSON serialization failed")
        }
        OutputFormat::Dot => Ok(result.graph().to_dot()),
    }
}

fn table_markdown(decls: &[Declaration]) -> String {
    let mut lines = vec![
        "| File | Section | Name | Kind | Lines | Signature | Description |".to_string(),
        "|------|---------|------|------|------:|-----------|-------------|".to_string(),
    ];
    for d in decls {
        lines.push(format!(
            "| {} | {} | `{}` | {} | {} | `{}` | {} |",
            d.file,
            d.section,
            d.name,
            d.kind,
            d.proof_line_count,
            md_cell(&d.signature),
            md_cell(&d.description)
        ));
    }
    lines.join("\n")
}

fn table_tsv(decls: &[Declaration]) -> String {
    let mut lines = vec!["File\tSection\tName\tKind\tProofLines\tSignature\tDescription".to_string()];
    for d in decls {
        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            d.file,
            d.section,
            d.name,
            d.kind,
            d.proof_line_count,
            tsv_cell(&d.signature),
            tsv_cell(&d.description)
        ));
    }
    lines.join("\n")
}

// ============================================================================
// Dependency listing
// ============================================================================

/// One row per declaration with its `uses` list.
pub fn render_deps(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    let decls = &result.declarations;
    match format {
        OutputFormat::Markdown => {
            let mut lines = vec![
                "| Lemma | File | Section | Dependencies |".to_string(),
                "|-------|------|---------|--------------|".to_string(),
            ];
            for d in decls {
                let deps = if d.uses.is_empty() {
                    "-".to_string()
                } else {
                    d.uses
                        .iter()
                        .map(|u| format!("`{u}`"))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                lines.push(format!("| `{}` | {} | {} | {} |", d.name, d.file, d.section, deps));
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Tsv => {
            let mut lines = vec!["Lemma\tFile\tSection\tDependencies\tDep_Count".to_string()];
            for d in decls {
                lines.push(format!(
                    "{}\t{}\t{}\t{}\t{}",
                    d.name,
                    d.file,
                    d.section,
                    d.uses.join(", "),
                    d.uses.len()
                ));
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => {
            let rows: Vec<_> = decls
                .iter()
                .map(|d| json!({ "name": d.name, "uses": d.uses, "usedBy": d.used_by }))
                .collect();
            serde_json::to_string_pretty(&rows).context("JSON serialization failed")
        }
        OutputFormat::Dot => Ok(result.graph().to_dot()),
    }
}

// ============================================================================
// Statistics and detail
// ============================================================================

pub fn render_stats(result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    let graph_stats = result.graph().stats();
    let s = &result.stats;

    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(&json!({
            "corpus": s,
            "graph": graph_stats,
            "skipped": result.skipped.len(),
            "warnings": result.warnings.len(),
        }))
        .context("JSON serialization failed");
    }

    let rows = [
        ("Declarations", s.total_declarations),
        ("Files", s.total_files),
        ("Primary", s.primary),
        ("Supporting", s.supporting),
        ("Theorems", s.theorems),
        ("Dependencies", s.total_dependencies),
        ("Max dependencies", s.max_dependencies),
        ("Cycles", graph_stats.cycles),
        ("Orphans", graph_stats.orphans),
        ("Skipped files", result.skipped.len()),
        ("Warnings", result.warnings.len()),
    ];

    let out = match format {
        OutputFormat::Tsv => rows
            .iter()
            .map(|(k, v)| format!("{k}\t{v}"))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => {
            let mut lines = vec!["| Statistic | Value |".to_string(), "|-----------|------:|".to_string()];
            lines.extend(rows.iter().map(|(k, v)| format!("| {k} | {v} |")));
            lines.join("\n")
        }
    };
    Ok(out)
}

/// Detail view of one declaration, resolved by name.
pub fn render_detail(result: &AnalysisResult, name: &str, format: OutputFormat) -> Result<String> {
    let graph = result.graph();
    let d = graph
        .get(name)
        .ok_or_else(|| anyhow!("Unknown declaration: {name}"))?;
    let transitive: Vec<&str> = {
        let mut all: Vec<&str> = graph.descendants(&d.name.as_str()).into_iter().collect();
        all.sort_unstable();
        all
    };

    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(&json!({
            "declaration": d,
            "transitiveUses": transitive,
        }))
        .context("JSON serialization failed");
    }

    let list = |names: &[String]| {
        if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        }
    };

    let mut out = format!("{} {}\n", d.kind, d.name);
    out.push_str(&format!("  file:        {}:{}\n", d.file, d.line));
    out.push_str(&format!("  section:     {}\n", d.section));
    out.push_str(&format!("  role:        {}\n", d.role));
    if !d.description.is_empty() {
        out.push_str(&format!("  description: {}\n", d.description));
    }
    out.push_str(&format!("  signature:   {}\n", d.signature));
    out.push_str(&format!("  proof lines: {}\n", d.proof_line_count));
    out.push_str(&format!("  uses:        {}\n", list(&d.uses)));
    out.push_str(&format!("  used by:     {}\n", list(&d.used_by)));
    out.push_str(&format!("  depends on:  {} declaration(s) transitively", transitive.len()));
    Ok(out)
}
