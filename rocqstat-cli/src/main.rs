//! rocqstat CLI - declaration statistics and dependency listings for Rocq/Coq projects.
//!
//! Features:
//! - Multi-root scanning with directory pruning
//! - Rayon-powered parallel extraction
//! - Markdown / TSV / JSON tables, Graphviz DOT dependency graphs
//! - JSON export and relinking against current sources

mod report;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use rocqstat_core::{
    init_structured_logging, load_config, load_config_file, load_declarations, write_declarations,
    AnalysisResult, CommentMode, Rocqstat, RocqstatConfig,
};

use report::{render_deps, render_detail, render_stats, render_table, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lemma statistics and dependency analysis for Rocq/Coq sources")]
pub struct Cli {
    /// Directories containing .v files
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Output format (default: markdown, or [output] format in rocqstat.toml)
    #[arg(long, short = 'f', value_enum)]
    format: Option<OutputFormat>,

    /// List dependencies (uses) instead of the declaration table
    #[arg(long)]
    deps: bool,

    /// Print corpus statistics
    #[arg(long)]
    stats: bool,

    /// Show one declaration with its dependencies
    #[arg(long, value_name = "NAME")]
    show: Option<String>,

    /// Marker words that make a declaration primary (replaces the defaults)
    #[arg(long = "marker", num_args = 1..)]
    markers: Vec<String>,

    /// Directory names to skip
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Strip nested comments with a depth counter
    #[arg(long)]
    nested_comments: bool,

    /// Relink declarations from a previous JSON export instead of rescanning
    #[arg(long, value_name = "FILE")]
    from_json: Option<PathBuf>,

    /// Write declarations (JSON) to a file for later --from-json runs
    #[arg(long, value_name = "FILE")]
    export: Option<String>,

    /// Config file (default: rocqstat.toml in the first path)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<String>,
}

/// Security: Validates output file paths to prevent path traversal attacks.
///
/// Rejects:
/// - Absolute paths (must be relative to current directory)
/// - Paths containing `..` (parent directory traversal)
/// - Paths with null bytes (injection attacks)
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }

    if p.components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(anyhow!(
            "Path traversal (..) not allowed in output paths: {}",
            path
        ));
    }

    Ok(p)
}

/// Loads --config, or rocqstat.toml from the first root if present.
fn load_cli_config(cli: &Cli) -> Result<Option<RocqstatConfig>> {
    match &cli.config {
        Some(path) => load_config_file(path).map(Some),
        None => match cli.paths.first() {
            Some(root) if root.is_dir() => load_config(root),
            _ => Ok(None),
        },
    }
}

/// CLI flag, then config file, then markdown.
fn resolve_format(cli: &Cli, config: Option<&RocqstatConfig>) -> Result<OutputFormat> {
    if let Some(format) = cli.format {
        return Ok(format);
    }
    let configured = config
        .and_then(|c| c.output.as_ref())
        .and_then(|o| o.format.as_deref());
    match configured {
        Some(name) => OutputFormat::from_str(name, true)
            .map_err(|_| anyhow!("Unknown output format in config: {name}")),
        None => Ok(OutputFormat::default()),
    }
}

/// Builder with config applied first and command-line flags on top.
fn build_analyzer(cli: &Cli, config: Option<&RocqstatConfig>) -> Rocqstat {
    let mut roots = cli.paths.iter();
    let first = roots.next().cloned().unwrap_or_else(|| PathBuf::from("."));
    let mut builder = roots.fold(Rocqstat::new(first), |b, root| b.add_root(root));

    if let Some(config) = config {
        builder = builder.with_config(config);
    }
    builder = builder.exclude_dirs(cli.exclude.iter().cloned());
    if !cli.markers.is_empty() {
        builder = builder.marker_words(cli.markers.iter().cloned());
    }
    if cli.nested_comments {
        builder = builder.comment_mode(CommentMode::Nested);
    }
    builder
}

/// Fails when the corpus yields no declarations at all.
fn run_analysis(cli: &Cli, builder: &Rocqstat) -> Result<AnalysisResult> {
    let result = match &cli.from_json {
        Some(path) => {
            let decls = load_declarations(path)
                .with_context(|| format!("Failed to load export: {}", path.display()))?;
            builder.relink(decls)?
        }
        None => builder.analyze()?,
    };
    if result.declarations.is_empty() {
        for skipped in &result.skipped {
            eprintln!("[WARN] Skipped {}: {}", skipped.path.display(), skipped.reason);
        }
        bail!("No declarations found");
    }
    Ok(result)
}

fn render(cli: &Cli, result: &AnalysisResult, format: OutputFormat) -> Result<String> {
    if let Some(name) = &cli.show {
        render_detail(result, name, format)
    } else if cli.stats {
        render_stats(result, format)
    } else if cli.deps {
        render_deps(result, format)
    } else {
        render_table(result, format)
    }
}

/// Reports skipped inputs and graph warnings on stderr.
fn print_diagnostics(result: &AnalysisResult) {
    for skipped in &result.skipped {
        eprintln!("[WARN] Skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    for warning in &result.warnings {
        eprintln!("[WARN] {}", warning);
    }
    eprintln!(
        "# Total: {} declarations in {} files",
        result.stats.total_declarations, result.stats.total_files
    );
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] rocqstat internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
    }));

    // Structured logging (JSON to stderr, respects RUST_LOG)
    init_structured_logging();

    let cli = Cli::parse();

    // Security: validate output paths before doing any work
    let output = match cli.output.as_deref().map(validate_output_path).transpose() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[ERROR] Invalid output path: {}", e);
            std::process::exit(2);
        }
    };
    let export = match cli.export.as_deref().map(validate_output_path).transpose() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[ERROR] Invalid export path: {}", e);
            std::process::exit(2);
        }
    };

    let config = load_cli_config(&cli)?;
    let format = resolve_format(&cli, config.as_ref())?;
    let builder = build_analyzer(&cli, config.as_ref());

    let result = run_analysis(&cli, &builder)?;
    print_diagnostics(&result);

    if let Some(path) = &export {
        write_declarations(path, &result.declarations)?;
        eprintln!("Declarations exported to: {}", path.display());
    }

    let rendered = render(&cli, &result, format)?;
    match &output {
        Some(path) => {
            write_output(path, &rendered)?;
            eprintln!("Output saved to: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn create_temp_dir(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir()
            .join("rocqstat_cli_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).ok();
        }
        fs::create_dir_all(&temp_dir).unwrap();
        temp_dir
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rocqstat").chain(args.iter().copied())).unwrap()
    }

    // --- validate_output_path TESTS ---

    #[test]
    fn test_validate_output_path_accepts_relative() {
        assert_eq!(
            validate_output_path("out/lemmas.md").unwrap(),
            PathBuf::from("out/lemmas.md")
        );
    }

    #[test]
    fn test_validate_output_path_rejects_traversal_and_absolute() {
        assert!(validate_output_path("../lemmas.md").is_err());
        assert!(validate_output_path("out/../../x.md").is_err());
        assert!(validate_output_path("/tmp/x.md").is_err());
        assert!(validate_output_path("bad\0name").is_err());
    }

    // --- argument parsing TESTS ---

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.paths, vec![PathBuf::from(".")]);
        assert!(cli.format.is_none());
        assert!(!cli.deps && !cli.stats && !cli.nested_comments);
    }

    #[test]
    fn test_multiple_paths_and_flags() {
        let cli = parse(&[
            "theories",
            "contrib",
            "-f",
            "tsv",
            "--marker",
            "key",
            "central",
            "--exclude",
            "drafts",
        ]);
        assert_eq!(cli.paths.len(), 2);
        assert_eq!(cli.format, Some(OutputFormat::Tsv));
        assert_eq!(cli.markers, vec!["key", "central"]);
        assert_eq!(cli.exclude, vec!["drafts"]);
    }

    // --- precedence TESTS ---

    #[test]
    fn test_format_precedence() {
        let config = RocqstatConfig {
            output: Some(rocqstat_core::OutputConfig {
                format: Some("JSON".to_string()),
            }),
            ..Default::default()
        };

        assert_eq!(resolve_format(&parse(&[]), None).unwrap(), OutputFormat::Markdown);
        assert_eq!(resolve_format(&parse(&[]), Some(&config)).unwrap(), OutputFormat::Json);
        assert_eq!(
            resolve_format(&parse(&["--format", "dot"]), Some(&config)).unwrap(),
            OutputFormat::Dot
        );

        let dot = RocqstatConfig {
            output: Some(rocqstat_core::OutputConfig {
                format: Some("dot".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(resolve_format(&parse(&[]), Some(&dot)).unwrap(), OutputFormat::Dot);

        let bad = RocqstatConfig {
            output: Some(rocqstat_core::OutputConfig {
                format: Some("csv".to_string()),
            }),
            ..Default::default()
        };
        assert!(resolve_format(&parse(&[]), Some(&bad)).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = RocqstatConfig {
            marker_words: Some(vec!["key".to_string()]),
            nested_comments: Some(false),
            ..Default::default()
        };
        let cli = parse(&["--marker", "central", "--nested-comments"]);
        let options = build_analyzer(&cli, Some(&config)).options();

        assert_eq!(options.comment_mode, CommentMode::Nested);
        assert_eq!(options.classifier.marker_words(), ["central".to_string()]);
    }

    // --- end-to-end TESTS ---

    #[test]
    fn test_run_table_and_deps() {
        let root = create_temp_dir("run");
        create_file(
            &root.join("theories/Nat.v"),
            "Lemma base : True.\nProof. exact I. Qed.\nTheorem top : True.\nProof. apply base. Qed.\n",
        );
        let root_str = root.display().to_string();

        let cli = parse(&[root_str.as_str()]);
        let result = run_analysis(&cli, &build_analyzer(&cli, None)).unwrap();
        let table = render(&cli, &result, OutputFormat::Markdown).unwrap();
        assert!(table.contains("| theories/Nat.v | Top-level | `top` | Theorem | 1 |"));

        let cli = parse(&[root_str.as_str(), "--deps"]);
        let deps = render(&cli, &result, OutputFormat::Tsv).unwrap();
        assert!(deps.contains("top\ttheories/Nat.v\tTop-level\tbase\t1"));
    }

    #[test]
    fn test_no_declarations_is_error() {
        let root = create_temp_dir("empty");
        create_file(&root.join("Notes.v"), "Require Import Arith.\n(* nothing here *)\n");
        let root_str = root.display().to_string();

        let cli = parse(&[root_str.as_str()]);
        let err = run_analysis(&cli, &build_analyzer(&cli, None)).unwrap_err();
        assert!(err.to_string().contains("No declarations found"));
    }

    #[test]
    fn test_config_file_picked_up_from_first_path() {
        let root = create_temp_dir("config");
        create_file(&root.join("rocqstat.toml"), "[output]\nformat = \"tsv\"\n");
        let root_str = root.display().to_string();
        let cli = parse(&[root_str.as_str()]);

        let config = load_cli_config(&cli).unwrap();
        assert_eq!(resolve_format(&cli, config.as_ref()).unwrap(), OutputFormat::Tsv);
    }

    #[test]
    fn test_relink_from_export_file() {
        let root = create_temp_dir("relink");
        create_file(
            &root.join("A.v"),
            "Lemma a : True.\nProof. exact I. Qed.\nLemma b : True.\nProof. apply a. Qed.\n",
        );
        let root_str = root.display().to_string();

        let cli = parse(&[root_str.as_str()]);
        let first = run_analysis(&cli, &build_analyzer(&cli, None)).unwrap();
        let export = root.join("export.json");
        write_declarations(&export, &first.declarations).unwrap();

        let export_str = export.display().to_string();
        let cli = parse(&[root_str.as_str(), "--from-json", export_str.as_str()]);
        let relinked = run_analysis(&cli, &build_analyzer(&cli, None)).unwrap();
        assert_eq!(relinked.declarations[0].used_by, vec!["b"]);
        assert!(relinked.warnings.is_empty());
    }
}
