use anyhow::bail;
use clap::{Parser, Subcommand};
use lscmp_common::{AppConfig, Comparison, MatchStatus, NameEntry, Side, load_config};
use lscmp_core::{
    CsvExporter, DEFAULT_MATCHED_COLOR, DEFAULT_MISSING_COLOR, DirectoryLister, ExportFormat,
    XlsxExporter, compare, resolve_export_path,
};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const COLUMN_WIDTH: usize = 50;

#[derive(Parser)]
#[command(name = "lscmp")]
#[command(author = "lscmp Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Directory listing comparison utility", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and compare the file names in two directories
    Compare {
        /// Left directory path
        left: PathBuf,

        /// Right directory path
        right: PathBuf,

        /// Compare names case-sensitively
        #[arg(short = 's', long)]
        case_sensitive: bool,

        /// Compare names case-insensitively (the default)
        #[arg(long, conflicts_with = "case_sensitive")]
        ignore_case: bool,

        /// Ignore patterns (can be specified multiple times)
        #[arg(short, long)]
        ignore: Vec<String>,

        /// Export the comparison to a spreadsheet (.xlsx or .csv)
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Show only missing names (hide matched ones)
        #[arg(short = 'm', long)]
        missing_only: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Disable ANSI colors in output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() {
    // Initialize tracing to stderr (so JSON output can go cleanly to stdout)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            left,
            right,
            case_sensitive,
            ignore_case,
            ignore,
            export,
            missing_only,
            json,
            no_color,
        } => {
            match run_compare(
                left,
                right,
                case_sensitive,
                ignore_case,
                ignore,
                export,
                missing_only,
                json,
                no_color,
            ) {
                Ok(true) => std::process::exit(1),
                Ok(false) => {}
                Err(e) => {
                    error!("Comparison failed: {}", e);
                    std::process::exit(2);
                }
            }
        }
    }
}

fn run_compare(
    left: PathBuf,
    right: PathBuf,
    case_sensitive: bool,
    ignore_case: bool,
    ignore_patterns: Vec<String>,
    export: Option<PathBuf>,
    missing_only: bool,
    json: bool,
    no_color: bool,
) -> anyhow::Result<bool> {
    // Validate paths
    if !left.is_dir() {
        bail!("Left path is not a directory: {}", left.display());
    }
    if !right.is_dir() {
        bail!("Right path is not a directory: {}", right.display());
    }

    info!("Comparing:");
    info!("  Left:  {}", left.display());
    info!("  Right: {}", right.display());

    let loaded = load_config(false)?;
    let mut config = loaded.config;

    if !ignore_patterns.is_empty() {
        config.ignore_patterns.extend(ignore_patterns);
    }
    if case_sensitive {
        config.case_sensitive = true;
    } else if ignore_case {
        config.case_sensitive = false;
    }
    let case_sensitive = config.case_sensitive;

    let lister = DirectoryLister::new(config.clone());

    info!("Listing left directory...");
    let left_names = lister.list(&left)?;
    info!("Found {} names in left directory", left_names.len());

    info!("Listing right directory...");
    let right_names = lister.list(&right)?;
    info!("Found {} names in right directory", right_names.len());

    let comparison = compare(&left_names, &right_names, case_sensitive);

    if let Some(export_path) = export {
        export_comparison(&export_path, &comparison, &config)?;
    }

    if json {
        let report = build_json_report(&left, &right, &comparison, case_sensitive, missing_only);
        let output = serde_json::to_string_pretty(&report)?;
        println!("{output}");
        return Ok(comparison.has_missing());
    }

    render_comparison(&comparison, missing_only, no_color);

    Ok(comparison.has_missing())
}

fn export_comparison(
    path: &Path,
    comparison: &Comparison,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let (resolved, format) = resolve_export_path(path);

    match format {
        ExportFormat::Xlsx => {
            let matched = config
                .matched_color
                .as_deref()
                .unwrap_or(DEFAULT_MATCHED_COLOR);
            let missing = config
                .missing_color
                .as_deref()
                .unwrap_or(DEFAULT_MISSING_COLOR);
            let exporter = XlsxExporter::new().with_colors(matched, missing)?;
            exporter.export(&resolved, &comparison.left, &comparison.right)?;
        }
        ExportFormat::Csv => {
            CsvExporter::new().export(&resolved, &comparison.left, &comparison.right)?;
        }
    }

    info!("Exported comparison to {}", resolved.display());
    Ok(())
}

fn render_comparison(comparison: &Comparison, missing_only: bool, no_color: bool) {
    let use_color = !no_color && std::io::stdout().is_terminal();

    println!("\n{}", "=".repeat(120));
    println!("Comparison Results (Side-by-Side)");
    println!("{}", "=".repeat(120));
    println!(
        "{:^6} {:<width$}  {:^6} {:<width$}",
        "",
        "Left",
        "",
        "Right",
        width = COLUMN_WIDTH
    );
    println!("{}", "-".repeat(120));

    // Each column is filtered independently, matching the JSON report
    let left_rows = visible_entries(comparison.entries(Side::Left), missing_only);
    let right_rows = visible_entries(comparison.entries(Side::Right), missing_only);

    let rows = left_rows.len().max(right_rows.len());
    for i in 0..rows {
        println!(
            "{}  {}",
            format_cell(left_rows.get(i).copied(), use_color),
            format_cell(right_rows.get(i).copied(), use_color)
        );
    }
    println!("{}", "=".repeat(120));

    println!("\n{}", "=".repeat(80));
    let matched_mark = if use_color { "\x1b[32m(==)\x1b[0m" } else { "(==)" };
    let left_mark = if use_color { "\x1b[31m(<<)\x1b[0m" } else { "(<<)" };
    let right_mark = if use_color { "\x1b[31m(>>)\x1b[0m" } else { "(>>)" };

    println!("Summary:");
    println!(
        "  Matched:        {} {}",
        comparison.summary.matched, matched_mark
    );
    println!(
        "  Only in left:   {} {}",
        comparison.summary.left_missing, left_mark
    );
    println!(
        "  Only in right:  {} {}",
        comparison.summary.right_missing, right_mark
    );
    println!(
        "  Left:  {} names found, {} missing",
        comparison.summary.matched,
        comparison.summary.missing(Side::Left)
    );
    println!(
        "  Right: {} names found, {} missing",
        comparison.summary.matched,
        comparison.summary.missing(Side::Right)
    );
    println!("{}", "=".repeat(80));
}

fn visible_entries(entries: &[NameEntry], missing_only: bool) -> Vec<&NameEntry> {
    entries
        .iter()
        .filter(|e| !missing_only || e.status == MatchStatus::Missing)
        .collect()
}

/// One formatted column cell: a colored status marker followed by the name.
/// Color codes wrap only the marker so the padded name field stays aligned.
fn format_cell(entry: Option<&NameEntry>, use_color: bool) -> String {
    let entry = match entry {
        Some(entry) => entry,
        None => return format!("{:^6} {:<width$}", "", "", width = COLUMN_WIDTH),
    };

    let marker = status_marker(entry.side, entry.status);
    let (color, reset) = if use_color {
        (status_color(entry.status), "\x1b[0m")
    } else {
        ("", "")
    };

    format!(
        "{}{:^6}{} {:<width$}",
        color,
        marker,
        reset,
        truncate_name(&entry.name, COLUMN_WIDTH),
        width = COLUMN_WIDTH
    )
}

fn status_marker(side: Side, status: MatchStatus) -> &'static str {
    match (side, status) {
        (_, MatchStatus::Matched) => "==",
        (Side::Left, MatchStatus::Missing) => "<<",
        (Side::Right, MatchStatus::Missing) => ">>",
    }
}

fn status_color(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Matched => "\x1b[32m", // Green
        MatchStatus::Missing => "\x1b[31m", // Red
    }
}

fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }

    // Keep the end of the name (extension) visible
    let prefix = "...";
    let keep_len = max_len.saturating_sub(prefix.len());

    // Use char indices to avoid splitting UTF-8 characters
    let skip_count = name.chars().count().saturating_sub(keep_len);
    let suffix: String = name.chars().skip(skip_count).collect();

    format!("{}{}", prefix, suffix)
}

#[derive(Serialize)]
struct JsonReport {
    left: String,
    right: String,
    case_sensitive: bool,
    summary: JsonSummary,
    left_entries: Vec<JsonEntry>,
    right_entries: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonSummary {
    matched: usize,
    left_missing: usize,
    right_missing: usize,
}

#[derive(Serialize)]
struct JsonEntry {
    name: String,
    status: MatchStatus,
}

fn build_json_report(
    left: &Path,
    right: &Path,
    comparison: &Comparison,
    case_sensitive: bool,
    missing_only: bool,
) -> JsonReport {
    JsonReport {
        left: left.to_string_lossy().to_string(),
        right: right.to_string_lossy().to_string(),
        case_sensitive,
        summary: JsonSummary {
            matched: comparison.summary.matched,
            left_missing: comparison.summary.left_missing,
            right_missing: comparison.summary.right_missing,
        },
        left_entries: json_entries(&comparison.left, missing_only),
        right_entries: json_entries(&comparison.right, missing_only),
    }
}

fn json_entries(entries: &[NameEntry], missing_only: bool) -> Vec<JsonEntry> {
    visible_entries(entries, missing_only)
        .into_iter()
        .map(|e| JsonEntry {
            name: e.name.clone(),
            status: e.status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_status_marker() {
        assert_eq!(status_marker(Side::Left, MatchStatus::Matched), "==");
        assert_eq!(status_marker(Side::Right, MatchStatus::Matched), "==");
        assert_eq!(status_marker(Side::Left, MatchStatus::Missing), "<<");
        assert_eq!(status_marker(Side::Right, MatchStatus::Missing), ">>");
    }

    #[test]
    fn test_visible_entries_filters_matched() {
        let entries = vec![
            NameEntry::new("kept.txt", Side::Left, MatchStatus::Missing),
            NameEntry::new("hidden.txt", Side::Left, MatchStatus::Matched),
        ];

        let all = visible_entries(&entries, false);
        assert_eq!(all.len(), 2);

        let missing = visible_entries(&entries, true);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "kept.txt");
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("short.txt", 50), "short.txt");
    }

    #[test]
    fn test_truncate_name_long() {
        let long = "a".repeat(60) + ".txt";
        let truncated = truncate_name(&long, 50);

        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with(".txt"));
    }

    #[test]
    fn test_truncate_name_multibyte() {
        let long = "ü".repeat(60);
        let truncated = truncate_name(&long, 50);

        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.starts_with("..."));
    }

    #[test]
    fn test_build_json_report_basic() {
        let left_names = names(&["same.txt", "left_only.txt"]);
        let right_names = names(&["same.txt", "right_only.txt"]);
        let comparison = compare(&left_names, &right_names, true);

        let report = build_json_report(
            Path::new("/left"),
            Path::new("/right"),
            &comparison,
            true,
            false,
        );

        assert_eq!(report.left, "/left");
        assert_eq!(report.right, "/right");
        assert!(report.case_sensitive);
        assert_eq!(report.summary.matched, 1);
        assert_eq!(report.summary.left_missing, 1);
        assert_eq!(report.summary.right_missing, 1);
        assert_eq!(report.left_entries.len(), 2);
        assert_eq!(report.right_entries.len(), 2);
    }

    #[test]
    fn test_build_json_report_missing_only() {
        let left_names = names(&["same.txt", "left_only.txt"]);
        let right_names = names(&["same.txt"]);
        let comparison = compare(&left_names, &right_names, true);

        let report = build_json_report(
            Path::new("/left"),
            Path::new("/right"),
            &comparison,
            true,
            true,
        );

        // Summary still counts all, but entries only carry missing names
        assert_eq!(report.summary.matched, 1);
        assert_eq!(report.left_entries.len(), 1);
        assert_eq!(report.left_entries[0].name, "left_only.txt");
        assert!(report.right_entries.is_empty());
    }

    #[test]
    fn test_json_status_serialization() {
        let entry = JsonEntry {
            name: "a.txt".to_string(),
            status: MatchStatus::Matched,
        };
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["name"], "a.txt");
        assert_eq!(value["status"], "Matched");
    }

    #[test]
    fn test_format_cell_blank_for_absent_entry() {
        let cell = format_cell(None, false);

        assert_eq!(cell.trim(), "");
        assert_eq!(cell.chars().count(), 6 + 1 + COLUMN_WIDTH);
    }

    #[test]
    fn test_format_cell_plain() {
        let entry = NameEntry::new("a.txt", Side::Left, MatchStatus::Missing);
        let cell = format_cell(Some(&entry), false);

        assert!(cell.contains("<<"));
        assert!(cell.contains("a.txt"));
        assert!(!cell.contains("\x1b["));
    }

    #[test]
    fn test_format_cell_colored() {
        let entry = NameEntry::new("a.txt", Side::Right, MatchStatus::Matched);
        let cell = format_cell(Some(&entry), true);

        assert!(cell.contains("\x1b[32m"));
        assert!(cell.contains("\x1b[0m"));
        assert!(cell.contains("=="));
    }
}
