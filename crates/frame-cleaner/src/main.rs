//! CLI entry point for the table cleaner.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use frame_cleaner::{
    CleanerConfig, CleaningReport, DataCleaner, DatasetAnalysis, load_dataset, save_dataset,
};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a tabular dataset: fill gaps, drop duplicates, fix column types",
    long_about = "Cleans a CSV or JSON dataset in three stages:\n\n  \
                  1. Fill missing values (mean for numeric columns, mode otherwise)\n  \
                  2. Remove duplicate rows, keeping the first occurrence\n  \
                  3. Convert string columns to numbers or dates when every value fits\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG    Overrides --log-level (may be set in .env)\n\n\
                  EXAMPLES:\n  \
                  # Clean and print a summary\n  \
                  frame-cleaner -i data.csv\n\n  \
                  # Write the cleaned table as JSON\n  \
                  frame-cleaner -i data.csv -o cleaned.json\n\n  \
                  # Machine-readable report and analysis\n  \
                  frame-cleaner -i data.csv --json | jq .report"
)]
struct Args {
    /// Path to the CSV or JSON file to clean
    #[arg(short, long)]
    input: String,

    /// Where to write the cleaned table (.csv or .json)
    ///
    /// If not specified, nothing is written
    #[arg(short, long)]
    output: Option<String>,

    /// Skip missing-value imputation
    #[arg(long)]
    no_impute: bool,

    /// Keep duplicate rows
    #[arg(long)]
    no_dedup: bool,

    /// Skip string column type conversion
    #[arg(long)]
    no_coerce: bool,

    /// Print an analysis of the cleaned table
    ///
    /// Column types, missing values, descriptive statistics and correlations
    #[arg(long)]
    analyze: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; prints `{ "report": ..., "analysis": ... }`.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,
}

/// JSON document printed with `--json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a CleaningReport,
    analysis: &'a DatasetAnalysis,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Load .env first so RUST_LOG from it reaches the filter
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = CleanerConfig::builder()
        .impute_missing(!args.no_impute)
        .remove_duplicates(!args.no_dedup)
        .coerce_types(!args.no_coerce)
        .build()?;

    let data = load_dataset(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let (mut cleaned, report) = match DataCleaner::new(config).clean_with_report(&data) {
        Ok(result) => result,
        Err(e) => {
            error!("Cleaning failed: {}", e);
            return Err(anyhow!("Cleaning failed: {}", e));
        }
    };

    if let Some(ref output) = args.output {
        save_dataset(&mut cleaned, output)
            .with_context(|| format!("Failed to write cleaned dataset to {}", output))?;
    }

    if args.json {
        let analysis = DatasetAnalysis::analyze(&cleaned)?;
        let out = JsonOutput {
            report: &report,
            analysis: &analysis,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_report(&report, &args);

    if args.analyze {
        let analysis = DatasetAnalysis::analyze(&cleaned)?;
        print_analysis(&analysis);
    }

    Ok(())
}

/// Print a human-readable summary of the cleaning run.
///
/// Uses `println!` rather than logging so it shows regardless of log level.
fn print_report(report: &CleaningReport, args: &Args) {
    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!("  Input:    {}", args.input);
    if let Some(ref output) = args.output {
        println!("  Output:   {}", output);
    }
    println!(
        "  Rows:     {} -> {} ({} duplicate(s) removed)",
        report.rows_before, report.rows_after, report.duplicates_removed
    );
    println!("  Columns:  {}", report.columns);
    println!("  Imputed:  {} cell(s)", report.cells_imputed());
    println!("  Duration: {} ms", report.duration_ms);
    println!();

    println!("ACTIONS");
    println!("{}", "-".repeat(40));
    for line in report.action_lines() {
        println!("  - {}", line);
    }
    println!();
}

fn print_analysis(analysis: &DatasetAnalysis) {
    println!("COLUMN TYPES");
    println!("{}", "-".repeat(40));
    println!("{:<20} {:<16} {:<10} {:<10}", "Column", "Type", "Missing", "Missing %");
    println!("{}", "-".repeat(60));
    for (ty, missing) in analysis
        .column_types
        .iter()
        .zip(analysis.missing_values.iter())
    {
        println!(
            "{:<20} {:<16} {:<10} {:<10.1}",
            truncate_str(&ty.column, 19),
            ty.dtype,
            missing.missing,
            missing.percentage
        );
    }
    println!();

    if !analysis.numeric_summaries.is_empty() {
        println!("DESCRIPTIVE STATISTICS");
        println!("{}", "-".repeat(40));
        println!(
            "{:<20} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        );
        for s in &analysis.numeric_summaries {
            println!(
                "{:<20} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
                truncate_str(&s.column, 19),
                s.count,
                fmt_stat(s.mean),
                fmt_stat(s.std),
                fmt_stat(s.min),
                fmt_stat(s.q25),
                fmt_stat(s.median),
                fmt_stat(s.q75),
                fmt_stat(s.max)
            );
        }
        println!();
    }

    if !analysis.unique_counts.is_empty() {
        println!("UNIQUE VALUES");
        println!("{}", "-".repeat(40));
        for u in &analysis.unique_counts {
            println!("  {:<20} {}", truncate_str(&u.column, 19), u.unique);
        }
        println!();
    }

    println!("CORRELATIONS");
    println!("{}", "-".repeat(40));
    match &analysis.correlations {
        Some(corr) => {
            print!("{:<20}", "");
            for name in &corr.columns {
                print!(" {:>10}", truncate_str(name, 10));
            }
            println!();
            for (name, row) in corr.columns.iter().zip(corr.values.iter()) {
                print!("{:<20}", truncate_str(name, 19));
                for value in row {
                    print!(" {:>10}", fmt_stat(*value));
                }
                println!();
            }
        }
        None => println!("  Not enough numeric columns to compute a correlation matrix"),
    }
    println!();
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

/// Truncate a string to a maximum length, adding "..." if truncated.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
