//! CLI entry point for the dataset cleaning pipeline.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use table_tidy::{CleaningResult, Pipeline, TableLoader, frame::write_csv};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a delimited dataset with a fixed policy",
    long_about = "Loads a CSV/TSV file, normalizes headers, drops empty rows and columns,\n\
                  trims text, coerces mostly-numeric columns, imputes missing values,\n\
                  removes duplicates, and caps outliers.\n\n\
                  EXAMPLES:\n  \
                  # Clean a file into cleaned.csv\n  \
                  table-tidy -i data.csv\n\n  \
                  # Write elsewhere and print what each stage did\n  \
                  table-tidy -i data.csv -o out.csv --summary\n\n  \
                  # Machine-readable summary\n  \
                  table-tidy -i data.csv --json | jq .rows_after"
)]
struct Args {
    /// Path to the delimited file to clean
    #[arg(short, long)]
    input: String,

    /// Path of the cleaned CSV file
    #[arg(short, long, default_value = "cleaned.csv")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Print the cleaning summary as JSON to stdout
    ///
    /// Disables all logs so stdout holds only the JSON document.
    #[arg(long)]
    json: bool,

    /// Print a human-readable per-stage summary
    #[arg(long)]
    summary: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout holds only JSON.
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
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let bytes =
        std::fs::read(&args.input).with_context(|| format!("Failed to read {}", args.input))?;
    let table = TableLoader::new().load(&bytes)?;
    info!("Dataset loaded successfully: {:?}", table.shape());

    let result = Pipeline::new().process(table);

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output))?;
    let mut writer = BufWriter::new(file);
    write_csv(&result.table, &mut writer)?;
    writer.flush()?;
    info!("Cleaned dataset saved: {}", args.output);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
    } else if args.summary {
        print_summary(&result, &args);
    }

    Ok(())
}

/// Print a human-readable summary of the cleaning run.
fn print_summary(result: &CleaningResult, args: &Args) {
    let summary = &result.summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        args.input, summary.rows_before, summary.columns_before
    );
    println!(
        "Output: {} ({} rows x {} columns)",
        args.output, summary.rows_after, summary.columns_after
    );
    println!();

    println!("Started: {}", summary.started_at);
    println!("Duration: {}ms", summary.duration_ms);
    println!(
        "Rows: {} -> {} ({} removed)",
        summary.rows_before, summary.rows_after, summary.rows_removed
    );
    println!(
        "Columns: {} -> {} ({} removed)",
        summary.columns_before, summary.columns_after, summary.columns_removed
    );
    println!();

    println!("Columns:");
    for column in result.table.columns() {
        println!("  {:<30} {}", column.name(), column.kind().as_str());
    }
    println!();

    for report in &summary.stages {
        println!(
            "{}. {} -> {} rows x {} columns",
            report.stage.step(),
            report.stage.display_name(),
            report.rows_after,
            report.columns_after
        );
        for action in &report.actions {
            println!("  - {}", action);
        }
    }
    println!("{}", "=".repeat(80));
}
