//! CLI entry point for the feedback report tool.
//!
//! Loads the customer feedback export, normalizes the ratings and writes the
//! overview and per-location charts.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use feedback_report::{
    config::ReportConfig,
    loader::load_feedback,
    normalizer::{NormalizedRecord, RatingField, normalize_all},
    output::{print_json, print_pretty, write_csv},
    report::{ReportManifest, full_report, location_report, location_summaries, overview_report},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "feedback-report")]
#[command(about = "Charts restaurant customer feedback by location", long_about = None)]
struct Cli {
    /// Feedback CSV export to read
    #[arg(short, long, global = true, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory to write charts into
    #[arg(short, long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// JSON report config (locations, colors, colormaps)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Overview charts plus a report for every location (default)
    All,
    /// One chart per rating comparing all locations
    Overview,
    /// Charts for a single location
    Location {
        /// Location name ("Denver, CO") or slug ("denver")
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Write the per-location average table as CSV
    Summary {
        /// CSV file to write
        #[arg(long, default_value = "location_summary.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/feedback_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("feedback_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    debug!(?config, "Report config resolved");

    let raw = load_feedback(&config.input)?;
    let records = normalize_all(&raw);
    log_missing(&records);

    let charts = match cli.command.unwrap_or(Commands::All) {
        Commands::All => full_report(&records, &config)?,
        Commands::Overview => overview_report(&records, &config)?,
        Commands::Location { name } => {
            let location = config.find_location(&name).ok_or_else(|| {
                anyhow!(
                    "unknown location {name:?}; configured: {}",
                    config.location_names().join(" | ")
                )
            })?;
            location_report(&records, location, &config)?
        }
        Commands::Summary { output } => {
            let rows = location_summaries(&records, &config);
            print_pretty(&rows);
            print_json(&rows)?;
            write_csv(&output, &rows)
                .with_context(|| format!("failed to write summary {}", output.display()))?;
            info!(path = %output.display(), "Summary written");
            return Ok(());
        }
    };

    print_json(&ReportManifest::new(&config.input, records.len(), &charts))?;
    Ok(())
}

/// Built-in defaults, then the config file, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = output_dir.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Reports how many answers per field could not be normalized.
fn log_missing(records: &[NormalizedRecord]) {
    for field in RatingField::ALL {
        let missing = records.iter().filter(|r| r.rating(field).is_none()).count();
        if missing > 0 {
            info!(
                field = field.label(),
                missing,
                total = records.len(),
                "Unusable ratings treated as missing"
            );
        }
    }
}
