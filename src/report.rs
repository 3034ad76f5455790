//! Report pipeline: plans the chart set for the cross-location overview and
//! for each location, then writes it out.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analyzers::{
    GroupKey, distribution, eating_time_by_experience, experience_by, filter_by, summarize,
    summarize_in_order,
};
use crate::config::{LocationSpec, ReportConfig};
use crate::normalizer::{NormalizedRecord, RatingField};
use crate::output::SummaryRow;
use crate::render::{self, Chart};

/// A chart paired with the file name it is written to.
#[derive(Debug, Clone)]
pub struct PlannedChart {
    pub file_name: String,
    pub chart: Chart,
}

impl PlannedChart {
    fn new(file_name: String, chart: Chart) -> Self {
        Self { file_name, chart }
    }
}

/// What a run produced, logged as JSON when it finishes.
#[derive(Debug, Serialize)]
pub struct ReportManifest {
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub records: usize,
    pub charts: Vec<String>,
}

impl ReportManifest {
    pub fn new(input: &Path, records: usize, charts: &[PathBuf]) -> Self {
        Self {
            generated_at: Utc::now(),
            input: input.display().to_string(),
            records,
            charts: charts.iter().map(|p| p.display().to_string()).collect(),
        }
    }
}

/// Per-location summary rows in configured order.
pub fn location_summaries(records: &[NormalizedRecord], config: &ReportConfig) -> Vec<SummaryRow> {
    summarize_in_order(records, GroupKey::Location, &config.location_names())
        .iter()
        .map(|(name, summary)| SummaryRow::new(name, summary))
        .collect()
}

/// One bar chart per rating field comparing every configured location.
pub fn overview_charts(
    records: &[NormalizedRecord],
    config: &ReportConfig,
) -> Result<Vec<PlannedChart>> {
    let summaries = summarize_in_order(records, GroupKey::Location, &config.location_names());
    let colors = config
        .locations
        .iter()
        .map(LocationSpec::rgb)
        .collect::<Result<Vec<_>>>()?;

    Ok(RatingField::ALL
        .iter()
        .map(|&field| {
            PlannedChart::new(
                format!("{}_rating.png", field.slug()),
                render::location_comparison(field, &summaries, &colors),
            )
        })
        .collect())
}

/// The five charts describing a single location.
///
/// A location with no records still gets its charts; they are simply empty.
pub fn location_charts(records: &[NormalizedRecord], location: &LocationSpec) -> Vec<PlannedChart> {
    let subset = filter_by(records, GroupKey::Location, &location.name);
    if subset.is_empty() {
        warn!(location = %location.name, "No feedback for location");
    }

    let display = location_display_name(location);
    let slug = &location.slug;

    vec![
        PlannedChart::new(
            format!("average_ratings_{slug}.png"),
            render::average_ratings(display, &summarize(&subset)),
        ),
        PlannedChart::new(
            format!("rating_distribution_{slug}.png"),
            render::rating_distribution(display, &distribution(&subset), location.colormap),
        ),
        PlannedChart::new(
            format!("eating_time_experience_{slug}.png"),
            render::eating_time_experience(display, &eating_time_by_experience(&subset)),
        ),
        PlannedChart::new(
            format!("party_size_experience_{slug}.png"),
            render::experience_histogram(
                display,
                GroupKey::PartySize.label(),
                &experience_by(&subset, GroupKey::PartySize),
            ),
        ),
        PlannedChart::new(
            format!("price_rating_experience_{slug}.png"),
            render::experience_histogram(
                display,
                GroupKey::PriceTier.label(),
                &experience_by(&subset, GroupKey::PriceTier),
            ),
        ),
    ]
}

/// "Denver, CO" is titled "Denver".
fn location_display_name(location: &LocationSpec) -> &str {
    location
        .name
        .split(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(&location.name)
}

/// Renders every planned chart into `out_dir`, creating it if needed.
#[tracing::instrument(skip_all, fields(out_dir = %out_dir.display(), charts = charts.len()))]
pub fn write_charts(charts: &[PlannedChart], out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(charts.len());
    for planned in charts {
        let path = out_dir.join(&planned.file_name);
        render::render(&planned.chart, &path)?;
        written.push(path);
    }

    info!(count = written.len(), "Charts written");
    Ok(written)
}

/// Overview charts for all locations.
#[tracing::instrument(skip_all)]
pub fn overview_report(
    records: &[NormalizedRecord],
    config: &ReportConfig,
) -> Result<Vec<PathBuf>> {
    write_charts(&overview_charts(records, config)?, &config.output_dir)
}

/// Charts for one location.
#[tracing::instrument(skip_all, fields(location = %location.name))]
pub fn location_report(
    records: &[NormalizedRecord],
    location: &LocationSpec,
    config: &ReportConfig,
) -> Result<Vec<PathBuf>> {
    write_charts(&location_charts(records, location), &config.output_dir)
}

/// Overview plus a report for every configured location.
#[tracing::instrument(skip_all)]
pub fn full_report(records: &[NormalizedRecord], config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let mut written = overview_report(records, config)?;
    for location in &config.locations {
        written.extend(location_report(records, location, config)?);
    }
    Ok(written)
}
