//! Output formatting and persistence for aggregated feedback.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::LocationSummary;
use crate::normalizer::RatingField;

/// One line of the per-location summary export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub location: String,
    pub responses: usize,
    pub food_rating: Option<f64>,
    pub drink_rating: Option<f64>,
    pub service_rating: Option<f64>,
    pub price_rating: Option<f64>,
    pub cleanliness_rating: Option<f64>,
    pub overall_experience: Option<f64>,
}

impl SummaryRow {
    pub fn new(location: &str, summary: &LocationSummary) -> Self {
        SummaryRow {
            location: location.to_string(),
            responses: summary.responses,
            food_rating: summary.mean(RatingField::Food),
            drink_rating: summary.mean(RatingField::Drink),
            service_rating: summary.mean(RatingField::Service),
            price_rating: summary.mean(RatingField::Price),
            cleanliness_rating: summary.mean(RatingField::Cleanliness),
            overall_experience: summary.mean(RatingField::OverallExperience),
        }
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes rows to a fresh CSV file at `path`, header first.
///
/// An existing file is replaced. Undefined means are written as empty cells.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV");

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::FieldSummary;
    use std::fs;
    use tempfile::tempdir;

    fn summary() -> LocationSummary {
        let mut s = LocationSummary::empty();
        s.responses = 3;
        s.fields.insert(RatingField::Food, FieldSummary { mean: Some(4.5), count: 2 });
        s
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&summary());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&summary()).unwrap();
    }

    #[test]
    fn test_summary_row_from_summary() {
        let row = SummaryRow::new("Boise, ID", &summary());
        assert_eq!(row.responses, 3);
        assert_eq!(row.food_rating, Some(4.5));
        assert_eq!(row.drink_rating, None);
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let rows = vec![
            SummaryRow::new("Boise, ID", &summary()),
            SummaryRow::new("Reno, NV", &LocationSummary::empty()),
        ];
        write_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("location,responses,food_rating"));
        assert_eq!(lines[1], "\"Boise, ID\",3,4.5,,,,,");
        assert_eq!(lines[2], "\"Reno, NV\",0,,,,,,");
    }

    #[test]
    fn test_write_csv_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let rows = vec![SummaryRow::new("Boise, ID", &summary())];
        write_csv(&path, &rows).unwrap();
        write_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("location")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 2);
    }
}
