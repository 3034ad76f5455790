//! CSV loader for customer feedback exports.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns the feedback export must carry. Anything else in the header is ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Location",
    "Food Rating",
    "Drink Rating",
    "Service Rating",
    "Price Rating",
    "Cleanliness Rating",
    "Overall Experience",
    "Eating Time",
    "Party Size",
];

/// A single survey submission exactly as it appears in the export.
///
/// Empty cells deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Food Rating")]
    pub food_rating: Option<String>,
    #[serde(rename = "Drink Rating")]
    pub drink_rating: Option<String>,
    #[serde(rename = "Service Rating")]
    pub service_rating: Option<String>,
    #[serde(rename = "Price Rating")]
    pub price_rating: Option<String>,
    #[serde(rename = "Cleanliness Rating")]
    pub cleanliness_rating: Option<String>,
    #[serde(rename = "Overall Experience")]
    pub overall_experience: Option<String>,
    #[serde(rename = "Eating Time")]
    pub eating_time: Option<String>,
    #[serde(rename = "Party Size")]
    pub party_size: Option<String>,
}

/// Loads every feedback row from the CSV file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened, a required column is absent,
/// or a row has more cells than the header.
pub fn load_feedback(path: &Path) -> Result<Vec<FeedbackRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open feedback file {}", path.display()))?;
    let records = read_feedback(file)
        .with_context(|| format!("failed to read feedback file {}", path.display()))?;

    info!(path = %path.display(), records = records.len(), "Feedback loaded");
    Ok(records)
}

/// Reads feedback rows from any CSV source with a header row.
///
/// A row cut short of the header leaves its trailing fields missing.
pub fn read_feedback<R: Read>(reader: R) -> Result<Vec<FeedbackRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("failed to read CSV header")?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("feedback file is missing required columns: {}", missing.join(", "));
    }
    debug!(columns = headers.len(), "CSV header validated");

    let mut records = Vec::new();
    let mut short_rows = 0usize;
    for (idx, result) in rdr.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        let row = result.with_context(|| format!("malformed feedback row at line {line}"))?;
        if row.len() > headers.len() {
            bail!(
                "malformed feedback row at line {line}: expected {} fields, found {}",
                headers.len(),
                row.len()
            );
        }
        if row.len() < headers.len() {
            short_rows += 1;
        }
        let record: FeedbackRecord = row
            .deserialize(Some(&headers))
            .with_context(|| format!("malformed feedback row at line {line}"))?;
        records.push(record);
    }
    if short_rows > 0 {
        warn!(rows = short_rows, "Short rows read with trailing fields missing");
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Location,Food Rating,Drink Rating,Service Rating,Price Rating,Cleanliness Rating,Overall Experience,Eating Time,Party Size";

    #[test]
    fn test_read_feedback_parses_rows() {
        let data = format!(
            "{HEADER}\n\"Denver, CO\",4 Stars,3 Stars,5 Stars,Cheap,Clean,Good, Lunch ,2\n"
        );
        let records = read_feedback(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "Denver, CO");
        assert_eq!(records[0].food_rating.as_deref(), Some("4 Stars"));
        assert_eq!(records[0].price_rating.as_deref(), Some("Cheap"));
        assert_eq!(records[0].eating_time.as_deref(), Some("Lunch"));
        assert_eq!(records[0].party_size.as_deref(), Some("2"));
    }

    #[test]
    fn test_read_feedback_empty_cells_are_none() {
        let data = format!("{HEADER}\nBoise ID,,,,,,,,\n");
        let records = read_feedback(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].food_rating.is_none());
        assert!(records[0].eating_time.is_none());
        assert!(records[0].party_size.is_none());
    }

    #[test]
    fn test_read_feedback_ignores_extra_columns() {
        let data = format!("Timestamp,{HEADER}\n2024-01-01,Boise ID,1 Star,,,,,,,\n");
        let records = read_feedback(data.as_bytes()).unwrap();

        assert_eq!(records[0].location, "Boise ID");
        assert_eq!(records[0].food_rating.as_deref(), Some("1 Star"));
    }

    #[test]
    fn test_read_feedback_missing_column_is_fatal() {
        let data = "Location,Food Rating\nBoise ID,4 Stars\n";
        let err = read_feedback(data.as_bytes()).unwrap_err().to_string();

        assert!(err.contains("Drink Rating"));
        assert!(err.contains("Party Size"));
        assert!(!err.contains("Food Rating"));
    }

    #[test]
    fn test_read_feedback_short_row_fills_missing() {
        let data = format!("{HEADER}\nBoise ID,4 Stars\nBoise ID,2 Stars,3 Stars,,,,,,\n");
        let records = read_feedback(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].location, "Boise ID");
        assert_eq!(records[0].food_rating.as_deref(), Some("4 Stars"));
        assert!(records[0].drink_rating.is_none());
        assert!(records[0].overall_experience.is_none());
        assert!(records[0].party_size.is_none());
        assert_eq!(records[1].drink_rating.as_deref(), Some("3 Stars"));
    }

    #[test]
    fn test_read_feedback_long_row_is_fatal() {
        let data = format!(
            "{HEADER}\nBoise ID,,,,,,,,\nBoise ID,4 Stars,,,,,,,,extra\n"
        );
        let err = format!("{:#}", read_feedback(data.as_bytes()).unwrap_err());

        assert!(err.contains("line 3"));
        assert!(err.contains("expected 9 fields, found 10"));
    }

    #[test]
    fn test_load_feedback_missing_file() {
        let err = load_feedback(Path::new("definitely/not/here.csv"))
            .unwrap_err()
            .to_string();

        assert!(err.contains("definitely/not/here.csv"));
    }
}
