//! Data types produced by the aggregation step.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::normalizer::{NormalizedRecord, RatingField, RatingKind, normalize, scale_label};

/// Mean and non-missing count of one rating field within a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FieldSummary {
    /// `None` when the group has no usable value for the field.
    pub mean: Option<f64>,
    pub count: usize,
}

/// Per-field means for one group of records (usually one location).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationSummary {
    pub responses: usize,
    pub fields: BTreeMap<RatingField, FieldSummary>,
}

impl LocationSummary {
    /// A summary with no responses; every mean is undefined.
    pub fn empty() -> Self {
        LocationSummary {
            responses: 0,
            fields: RatingField::ALL
                .iter()
                .map(|f| (*f, FieldSummary::default()))
                .collect(),
        }
    }

    pub fn mean(&self, field: RatingField) -> Option<f64> {
        self.fields.get(&field).and_then(|s| s.mean)
    }
}

/// Occurrence counts of every ordinal value, per rating field.
///
/// Values 1..=5 are always present. Missing answers are counted apart so
/// that `total(field) + missing(field)` equals the number of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionTable {
    pub counts: BTreeMap<RatingField, BTreeMap<u8, usize>>,
    pub missing: BTreeMap<RatingField, usize>,
}

impl DistributionTable {
    pub fn count(&self, field: RatingField, value: u8) -> usize {
        self.counts
            .get(&field)
            .and_then(|c| c.get(&value))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self, field: RatingField) -> usize {
        self.counts.get(&field).map(|c| c.values().sum()).unwrap_or(0)
    }

    pub fn missing(&self, field: RatingField) -> usize {
        self.missing.get(&field).copied().unwrap_or(0)
    }

    /// Every ordinal seen in any field, ascending. Always includes 1..=5.
    pub fn values(&self) -> Vec<u8> {
        let mut values: Vec<u8> = self
            .counts
            .values()
            .flat_map(|c| c.keys().copied())
            .chain(1..=5)
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}

/// Count matrix between two categorical dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn get(&self, row: &str, column: &str) -> Option<usize> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        Some(self.counts[r][c])
    }

    pub fn row_total(&self, row: &str) -> usize {
        self.rows
            .iter()
            .position(|x| x == row)
            .map(|r| self.counts[r].iter().sum())
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Low/high split of the overall experience score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExperienceBucket {
    Low,
    High,
}

impl ExperienceBucket {
    pub const ALL: [ExperienceBucket; 2] = [ExperienceBucket::Low, ExperienceBucket::High];

    /// Experience at or below 3 is low. Missing experience has no bucket.
    pub fn from_rating(experience: Option<u8>) -> Option<Self> {
        experience.map(|x| if x <= 3 { ExperienceBucket::Low } else { ExperienceBucket::High })
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceBucket::Low => "1-3 Stars",
            ExperienceBucket::High => "4-5 Stars",
        }
    }
}

/// Categorical dimensions records can be grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Location,
    EatingTime,
    PartySize,
    PriceTier,
}

impl GroupKey {
    pub fn label(self) -> &'static str {
        match self {
            GroupKey::Location => "Location",
            GroupKey::EatingTime => "Eating Time",
            GroupKey::PartySize => "Party Size",
            GroupKey::PriceTier => "Price Rating",
        }
    }

    /// The record's value for this key, if it has one.
    pub fn value_of(self, record: &NormalizedRecord) -> Option<String> {
        match self {
            GroupKey::Location => Some(record.location.clone()),
            GroupKey::EatingTime => record.eating_time.clone(),
            GroupKey::PartySize => record.party_size.clone(),
            GroupKey::PriceTier => record
                .price
                .and_then(|p| scale_label(RatingKind::PriceScale, p))
                .map(str::to_string),
        }
    }

    /// Sorts distinct key values for display.
    ///
    /// Price tiers follow the price scale; everything else sorts numerically
    /// where possible, then lexically.
    pub fn sort_values(self, values: &mut [String]) {
        match self {
            GroupKey::PriceTier => values.sort_by_key(|v| {
                normalize(Some(v.as_str()), RatingKind::PriceScale).unwrap_or(u8::MAX)
            }),
            _ => values.sort_by(|a, b| {
                match (a.parse::<f64>(), b.parse::<f64>()) {
                    (Ok(x), Ok(y)) => x.total_cmp(&y),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => a.cmp(b),
                }
            }),
        }
    }
}
