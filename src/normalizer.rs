//! Ordinal normalization of survey answers.
//!
//! Star ratings ("4 Stars") and the three word scales are mapped onto 1..=5.
//! Anything that does not match yields `None`; there is no default value.

use serde::Serialize;

use crate::loader::FeedbackRecord;

/// Price labels, cheapest first. Position + 1 is the ordinal.
pub static PRICE_SCALE: [&str; 5] =
    ["Very Cheap", "Cheap", "Average", "Expensive", "Very Expensive"];

/// Cleanliness labels, dirtiest first.
pub static CLEANLINESS_SCALE: [&str; 5] = ["Very Dirty", "Dirty", "Neutral", "Clean", "Very Clean"];

/// Overall experience labels, worst first.
pub static EXPERIENCE_SCALE: [&str; 5] = ["Very Bad", "Bad", "Neutral", "Good", "Excellent"];

/// How a raw answer is encoded in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKind {
    StarText,
    PriceScale,
    CleanlinessScale,
    ExperienceScale,
}

impl RatingKind {
    fn scale(self) -> Option<&'static [&'static str; 5]> {
        match self {
            RatingKind::StarText => None,
            RatingKind::PriceScale => Some(&PRICE_SCALE),
            RatingKind::CleanlinessScale => Some(&CLEANLINESS_SCALE),
            RatingKind::ExperienceScale => Some(&EXPERIENCE_SCALE),
        }
    }
}

/// The six rating columns of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RatingField {
    #[serde(rename = "Food Rating")]
    Food,
    #[serde(rename = "Drink Rating")]
    Drink,
    #[serde(rename = "Service Rating")]
    Service,
    #[serde(rename = "Price Rating")]
    Price,
    #[serde(rename = "Cleanliness Rating")]
    Cleanliness,
    #[serde(rename = "Overall Experience")]
    OverallExperience,
}

impl RatingField {
    pub const ALL: [RatingField; 6] = [
        RatingField::Food,
        RatingField::Drink,
        RatingField::Service,
        RatingField::Price,
        RatingField::Cleanliness,
        RatingField::OverallExperience,
    ];

    /// Column header in the export, also used as chart label.
    pub fn label(self) -> &'static str {
        match self {
            RatingField::Food => "Food Rating",
            RatingField::Drink => "Drink Rating",
            RatingField::Service => "Service Rating",
            RatingField::Price => "Price Rating",
            RatingField::Cleanliness => "Cleanliness Rating",
            RatingField::OverallExperience => "Overall Experience",
        }
    }

    /// Lowercase, underscore separated label for file names.
    pub fn slug(self) -> String {
        self.label().replace(' ', "_").to_lowercase()
    }

    pub fn kind(self) -> RatingKind {
        match self {
            RatingField::Food | RatingField::Drink | RatingField::Service => RatingKind::StarText,
            RatingField::Price => RatingKind::PriceScale,
            RatingField::Cleanliness => RatingKind::CleanlinessScale,
            RatingField::OverallExperience => RatingKind::ExperienceScale,
        }
    }
}

/// Normalizes one raw answer. `None` in, `None` out.
pub fn normalize(raw: Option<&str>, kind: RatingKind) -> Option<u8> {
    let raw = raw?.trim();
    match kind.scale() {
        None => parse_star_text(raw),
        Some(labels) => labels
            .iter()
            .position(|label| *label == raw)
            .map(|idx| idx as u8 + 1),
    }
}

/// Parses `"<n> Star"` or `"<n> Stars"`.
///
/// Any `n` that fits a `u8` is accepted as is; negative or larger numbers
/// are treated as missing, like any other unreadable answer.
pub fn parse_star_text(raw: &str) -> Option<u8> {
    let mut tokens = raw.split_whitespace();
    let n = tokens.next()?.parse::<u8>().ok()?;
    match (tokens.next(), tokens.next()) {
        (Some("Star" | "Stars"), None) => Some(n),
        _ => None,
    }
}

/// Inverse of the word-scale mapping, for legends and group names.
pub fn scale_label(kind: RatingKind, value: u8) -> Option<&'static str> {
    let labels = kind.scale()?;
    let idx = usize::from(value).checked_sub(1)?;
    labels.get(idx).copied()
}

/// A feedback record with every rating reduced to its ordinal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    pub location: String,
    pub food: Option<u8>,
    pub drink: Option<u8>,
    pub service: Option<u8>,
    pub price: Option<u8>,
    pub cleanliness: Option<u8>,
    pub experience: Option<u8>,
    pub eating_time: Option<String>,
    pub party_size: Option<String>,
}

impl NormalizedRecord {
    pub fn from_raw(raw: &FeedbackRecord) -> Self {
        let n = |value: &Option<String>, field: RatingField| {
            normalize(value.as_deref(), field.kind())
        };

        NormalizedRecord {
            location: raw.location.trim().to_string(),
            food: n(&raw.food_rating, RatingField::Food),
            drink: n(&raw.drink_rating, RatingField::Drink),
            service: n(&raw.service_rating, RatingField::Service),
            price: n(&raw.price_rating, RatingField::Price),
            cleanliness: n(&raw.cleanliness_rating, RatingField::Cleanliness),
            experience: n(&raw.overall_experience, RatingField::OverallExperience),
            eating_time: non_empty(&raw.eating_time),
            party_size: non_empty(&raw.party_size),
        }
    }

    pub fn rating(&self, field: RatingField) -> Option<u8> {
        match field {
            RatingField::Food => self.food,
            RatingField::Drink => self.drink,
            RatingField::Service => self.service,
            RatingField::Price => self.price,
            RatingField::Cleanliness => self.cleanliness,
            RatingField::OverallExperience => self.experience,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalizes a whole table, preserving row order.
pub fn normalize_all(records: &[FeedbackRecord]) -> Vec<NormalizedRecord> {
    records.iter().map(NormalizedRecord::from_raw).collect()
}
