//! Backend-independent chart descriptions and the builders that derive them
//! from aggregates.

use plotters::style::RGBColor;

use crate::analyzers::{CrossTab, DistributionTable, LocationSummary};
use crate::normalizer::RatingField;
use crate::render::palette::{self, Colormap, EXPERIENCE_BUCKET_COLORS};

/// Headroom above the tallest bar, leaving space for annotations.
const HEADROOM: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One bar per category per series, side by side.
    Bar,
    /// Series stacked on top of each other within a category.
    StackedBar,
    /// Counts per bin, one dodged bar per series.
    Histogram,
}

/// How bar values are written on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Two decimals above the bar.
    Mean,
    /// Integer count; above the bar, or centred on a stacked segment.
    Count,
}

impl Annotation {
    pub fn format(self, value: f64) -> String {
        match self {
            Annotation::Mean => format!("{value:.2}"),
            Annotation::Count => format!("{}", value.round() as i64),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// One color for the whole series, or one per category.
    pub colors: Vec<RGBColor>,
    /// One entry per category. `None` draws nothing.
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn color_at(&self, i: usize) -> RGBColor {
        if self.colors.is_empty() {
            return palette::categorical(0);
        }
        self.colors[i % self.colors.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub size: (u32, u32),
    pub annotation: Annotation,
}

impl Chart {
    /// Upper bound of the value axis. Finite and positive for any input.
    pub fn value_ceiling(&self) -> f64 {
        let peak = match self.kind {
            ChartKind::StackedBar => (0..self.categories.len())
                .map(|i| {
                    self.series
                        .iter()
                        .filter_map(|s| s.values.get(i).copied().flatten())
                        .filter(|v| v.is_finite() && *v > 0.0)
                        .sum::<f64>()
                })
                .fold(0.0, f64::max),
            ChartKind::Bar | ChartKind::Histogram => self
                .series
                .iter()
                .flat_map(|s| s.values.iter().copied().flatten())
                .filter(|v| v.is_finite())
                .fold(0.0, f64::max),
        };

        if peak > 0.0 { peak * HEADROOM } else { 1.0 }
    }

    /// Shows a legend only when there is more than one series to tell apart.
    pub fn has_legend(&self) -> bool {
        self.series.len() > 1
    }
}

/// One field's mean at each location, each bar in its location's color.
pub fn location_comparison(
    field: RatingField,
    summaries: &[(String, LocationSummary)],
    colors: &[RGBColor],
) -> Chart {
    Chart {
        kind: ChartKind::Bar,
        title: format!("{} by Location", field.label()),
        x_label: "Location".to_string(),
        y_label: "Average Rating".to_string(),
        categories: summaries.iter().map(|(name, _)| name.clone()).collect(),
        series: vec![Series {
            name: field.label().to_string(),
            colors: colors.to_vec(),
            values: summaries.iter().map(|(_, s)| s.mean(field)).collect(),
        }],
        size: (800, 600),
        annotation: Annotation::Mean,
    }
}

/// Every field's mean for a single location.
pub fn average_ratings(location: &str, summary: &LocationSummary) -> Chart {
    Chart {
        kind: ChartKind::Bar,
        title: format!("Average Ratings Overview - {location}"),
        x_label: "Rating Category".to_string(),
        y_label: "Average Rating".to_string(),
        categories: RatingField::ALL.iter().map(|f| f.label().to_string()).collect(),
        series: vec![Series {
            name: "Average".to_string(),
            colors: Colormap::Viridis.sample(RatingField::ALL.len()),
            values: RatingField::ALL.iter().map(|f| summary.mean(*f)).collect(),
        }],
        size: (800, 600),
        annotation: Annotation::Mean,
    }
}

/// Per-field star distribution, one stacked segment per ordinal value.
pub fn rating_distribution(location: &str, table: &DistributionTable, colormap: Colormap) -> Chart {
    let values = table.values();
    let colors = colormap.sample(values.len());

    let series = values
        .iter()
        .zip(colors)
        .map(|(&value, color)| Series {
            name: format!("{value} Stars"),
            colors: vec![color],
            values: RatingField::ALL
                .iter()
                .map(|f| Some(table.count(*f, value) as f64))
                .collect(),
        })
        .collect();

    Chart {
        kind: ChartKind::StackedBar,
        title: format!("Rating Distributions by Category - {location}"),
        x_label: "Rating Category".to_string(),
        y_label: "Number of Ratings".to_string(),
        categories: RatingField::ALL.iter().map(|f| f.label().to_string()).collect(),
        series,
        size: (1000, 600),
        annotation: Annotation::Count,
    }
}

/// Eating time against experience bucket, stacked.
pub fn eating_time_experience(location: &str, table: &CrossTab) -> Chart {
    Chart {
        kind: ChartKind::StackedBar,
        title: format!("Overall Experience by Eating Time (Stacked) - {location}"),
        x_label: "Eating Time".to_string(),
        y_label: "Number of Feedbacks".to_string(),
        categories: table.rows.clone(),
        series: crosstab_series(table, |i| {
            EXPERIENCE_BUCKET_COLORS[i % EXPERIENCE_BUCKET_COLORS.len()]
        }),
        size: (800, 600),
        annotation: Annotation::Count,
    }
}

/// Experience score histogram with one dodged bar per `hue` value.
///
/// `table` rows are the experience bins, columns the hue values.
pub fn experience_histogram(location: &str, hue_label: &str, table: &CrossTab) -> Chart {
    Chart {
        kind: ChartKind::Histogram,
        title: format!("Experience Rating Distribution by {hue_label} - {location}"),
        x_label: "Overall Experience".to_string(),
        y_label: "Count".to_string(),
        categories: table.rows.clone(),
        series: crosstab_series(table, palette::categorical),
        size: (800, 500),
        annotation: Annotation::Count,
    }
}

fn crosstab_series(table: &CrossTab, color: impl Fn(usize) -> RGBColor) -> Vec<Series> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(c, name)| Series {
            name: name.clone(),
            colors: vec![color(c)],
            values: table.counts.iter().map(|row| Some(row[c] as f64)).collect(),
        })
        .collect()
}
