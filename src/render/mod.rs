//! Chart rendering.
//!
//! Aggregates are first turned into a [`Chart`] description, which is then
//! drawn to a PNG with `plotters`. Only the drawing step touches the disk.

pub mod chart;
pub mod draw;
pub mod palette;

pub use chart::{
    Annotation, Chart, ChartKind, Series, average_ratings, eating_time_experience,
    experience_histogram, location_comparison, rating_distribution,
};
pub use draw::render;
pub use palette::Colormap;
