//! Aggregation of normalized feedback.
//!
//! Groups records by location or another categorical key, computes per-field
//! means that skip missing answers, value distributions, and cross-tabulations
//! against the overall experience score.

pub mod aggregate;
pub mod crosstab;
pub mod distribution;
pub mod types;
pub mod utility;

pub use aggregate::{filter_by, group_by, summarize, summarize_in_order};
pub use crosstab::{EATING_TIME_ORDER, cross_tabulate, eating_time_by_experience, experience_by};
pub use distribution::distribution;
pub use types::{
    CrossTab, DistributionTable, ExperienceBucket, FieldSummary, GroupKey, LocationSummary,
};
