use crate::analyzers::types::{FieldSummary, GroupKey, LocationSummary};
use crate::analyzers::utility::mean_present;
use crate::normalizer::{NormalizedRecord, RatingField};
use std::collections::BTreeMap;
use tracing::debug;

/// Summarizes a set of records into per-field means.
///
/// Missing ratings are left out of both the sum and the count, so a field
/// with no usable value has an undefined mean rather than zero.
pub fn summarize(records: &[&NormalizedRecord]) -> LocationSummary {
    let fields = RatingField::ALL
        .iter()
        .map(|&field| {
            let values = records.iter().map(|r| r.rating(field));
            let summary = FieldSummary {
                mean: mean_present(values.clone()),
                count: values.flatten().count(),
            };
            (field, summary)
        })
        .collect();

    LocationSummary {
        responses: records.len(),
        fields,
    }
}

/// Partitions records by `key`. Records without a value for the key are dropped.
pub fn group_by(
    records: &[NormalizedRecord],
    key: GroupKey,
) -> BTreeMap<String, Vec<&NormalizedRecord>> {
    let mut groups: BTreeMap<String, Vec<&NormalizedRecord>> = BTreeMap::new();
    for record in records {
        if let Some(value) = key.value_of(record) {
            groups.entry(value).or_default().push(record);
        }
    }
    groups
}

/// Records whose `key` value equals `value`.
pub fn filter_by<'a>(
    records: &'a [NormalizedRecord],
    key: GroupKey,
    value: &str,
) -> Vec<&'a NormalizedRecord> {
    records
        .iter()
        .filter(|r| key.value_of(r).as_deref() == Some(value))
        .collect()
}

/// Per-group summaries in the given order.
///
/// Groups named in `order` but absent from the data get an empty summary;
/// groups present in the data but not named are left out.
pub fn summarize_in_order(
    records: &[NormalizedRecord],
    key: GroupKey,
    order: &[&str],
) -> Vec<(String, LocationSummary)> {
    let groups = group_by(records, key);
    debug!(key = key.label(), groups = groups.len(), "Records grouped");

    order
        .iter()
        .map(|&name| {
            let summary = groups
                .get(name)
                .map(|members| summarize(members))
                .unwrap_or_else(LocationSummary::empty);
            (name.to_string(), summary)
        })
        .collect()
}
