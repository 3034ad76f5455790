use crate::analyzers::types::DistributionTable;
use crate::normalizer::{NormalizedRecord, RatingField};
use std::collections::BTreeMap;

/// Counts how often each ordinal value occurs in each rating field.
pub fn distribution(records: &[&NormalizedRecord]) -> DistributionTable {
    let mut table = DistributionTable::default();

    for field in RatingField::ALL {
        let mut counts: BTreeMap<u8, usize> = (1..=5).map(|v| (v, 0)).collect();
        let mut missing = 0;

        for record in records {
            match record.rating(field) {
                Some(value) => *counts.entry(value).or_default() += 1,
                None => missing += 1,
            }
        }

        table.counts.insert(field, counts);
        table.missing.insert(field, missing);
    }

    table
}
