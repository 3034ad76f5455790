use crate::analyzers::types::{CrossTab, ExperienceBucket, GroupKey};
use crate::normalizer::NormalizedRecord;

/// Canonical row order for eating-time breakdowns.
pub static EATING_TIME_ORDER: [&str; 5] = ["Breakfast", "Brunch", "Lunch", "Dinner", "Take-Out"];

/// Counts co-occurrences of two dimensions.
///
/// Rows and columns come out exactly in the given orders; a record is counted
/// only when both of its values are present and listed.
pub fn cross_tabulate<R, C>(
    records: &[&NormalizedRecord],
    row_of: R,
    column_of: C,
    rows: &[String],
    columns: &[String],
) -> CrossTab
where
    R: Fn(&NormalizedRecord) -> Option<String>,
    C: Fn(&NormalizedRecord) -> Option<String>,
{
    let mut counts = vec![vec![0usize; columns.len()]; rows.len()];

    for &record in records {
        let (Some(row), Some(column)) = (row_of(record), column_of(record)) else {
            continue;
        };
        let r = rows.iter().position(|x| *x == row);
        let c = columns.iter().position(|x| *x == column);
        if let (Some(r), Some(c)) = (r, c) {
            counts[r][c] += 1;
        }
    }

    CrossTab {
        rows: rows.to_vec(),
        columns: columns.to_vec(),
        counts,
    }
}

/// Eating time against low/high experience, rows in [`EATING_TIME_ORDER`].
pub fn eating_time_by_experience(records: &[&NormalizedRecord]) -> CrossTab {
    let rows: Vec<String> = EATING_TIME_ORDER.iter().map(|s| s.to_string()).collect();
    let columns: Vec<String> = ExperienceBucket::ALL
        .iter()
        .map(|b| b.label().to_string())
        .collect();

    cross_tabulate(
        records,
        |r| r.eating_time.clone(),
        |r| ExperienceBucket::from_rating(r.experience).map(|b| b.label().to_string()),
        &rows,
        &columns,
    )
}

/// Experience score (rows 1..=5) against every value of `hue` present in the data.
pub fn experience_by(records: &[&NormalizedRecord], hue: GroupKey) -> CrossTab {
    let rows: Vec<String> = (1..=5u8).map(|v| v.to_string()).collect();

    let mut columns: Vec<String> = records
        .iter()
        .filter(|r| r.experience.is_some())
        .filter_map(|r| hue.value_of(r))
        .collect();
    columns.sort();
    columns.dedup();
    hue.sort_values(&mut columns);

    cross_tabulate(
        records,
        |r| r.experience.map(|x| x.to_string()),
        |r| hue.value_of(r),
        &rows,
        &columns,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(eating_time: Option<&str>, experience: Option<u8>) -> NormalizedRecord {
        NormalizedRecord {
            eating_time: eating_time.map(str::to_string),
            experience,
            ..Default::default()
        }
    }

    #[test]
    fn test_eating_time_rows_are_canonical() {
        let records = vec![
            record(Some("Take-Out"), Some(5)),
            record(Some("Dinner"), Some(2)),
            record(Some("Dinner"), Some(4)),
            record(Some("Breakfast"), Some(3)),
        ];
        let refs: Vec<_> = records.iter().collect();
        let table = eating_time_by_experience(&refs);

        assert_eq!(table.rows, ["Breakfast", "Brunch", "Lunch", "Dinner", "Take-Out"]);
        assert_eq!(table.columns, ["1-3 Stars", "4-5 Stars"]);
        assert_eq!(table.counts[1], [0, 0]);
        assert_eq!(table.counts[2], [0, 0]);
        assert_eq!(table.get("Dinner", "1-3 Stars"), Some(1));
        assert_eq!(table.get("Dinner", "4-5 Stars"), Some(1));
        assert_eq!(table.get("Breakfast", "1-3 Stars"), Some(1));
        assert_eq!(table.get("Take-Out", "4-5 Stars"), Some(1));
    }

    #[test]
    fn test_eating_time_drops_missing_and_unknown() {
        let records = vec![
            record(Some("Lunch"), None),
            record(None, Some(5)),
            record(Some("Midnight Snack"), Some(5)),
            record(Some("Lunch"), Some(1)),
        ];
        let refs: Vec<_> = records.iter().collect();
        let table = eating_time_by_experience(&refs);

        assert_eq!(table.total(), 1);
        assert_eq!(table.row_total("Lunch"), 1);
        assert_eq!(table.rows.len(), 5);
    }

    #[test]
    fn test_eating_time_empty_input() {
        let table = eating_time_by_experience(&[]);
        assert_eq!(table.rows.len(), 5);
        assert!(table.counts.iter().all(|row| row == &[0, 0]));
    }

    #[test]
    fn test_experience_by_party_size() {
        let mk = |party: &str, experience: Option<u8>| NormalizedRecord {
            party_size: Some(party.to_string()),
            experience,
            ..Default::default()
        };
        let records = vec![mk("4", Some(5)), mk("2", Some(5)), mk("2", Some(1)), mk("12", None)];
        let refs: Vec<_> = records.iter().collect();
        let table = experience_by(&refs, GroupKey::PartySize);

        assert_eq!(table.rows, ["1", "2", "3", "4", "5"]);
        // party of 12 only appears without an experience score
        assert_eq!(table.columns, ["2", "4"]);
        assert_eq!(table.get("5", "2"), Some(1));
        assert_eq!(table.get("5", "4"), Some(1));
        assert_eq!(table.get("1", "2"), Some(1));
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_experience_by_price_tier_order() {
        let mk = |price: u8| NormalizedRecord {
            price: Some(price),
            experience: Some(3),
            ..Default::default()
        };
        let records = vec![mk(5), mk(1), mk(3)];
        let refs: Vec<_> = records.iter().collect();
        let table = experience_by(&refs, GroupKey::PriceTier);

        assert_eq!(table.columns, ["Very Cheap", "Average", "Very Expensive"]);
        assert_eq!(table.row_total("3"), 3);
    }
}
