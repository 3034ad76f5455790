/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean over the present values only; absent values count toward neither side.
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<u8>>,
{
    let present: Vec<f64> = values.into_iter().flatten().map(f64::from).collect();
    mean(&present)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_undefined() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_normal_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn test_mean_present_skips_missing() {
        let m = mean_present([Some(4), Some(4), Some(2), None]).unwrap();
        assert!((m - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_present_all_missing_is_not_zero() {
        assert_eq!(mean_present([None, None]), None);
    }
}
