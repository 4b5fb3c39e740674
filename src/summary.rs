use crate::models::Summary;

/// Aggregate a sequence of deltas against `threshold_secs`.
///
/// Deltas equal to the threshold land in neither count.
pub fn summarize(deltas: &[i64], threshold_secs: i64) -> Summary {
    if deltas.is_empty() {
        return Summary {
            average: None,
            count_above: 0,
            count_below: 0,
            threshold_secs,
        };
    }

    let total: i128 = deltas.iter().map(|&d| i128::from(d)).sum();
    let average = total as f64 / deltas.len() as f64;

    Summary {
        average: Some(average),
        count_above: deltas.iter().filter(|&&d| d > threshold_secs).count(),
        count_below: deltas.iter().filter(|&&d| d < threshold_secs).count(),
        threshold_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_average() {
        let summary = summarize(&[], 150);
        assert_eq!(summary.average, None);
        assert_eq!(summary.count_above, 0);
        assert_eq!(summary.count_below, 0);
    }

    #[test]
    fn threshold_value_is_counted_in_neither_bucket() {
        let summary = summarize(&[100, 150, 200], 150);
        assert_eq!(summary.average, Some(150.0));
        assert_eq!(summary.count_above, 1);
        assert_eq!(summary.count_below, 1);
        assert_eq!(summary.threshold_secs, 150);
    }

    #[test]
    fn average_is_not_truncated() {
        let summary = summarize(&[1, 2], 150);
        assert_eq!(summary.average, Some(1.5));
        assert_eq!(summary.count_below, 2);
    }

    #[test]
    fn negative_deltas_count_below() {
        // Block times are only loosely ordered, so a later block can be older.
        let summary = summarize(&[-30, 400], 150);
        assert_eq!(summary.average, Some(185.0));
        assert_eq!(summary.count_above, 1);
        assert_eq!(summary.count_below, 1);
    }

    #[test]
    fn large_values_do_not_overflow() {
        let summary = summarize(&[i64::MAX, i64::MAX], 0);
        assert_eq!(summary.average, Some(i64::MAX as f64));
        assert_eq!(summary.count_above, 2);
    }
}
