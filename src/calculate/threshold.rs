//! Over/under threshold counts.

use super::{percentage, round1};
use crate::models::{MatchRecord, StatFamily, ThresholdResult};

/// Default thresholds for per-match totals.
pub const DEFAULT_THRESHOLDS: [f64; 8] = [6.5, 7.5, 8.5, 9.5, 10.5, 11.5, 12.5, 13.5];

/// Count how many values land strictly over `threshold`.
pub fn threshold_result(values: &[u64], threshold: f64) -> ThresholdResult {
    let total_matches = values.len();
    let matches_over = values.iter().filter(|&&v| v as f64 > threshold).count();
    let matches_under = total_matches - matches_over;

    ThresholdResult {
        threshold,
        matches_over,
        matches_under,
        total_matches,
        over_percentage: round1(percentage(matches_over as f64, total_matches as f64)),
        under_percentage: round1(percentage(matches_under as f64, total_matches as f64)),
    }
}

/// Threshold results for the family totals of a window.
///
/// Matches that do not carry the family are not counted on either side.
pub fn threshold_results(
    window: &[MatchRecord],
    family: StatFamily,
    thresholds: &[f64],
) -> Vec<ThresholdResult> {
    let values = family_totals(window, family);
    thresholds
        .iter()
        .map(|&t| threshold_result(&values, t))
        .collect()
}

/// Per-match family totals, skipping matches without the family.
pub fn family_totals(window: &[MatchRecord], family: StatFamily) -> Vec<u64> {
    window
        .iter()
        .filter_map(|m| m.family_counts(family))
        .map(|c| c.total())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchResult, SideCounts};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_threshold_result_counts() {
        let result = threshold_result(&[4, 6, 9, 11, 7], 8.5);

        assert_eq!(result.matches_over, 2);
        assert_eq!(result.matches_under, 3);
        assert_eq!(result.total_matches, 5);
        assert_eq!(result.over_percentage, 40.0);
        assert_eq!(result.under_percentage, 60.0);
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        let result = threshold_result(&[8, 9, 10], 9.0);
        assert_eq!(result.matches_over, 1);
        assert_eq!(result.matches_under, 2);
    }

    #[test]
    fn test_threshold_empty_is_zero_not_nan() {
        let result = threshold_result(&[], 8.5);
        assert_eq!(result.total_matches, 0);
        assert_eq!(result.over_percentage, 0.0);
        assert_eq!(result.under_percentage, 0.0);
    }

    #[test]
    fn test_threshold_percentages_are_one_decimal() {
        let result = threshold_result(&[10, 5, 5], 7.5);
        assert_eq!(result.over_percentage, 33.3);
        assert_eq!(result.under_percentage, 66.7);
    }

    #[test]
    fn test_over_plus_under_is_total_for_every_threshold() {
        let values = [0, 3, 7, 8, 8, 12, 14, 21];
        for t in DEFAULT_THRESHOLDS {
            let r = threshold_result(&values, t);
            assert_eq!(r.matches_over + r.matches_under, r.total_matches);
        }
    }

    #[test]
    fn test_threshold_results_skip_missing_family() {
        let start = Utc.with_ymd_and_hms(2025, 5, 1, 15, 0, 0).unwrap();
        let matches: Vec<_> = (0..4)
            .map(|i| {
                let m = MatchRecord::new(
                    format!("m{}", i).into(),
                    start - Duration::days(i),
                    "a".into(),
                    "b".into(),
                    MatchResult::new(0, 0),
                );
                if i % 2 == 0 {
                    m.with_cards(SideCounts::new(2, 3))
                } else {
                    m
                }
            })
            .collect();

        let results = threshold_results(&matches, StatFamily::Cards, &[4.5, 5.5]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].total_matches, 2);
        assert_eq!(results[0].matches_over, 2);
        assert_eq!(results[1].matches_over, 0);
        assert_eq!(results[1].under_percentage, 100.0);
    }
}
