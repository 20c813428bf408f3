//! Family-to-goals conversion (e.g. corners per goal).

use super::{round1, round2};
use crate::models::{ConversionRate, MatchRecord, StatFamily};

/// Goals per 100 family events, one decimal. 0 when there were no events.
pub fn conversion_percentage(goals: u64, family_total: u64) -> f64 {
    if family_total == 0 {
        0.0
    } else {
        round1(goals as f64 / family_total as f64 * 100.0)
    }
}

/// Family events per goal, two decimals. 0 when no goals were scored.
pub fn family_per_goal(family_total: u64, goals: u64) -> f64 {
    if goals == 0 {
        0.0
    } else {
        round2(family_total as f64 / goals as f64)
    }
}

/// Conversion over the matches of a window that carry the family.
///
/// Goals are summed over exactly the same matches as the family, so a match
/// without the family contributes to neither side of the ratio.
pub fn conversion_rate(window: &[MatchRecord], family: StatFamily) -> ConversionRate {
    let mut matches = 0usize;
    let (mut home_family, mut away_family, mut family_total) = (0u64, 0u64, 0u64);
    let (mut home_goals, mut away_goals) = (0u64, 0u64);

    for m in window {
        let Some(counts) = m.family_counts(family) else {
            continue;
        };
        matches += 1;
        home_family += u64::from(counts.home);
        away_family += u64::from(counts.away);
        family_total += counts.total();
        home_goals += u64::from(m.result.home_score);
        away_goals += u64::from(m.result.away_score);
    }

    let total_goals = home_goals + away_goals;

    ConversionRate {
        family,
        matches,
        home_family_total: home_family,
        away_family_total: away_family,
        family_total,
        home_goals,
        away_goals,
        total_goals,
        home_conversion_rate: conversion_percentage(home_goals, home_family),
        away_conversion_rate: conversion_percentage(away_goals, away_family),
        conversion_rate: conversion_percentage(total_goals, family_total),
        family_per_goal: family_per_goal(family_total, total_goals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CornerStats, MatchResult, SideCounts};
    use chrono::{TimeZone, Utc};

    fn fixture(id: &str, score: (u32, u32), corners: Option<(u32, u32)>) -> MatchRecord {
        let m = MatchRecord::new(
            id.into(),
            Utc.with_ymd_and_hms(2025, 2, 1, 15, 0, 0).unwrap(),
            "h".into(),
            "a".into(),
            MatchResult::new(score.0, score.1),
        );
        match corners {
            Some((h, a)) => m.with_corners(CornerStats::new(SideCounts::new(h, a))),
            None => m,
        }
    }

    #[test]
    fn test_conversion_zero_family_total() {
        assert_eq!(conversion_percentage(3, 0), 0.0);
        assert_eq!(family_per_goal(0, 3), 0.0);
        assert_eq!(family_per_goal(7, 0), 0.0);
    }

    #[test]
    fn test_conversion_percentage_one_decimal() {
        assert_eq!(conversion_percentage(1, 3), 33.3);
        assert_eq!(conversion_percentage(2, 3), 66.7);
    }

    #[test]
    fn test_conversion_rate_over_window() {
        let window = vec![
            fixture("1", (2, 1), Some((6, 4))),
            fixture("2", (1, 0), Some((4, 2))),
            fixture("3", (4, 4), None),
        ];

        let rate = conversion_rate(&window, StatFamily::Corners);
        assert_eq!(rate.matches, 2);
        assert_eq!(rate.home_family_total, 10);
        assert_eq!(rate.away_family_total, 6);
        assert_eq!(rate.family_total, 16);
        assert_eq!(rate.home_goals, 3);
        assert_eq!(rate.away_goals, 1);
        assert_eq!(rate.home_conversion_rate, 30.0);
        assert_eq!(rate.away_conversion_rate, 16.7);
        assert_eq!(rate.conversion_rate, 25.0);
        assert_eq!(rate.family_per_goal, 4.0);
    }

    #[test]
    fn test_conversion_rate_no_family_data() {
        let window = vec![fixture("1", (3, 0), None)];
        let rate = conversion_rate(&window, StatFamily::Corners);
        assert_eq!(rate.family_total, 0);
        assert_eq!(rate.total_goals, 0);
        assert_eq!(rate.conversion_rate, 0.0);
        assert!(rate.conversion_rate.is_finite());
    }

    #[test]
    fn test_conversion_rate_large_counts() {
        let record: MatchRecord = serde_json::from_value(serde_json::json!({
            "match_id": "big",
            "kickoff_time": "2025-02-01T15:00:00Z",
            "home_team_id": "h",
            "away_team_id": "a",
            "result": {"home_score": 4294967295u64, "away_score": 1},
            "statistics": {"corners": {"home": 4294967295u64, "away": 1}}
        }))
        .unwrap();

        let rate = conversion_rate(&[record.clone(), record], StatFamily::Corners);
        assert_eq!(rate.home_family_total, 2 * u64::from(u32::MAX));
        assert_eq!(rate.family_total, 2 * (u64::from(u32::MAX) + 1));
        assert_eq!(rate.total_goals, 2 * (u64::from(u32::MAX) + 1));
        assert_eq!(rate.conversion_rate, 100.0);
        assert_eq!(rate.family_per_goal, 1.0);
    }
}
