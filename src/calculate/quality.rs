//! Data quality classification.

use std::collections::BTreeSet;

use crate::models::{
    DataAvailability, DataField, DataQualityIndicator, LeagueHint, MatchRecord, QualityTier,
    StatFamily,
};

const RESERVE_YOUTH_KEYWORDS: &[&str] = &["reserve", "u21", "u19", "u18", "youth", "junior"];

// "w " keeps the trailing space so words merely containing a "w" do not match.
const WOMENS_KEYWORDS: &[&str] = &["women", "female", "ladies", "w "];

const LOWER_DIVISION_KEYWORDS: &[&str] = &["division 2", "division 3", "league 2", "league 3"];

/// Minimum observations for a field to count as available when derived
/// from match records.
pub const DEFAULT_MIN_OBSERVED_MATCHES: usize = 3;

/// Tags inferred from a league name by case-insensitive substring match.
pub fn league_hints(league_name: &str) -> BTreeSet<LeagueHint> {
    let name = league_name.to_lowercase();
    let vocabularies = [
        (LeagueHint::ReserveYouth, RESERVE_YOUTH_KEYWORDS),
        (LeagueHint::Womens, WOMENS_KEYWORDS),
        (LeagueHint::LowerDivision, LOWER_DIVISION_KEYWORDS),
    ];

    vocabularies
        .into_iter()
        .filter(|(_, words)| words.iter().any(|w| name.contains(w)))
        .map(|(hint, _)| hint)
        .collect()
}

/// Classify what the caller could supply.
pub fn classify(availability: &DataAvailability) -> DataQualityIndicator {
    let mut available_fields = BTreeSet::new();
    let mut missing_fields = BTreeSet::new();

    for (field, present) in availability.scored_flags() {
        if present {
            available_fields.insert(field);
        } else {
            missing_fields.insert(field);
        }
    }
    let issue_count = missing_fields.len();

    match availability.match_details {
        Some(true) => {
            available_fields.insert(DataField::MatchDetails);
        }
        Some(false) => {
            missing_fields.insert(DataField::MatchDetails);
        }
        None => {}
    }

    let league_hints = availability
        .league_name
        .as_deref()
        .map(league_hints)
        .unwrap_or_default();

    DataQualityIndicator {
        quality_tier: QualityTier::from_issue_count(issue_count),
        issue_count,
        available_fields,
        missing_fields,
        league_hints,
    }
}

/// Availability as far as the match records can tell.
///
/// Cards and corners count as available once `min_observed` matches carry
/// them; BTTS once the window itself has `min_observed` matches. Players and
/// head-to-head are not part of a match record and stay unknown.
pub fn availability_from_matches(window: &[MatchRecord], min_observed: usize) -> DataAvailability {
    let observed = |family: StatFamily| {
        window
            .iter()
            .filter(|m| m.family_counts(family).is_some())
            .count()
            >= min_observed
    };

    DataAvailability {
        cards: Some(observed(StatFamily::Cards)),
        corners: Some(observed(StatFamily::Corners)),
        players: None,
        h2h: None,
        btts: Some(window.len() >= min_observed),
        match_details: Some(!window.is_empty() && window.iter().all(|m| m.has_team_identity())),
        league_name: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CornerStats, MatchResult, SideCounts};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reserve_league_all_missing_is_minimal() {
        let availability = DataAvailability {
            cards: Some(false),
            corners: Some(false),
            players: Some(false),
            h2h: Some(false),
            btts: Some(false),
            match_details: None,
            league_name: Some("Under 21 Reserve League".to_string()),
        };

        let indicator = classify(&availability);
        assert_eq!(indicator.quality_tier, QualityTier::Minimal);
        assert_eq!(indicator.issue_count, 5);
        assert!(indicator.has_hint(LeagueHint::ReserveYouth));
        assert!(indicator.available_fields.is_empty());
    }

    #[test]
    fn test_tiers_follow_issue_count() {
        let mut availability = DataAvailability::all();
        assert_eq!(classify(&availability).quality_tier, QualityTier::Full);

        availability.players = Some(false);
        assert_eq!(classify(&availability).quality_tier, QualityTier::Full);

        availability.h2h = None;
        assert_eq!(classify(&availability).quality_tier, QualityTier::Partial);

        availability.cards = Some(false);
        assert_eq!(classify(&availability).quality_tier, QualityTier::Limited);

        availability.corners = Some(false);
        assert_eq!(classify(&availability).quality_tier, QualityTier::Minimal);
    }

    #[test]
    fn test_match_details_does_not_count_as_issue() {
        let mut availability = DataAvailability::all();
        availability.match_details = Some(false);

        let indicator = classify(&availability);
        assert_eq!(indicator.issue_count, 0);
        assert!(indicator.missing_fields.contains(&DataField::MatchDetails));
    }

    #[test]
    fn test_field_labels() {
        let availability = DataAvailability {
            corners: Some(true),
            btts: Some(true),
            match_details: Some(true),
            ..Default::default()
        };
        let indicator = classify(&availability);

        let available: Vec<_> = indicator.available_fields.iter().map(|f| f.label()).collect();
        let missing: Vec<_> = indicator.missing_fields.iter().map(|f| f.label()).collect();
        assert_eq!(available, vec!["Corners", "BTTS", "Match Details"]);
        assert_eq!(missing, vec!["Cards", "Players", "Head-to-Head"]);
    }

    #[test]
    fn test_league_hints() {
        assert_eq!(
            league_hints("Premier League 2 Division 2"),
            BTreeSet::from([LeagueHint::LowerDivision])
        );
        assert_eq!(
            league_hints("FA WOMEN'S Super League"),
            BTreeSet::from([LeagueHint::Womens])
        );
        assert_eq!(
            league_hints("Ladies U19 Youth Cup"),
            BTreeSet::from([LeagueHint::ReserveYouth, LeagueHint::Womens])
        );
        assert!(league_hints("Bundesliga").is_empty());
        assert!(league_hints("").is_empty());
    }

    #[test]
    fn test_womens_short_marker_needs_trailing_space() {
        assert!(league_hints("Serie A W League").contains(&LeagueHint::Womens));
        assert!(!league_hints("Swiss Super League").contains(&LeagueHint::Womens));
    }

    #[test]
    fn test_availability_from_matches() {
        let kickoff = Utc.with_ymd_and_hms(2025, 1, 1, 15, 0, 0).unwrap();
        let window: Vec<_> = (0..4)
            .map(|i| {
                let m = MatchRecord::new(
                    format!("m{}", i).into(),
                    kickoff,
                    "h".into(),
                    "a".into(),
                    MatchResult::new(1, 1),
                )
                .with_corners(CornerStats::new(SideCounts::new(4, 4)));
                if i == 0 {
                    m.with_cards(SideCounts::new(1, 2))
                } else {
                    m
                }
            })
            .collect();

        let availability = availability_from_matches(&window, DEFAULT_MIN_OBSERVED_MATCHES);
        assert_eq!(availability.corners, Some(true));
        assert_eq!(availability.cards, Some(false));
        assert_eq!(availability.btts, Some(true));
        assert_eq!(availability.players, None);
        assert_eq!(availability.match_details, Some(true));

        let indicator = classify(&availability);
        assert_eq!(indicator.issue_count, 3);
        assert_eq!(indicator.quality_tier, QualityTier::Limited);
    }

    #[test]
    fn test_availability_from_too_few_matches() {
        let availability = availability_from_matches(&[], DEFAULT_MIN_OBSERVED_MATCHES);
        assert_eq!(availability.btts, Some(false));
        assert_eq!(availability.match_details, Some(false));
        assert_eq!(classify(&availability).quality_tier, QualityTier::Minimal);
    }
}
