//! Window-scoped statistics models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::calculate::AnalysisError;

/// Statistic family with home/away components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatFamily {
    #[default]
    Corners,
    Cards,
}

impl std::fmt::Display for StatFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatFamily::Corners => write!(f, "corners"),
            StatFamily::Cards => write!(f, "cards"),
        }
    }
}

impl FromStr for StatFamily {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "corners" => Ok(StatFamily::Corners),
            "cards" => Ok(StatFamily::Cards),
            _ => Err(AnalysisError::UnknownFamily(s.to_string())),
        }
    }
}

/// Which side's column a window reads as "for".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Home,
    Away,
    /// Fixture orientation: "for" is the home column, "against" the away column
    #[default]
    Overall,
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Perspective::Home => write!(f, "home"),
            Perspective::Away => write!(f, "away"),
            Perspective::Overall => write!(f, "overall"),
        }
    }
}

impl FromStr for Perspective {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Perspective::Home),
            "away" => Ok(Perspective::Away),
            "overall" => Ok(Perspective::Overall),
            _ => Err(AnalysisError::UnknownPerspective(s.to_string())),
        }
    }
}

/// Chronological order the caller passes matches in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrder {
    #[default]
    MostRecentFirst,
    OldestFirst,
}

impl FromStr for MatchOrder {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "most_recent_first" | "desc" => Ok(MatchOrder::MostRecentFirst),
            "oldest_first" | "asc" => Ok(MatchOrder::OldestFirst),
            _ => Err(AnalysisError::UnknownOrder(s.to_string())),
        }
    }
}

/// Raw aggregates for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowAggregate {
    /// Window label (e.g. "last5")
    pub label: String,

    /// Requested window size
    pub requested_size: usize,

    /// Matches actually in the window (never padded)
    pub total_matches: usize,

    pub family: StatFamily,

    pub perspective: Perspective,

    /// Matches that carried the family at all
    pub family_matches: usize,

    pub average_total: f64,

    pub average_for: f64,

    pub average_against: f64,

    /// Matches that carried both half splits
    pub half_split_matches: usize,

    pub first_half_average: f64,

    pub second_half_average: f64,

    pub average_goals: f64,

    pub btts_matches: usize,

    pub btts_percentage: f64,
}

/// Over/under counts for one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    pub threshold: f64,
    pub matches_over: usize,
    pub matches_under: usize,
    pub total_matches: usize,
    pub over_percentage: f64,
    pub under_percentage: f64,
}

/// Home column against away column across a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeAwayAdvantage {
    pub average_home: f64,
    pub average_away: f64,
    pub advantage: f64,
    pub has_advantage: bool,
    pub home_team_dominates: bool,
}

/// Where in the match a family tends to happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HalfPattern {
    FirstHalfHeavy,
    SecondHalfHeavy,
    #[default]
    Balanced,
}

impl std::fmt::Display for HalfPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HalfPattern::FirstHalfHeavy => write!(f, "first_half_heavy"),
            HalfPattern::SecondHalfHeavy => write!(f, "second_half_heavy"),
            HalfPattern::Balanced => write!(f, "balanced"),
        }
    }
}

/// First/second half share of a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HalfDistribution {
    pub half_split_matches: usize,
    pub first_half_average: f64,
    pub second_half_average: f64,
    pub first_half_percentage: f64,
    pub second_half_percentage: f64,
    pub pattern: HalfPattern,
}

/// How many goals each side scored per family event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRate {
    pub family: StatFamily,

    /// Matches that carried the family
    pub matches: usize,

    pub home_family_total: u64,
    pub away_family_total: u64,
    pub family_total: u64,

    pub home_goals: u64,
    pub away_goals: u64,
    pub total_goals: u64,

    /// Goals per 100 family events, one decimal
    pub home_conversion_rate: f64,
    pub away_conversion_rate: f64,
    pub conversion_rate: f64,

    /// Family events needed per goal, two decimals
    pub family_per_goal: f64,
}

/// A focus team's family average at home against away from home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueEffect {
    pub home_matches: usize,
    pub away_matches: usize,
    pub average_at_home: f64,
    pub average_away_from_home: f64,
    pub venue_effect: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_family_from_str() {
        assert_eq!("corners".parse::<StatFamily>().unwrap(), StatFamily::Corners);
        assert_eq!(" Cards ".parse::<StatFamily>().unwrap(), StatFamily::Cards);
        assert!(matches!(
            "offsides".parse::<StatFamily>(),
            Err(AnalysisError::UnknownFamily(_))
        ));
    }

    #[test]
    fn test_perspective_from_str() {
        assert_eq!("AWAY".parse::<Perspective>().unwrap(), Perspective::Away);
        assert!("neutral".parse::<Perspective>().is_err());
    }

    #[test]
    fn test_match_order_from_str() {
        assert_eq!(
            "most-recent-first".parse::<MatchOrder>().unwrap(),
            MatchOrder::MostRecentFirst
        );
        assert_eq!("asc".parse::<MatchOrder>().unwrap(), MatchOrder::OldestFirst);
        assert!("random".parse::<MatchOrder>().is_err());
    }

    #[test]
    fn test_half_pattern_serialization() {
        let json = serde_json::to_string(&HalfPattern::FirstHalfHeavy).unwrap();
        assert_eq!(json, "\"first_half_heavy\"");
        assert_eq!(format!("{}", HalfPattern::Balanced), "balanced");
    }

    #[test]
    fn test_stat_family_serialization() {
        let json = serde_json::to_string(&StatFamily::Cards).unwrap();
        assert_eq!(json, "\"cards\"");
        let deserialized: StatFamily = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, StatFamily::Cards);
    }
}
