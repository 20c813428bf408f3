//! Model-based estimate models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Confidence, LeagueHint};

/// A statistic the Poisson model can stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatedStatistic {
    Cards,
    Corners,
    Btts,
}

impl EstimatedStatistic {
    pub fn label(&self) -> &'static str {
        match self {
            EstimatedStatistic::Cards => "Cards",
            EstimatedStatistic::Corners => "Corners",
            EstimatedStatistic::Btts => "BTTS",
        }
    }
}

impl std::fmt::Display for EstimatedStatistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// League-type parameters for the Poisson model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeagueParameters {
    pub mean_cards: f64,
    pub mean_corners: f64,
    /// Percentage of matches where both sides score
    pub btts_rate: f64,
}

/// Probability of exceeding one threshold, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverRate {
    pub threshold: f64,
    pub percentage: f64,
}

/// One estimated statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub statistic: EstimatedStatistic,
    pub expected_value: f64,
    pub over_rates: Vec<OverRate>,
    /// Always true; lets consumers tell estimates from measurements
    pub estimated: bool,
    pub confidence: Confidence,
}

impl Estimate {
    /// Over-rate for a threshold, if it was requested.
    pub fn over_rate(&self, threshold: f64) -> Option<f64> {
        self.over_rates
            .iter()
            .find(|r| r.threshold == threshold)
            .map(|r| r.percentage)
    }
}

/// Everything the estimator substituted, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEstimate {
    pub league_hints: BTreeSet<LeagueHint>,
    pub parameters: LeagueParameters,
    pub confidence: Confidence,
    pub estimates: Vec<Estimate>,
    pub explanation: String,
}

impl ModelEstimate {
    pub fn get(&self, statistic: EstimatedStatistic) -> Option<&Estimate> {
        self.estimates.iter().find(|e| e.statistic == statistic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_rate_lookup() {
        let estimate = Estimate {
            statistic: EstimatedStatistic::Corners,
            expected_value: 8.5,
            over_rates: vec![
                OverRate {
                    threshold: 8.5,
                    percentage: 48.0,
                },
                OverRate {
                    threshold: 9.5,
                    percentage: 35.0,
                },
            ],
            estimated: true,
            confidence: Confidence::Low,
        };

        assert_eq!(estimate.over_rate(9.5), Some(35.0));
        assert_eq!(estimate.over_rate(10.5), None);
    }

    #[test]
    fn test_estimated_statistic_serialization() {
        let json = serde_json::to_string(&EstimatedStatistic::Btts).unwrap();
        assert_eq!(json, "\"btts\"");
        assert_eq!(EstimatedStatistic::Btts.to_string(), "BTTS");
    }
}
