//! Poisson estimates for thin or atypical data.
//!
//! When a context is classified `limited` or `minimal`, observed samples are
//! too small to trust. The estimator substitutes league-type means and derives
//! over-probabilities analytically from a Poisson distribution.

use std::collections::BTreeSet;

use super::threshold::DEFAULT_THRESHOLDS;
use crate::models::{
    Confidence, DataField, DataQualityIndicator, Estimate, EstimatedStatistic, LeagueHint,
    LeagueParameters, ModelEstimate, OverRate, QualityTier,
};

pub const DEFAULT_PARAMETERS: LeagueParameters = LeagueParameters {
    mean_cards: 3.5,
    mean_corners: 8.5,
    btts_rate: 45.0,
};

pub const RESERVE_YOUTH_PARAMETERS: LeagueParameters = LeagueParameters {
    mean_cards: 2.8,
    mean_corners: 7.2,
    btts_rate: 38.0,
};

pub const WOMENS_PARAMETERS: LeagueParameters = LeagueParameters {
    mean_cards: 2.5,
    mean_corners: 7.8,
    btts_rate: 42.0,
};

pub const DEFAULT_CARD_THRESHOLDS: [f64; 4] = [2.5, 3.5, 4.5, 5.5];

/// Upper bound on the CDF summation; P(X > 100) is zero in f64 for any
/// realistic per-match mean.
const MAX_K: u64 = 100;

/// Parameters and confidence for a set of league hints.
///
/// Reserve/youth wins over women's when both match. Lower-division names have
/// no tailored set and fall back to the defaults.
pub fn select_parameters(hints: &BTreeSet<LeagueHint>) -> (LeagueParameters, Confidence) {
    if hints.contains(&LeagueHint::ReserveYouth) {
        (RESERVE_YOUTH_PARAMETERS, Confidence::Medium)
    } else if hints.contains(&LeagueHint::Womens) {
        (WOMENS_PARAMETERS, Confidence::Medium)
    } else {
        (DEFAULT_PARAMETERS, Confidence::Low)
    }
}

/// P(X <= k) for X ~ Poisson(lambda).
///
/// Terms are built iteratively (`p_k = p_{k-1} * lambda / k`), which avoids
/// evaluating large factorials and any recursion.
pub fn poisson_cdf(k: u64, lambda: f64) -> f64 {
    let lambda = lambda.max(0.0);
    let mut term = (-lambda).exp();
    let mut sum = term;
    for i in 1..=k.min(MAX_K) {
        term *= lambda / i as f64;
        sum += term;
    }
    sum.min(1.0)
}

/// P(X > threshold), i.e. `1 - CDF(floor(threshold))`.
pub fn over_probability(threshold: f64, lambda: f64) -> f64 {
    if threshold < 0.0 {
        return 1.0;
    }
    (1.0 - poisson_cdf(threshold.floor() as u64, lambda)).clamp(0.0, 1.0)
}

/// Over-probabilities in whole percent.
pub fn over_rates(lambda: f64, thresholds: &[f64]) -> Vec<OverRate> {
    thresholds
        .iter()
        .map(|&threshold| OverRate {
            threshold,
            percentage: (over_probability(threshold, lambda) * 100.0).round(),
        })
        .collect()
}

/// Estimates missing statistics from league-type parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonEstimator {
    pub card_thresholds: Vec<f64>,
    pub corner_thresholds: Vec<f64>,
}

impl Default for PoissonEstimator {
    fn default() -> Self {
        Self {
            card_thresholds: DEFAULT_CARD_THRESHOLDS.to_vec(),
            corner_thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

impl PoissonEstimator {
    pub fn new(card_thresholds: Vec<f64>, corner_thresholds: Vec<f64>) -> Self {
        Self {
            card_thresholds,
            corner_thresholds,
        }
    }

    /// Estimate whatever of cards, corners and BTTS the indicator lacks.
    ///
    /// Returns `None` unless the tier is `limited` or `minimal`.
    pub fn estimate(&self, indicator: &DataQualityIndicator) -> Option<ModelEstimate> {
        let statistics: Vec<_> = [
            (EstimatedStatistic::Cards, DataField::Cards),
            (EstimatedStatistic::Corners, DataField::Corners),
            (EstimatedStatistic::Btts, DataField::Btts),
        ]
        .into_iter()
        .filter(|(_, field)| !indicator.is_available(*field))
        .map(|(statistic, _)| statistic)
        .collect();

        self.estimate_statistics(indicator.quality_tier, &indicator.league_hints, &statistics)
    }

    /// Estimate the given statistics for a tier and set of hints.
    pub fn estimate_statistics(
        &self,
        tier: QualityTier,
        hints: &BTreeSet<LeagueHint>,
        statistics: &[EstimatedStatistic],
    ) -> Option<ModelEstimate> {
        if !tier.needs_estimate() {
            return None;
        }

        let (parameters, confidence) = select_parameters(hints);
        let estimates = statistics
            .iter()
            .map(|&statistic| self.estimate_one(statistic, &parameters, confidence))
            .collect();

        Some(ModelEstimate {
            league_hints: hints.clone(),
            parameters,
            confidence,
            estimates,
            explanation: explain(tier, hints, statistics, confidence),
        })
    }

    fn estimate_one(
        &self,
        statistic: EstimatedStatistic,
        parameters: &LeagueParameters,
        confidence: Confidence,
    ) -> Estimate {
        let (expected_value, over_rates) = match statistic {
            EstimatedStatistic::Cards => (
                parameters.mean_cards,
                over_rates(parameters.mean_cards, &self.card_thresholds),
            ),
            EstimatedStatistic::Corners => (
                parameters.mean_corners,
                over_rates(parameters.mean_corners, &self.corner_thresholds),
            ),
            // A rate, not a count: nothing to put through the distribution.
            EstimatedStatistic::Btts => (parameters.btts_rate, Vec::new()),
        };

        Estimate {
            statistic,
            expected_value,
            over_rates,
            estimated: true,
            confidence,
        }
    }
}

/// Human-readable reason for the estimate. Deterministic in its inputs.
fn explain(
    tier: QualityTier,
    hints: &BTreeSet<LeagueHint>,
    estimated: &[EstimatedStatistic],
    confidence: Confidence,
) -> String {
    let join = |items: Vec<&str>| {
        if items.is_empty() {
            "none".to_string()
        } else {
            items.join(", ")
        }
    };

    let measured: Vec<&str> = [
        EstimatedStatistic::Cards,
        EstimatedStatistic::Corners,
        EstimatedStatistic::Btts,
    ]
    .iter()
    .filter(|s| !estimated.contains(s))
    .map(|s| s.label())
    .collect();
    let estimated: Vec<&str> = estimated.iter().map(|s| s.label()).collect();

    let competition = if hints.is_empty() {
        String::new()
    } else {
        let labels: Vec<&str> = hints.iter().map(|h| h.label()).collect();
        format!(" for {} competition", labels.join(", "))
    };

    format!(
        "{} data{}. Measured: {}. Estimated: {}. Confidence: {}.",
        capitalize(&tier.to_string()),
        competition,
        join(measured),
        join(estimated),
        confidence
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
