//! Full analysis over one list of matches.
//!
//! Runs the calculators for every requested window, classifies data quality
//! independently of the aggregates, and attaches a Poisson estimate when the
//! quality is too low to trust the sample.

use tracing::{debug, info};

use crate::calculate::advantage::{half_distribution, home_away_advantage, venue_effect};
use crate::calculate::conversion::conversion_rate;
use crate::calculate::poisson::PoissonEstimator;
use crate::calculate::quality::{availability_from_matches, classify, DEFAULT_MIN_OBSERVED_MATCHES};
use crate::calculate::threshold::{threshold_results, DEFAULT_THRESHOLDS};
use crate::calculate::window::{aggregate_window, select_window, validate_order, WindowSpec};
use crate::calculate::{validate_thresholds, AnalysisError};
use crate::config::AppConfig;
use crate::models::{
    AnalysisReport, DataAvailability, MatchOrder, MatchRecord, Perspective, StatFamily, TeamId,
    WindowReport,
};

pub const DEFAULT_WINDOWS: [usize; 2] = [5, 10];

/// Per-call configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub windows: Vec<usize>,
    pub thresholds: Vec<f64>,
    pub family: StatFamily,
    pub perspective: Perspective,
    pub order: MatchOrder,
    pub focus_team: Option<TeamId>,

    /// Explicit availability; derived from the matches when absent
    pub availability: Option<DataAvailability>,

    /// Overrides any league name inside `availability`
    pub league_name: Option<String>,

    pub min_observed_matches: usize,

    pub estimator: PoissonEstimator,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            family: StatFamily::default(),
            perspective: Perspective::default(),
            order: MatchOrder::default(),
            focus_team: None,
            availability: None,
            league_name: None,
            min_observed_matches: DEFAULT_MIN_OBSERVED_MATCHES,
            estimator: PoissonEstimator::default(),
        }
    }
}

impl AnalysisOptions {
    /// Options seeded from the application config.
    pub fn from_config(config: &AppConfig) -> Self {
        let analysis = &config.analysis;
        Self {
            windows: analysis.windows.clone(),
            thresholds: analysis.thresholds.clone(),
            family: analysis.family,
            perspective: analysis.perspective,
            order: analysis.order,
            min_observed_matches: analysis.min_observed_matches,
            estimator: PoissonEstimator::new(
                config.estimator.card_thresholds.clone(),
                config.estimator.corner_thresholds.clone(),
            ),
            ..Default::default()
        }
    }

    /// Builder method to follow one team.
    pub fn with_focus_team(mut self, team: TeamId) -> Self {
        self.focus_team = Some(team);
        self
    }

    /// Builder method to set the league name used for hints.
    pub fn with_league_name(mut self, name: impl Into<String>) -> Self {
        self.league_name = Some(name.into());
        self
    }

    /// Builder method to pass an explicit availability bundle.
    pub fn with_availability(mut self, availability: DataAvailability) -> Self {
        self.availability = Some(availability);
        self
    }

    /// Reject configurations that cannot produce a result.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.windows.is_empty() {
            return Err(AnalysisError::NoWindows);
        }
        if let Some(&bad) = self.windows.iter().find(|&&w| w == 0) {
            return Err(AnalysisError::InvalidWindowSize(bad));
        }
        validate_thresholds(&self.thresholds)?;
        validate_thresholds(&self.estimator.card_thresholds)?;
        validate_thresholds(&self.estimator.corner_thresholds)?;
        Ok(())
    }

    fn window_spec(&self, size: usize) -> WindowSpec {
        let spec = WindowSpec::new(size, self.family, self.perspective);
        match &self.focus_team {
            Some(team) => spec.with_focus_team(team.clone()),
            None => spec,
        }
    }
}

/// Analyze a list of matches passed in the declared order.
///
/// Invalid configuration or contradictory ordering fails before anything is
/// computed. Thin data never fails; it lowers the quality tier instead.
pub fn analyze(
    matches: &[MatchRecord],
    options: &AnalysisOptions,
) -> Result<AnalysisReport, AnalysisError> {
    options.validate()?;
    validate_order(matches, options.order)?;

    info!(
        "Analyzing {} matches ({} family, windows {:?})",
        matches.len(),
        options.family,
        options.windows
    );

    let mut windows = Vec::with_capacity(options.windows.len());
    for &size in &options.windows {
        let spec = options.window_spec(size);
        let window = select_window(matches, size, options.order)?;
        windows.push(window_report(window, &spec, &options.thresholds));
    }

    let mut availability = match &options.availability {
        Some(explicit) => explicit.clone(),
        None => {
            let largest = options.windows.iter().copied().max().unwrap_or_default();
            let window = select_window(matches, largest.max(1), options.order)?;
            availability_from_matches(window, options.min_observed_matches)
        }
    };
    if options.league_name.is_some() {
        availability.league_name = options.league_name.clone();
    }

    let quality = classify(&availability);
    debug!(
        "Quality tier {} ({} issues, hints {:?})",
        quality.quality_tier, quality.issue_count, quality.league_hints
    );

    let estimate = options.estimator.estimate(&quality);
    if let Some(ref e) = estimate {
        info!(
            "Substituted {} estimated statistics ({} confidence)",
            e.estimates.len(),
            e.confidence
        );
    }

    Ok(AnalysisReport {
        family: options.family,
        order: options.order,
        focus_team: options.focus_team.clone(),
        input_matches: matches.len(),
        windows,
        quality,
        estimate,
    })
}

fn window_report(window: &[MatchRecord], spec: &WindowSpec, thresholds: &[f64]) -> WindowReport {
    let aggregate = aggregate_window(window, spec);
    debug!(
        "{}: {} matches, {} with {}",
        aggregate.label, aggregate.total_matches, aggregate.family_matches, spec.family
    );

    WindowReport {
        thresholds: threshold_results(window, spec.family, thresholds),
        advantage: home_away_advantage(window, spec.family),
        half_distribution: half_distribution(window, spec.family),
        conversion: conversion_rate(window, spec.family),
        venue_effect: spec
            .focus_team
            .as_ref()
            .map(|team| venue_effect(window, spec.family, team)),
        aggregate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CornerStats, DataField, EstimatedStatistic, LeagueHint, MatchResult, QualityTier,
        SideCounts,
    };
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    /// Twelve matches, most recent first, with corners and cards.
    fn season() -> Vec<MatchRecord> {
        let start = Utc.with_ymd_and_hms(2025, 5, 10, 15, 0, 0).unwrap();
        let corners = [
            (3, 1),
            (4, 2),
            (5, 4),
            (7, 4),
            (4, 3),
            (6, 6),
            (2, 2),
            (5, 5),
            (8, 1),
            (3, 3),
            (9, 9),
            (1, 0),
        ];
        corners
            .iter()
            .enumerate()
            .map(|(i, &(h, a))| {
                MatchRecord::new(
                    format!("m{}", i).into(),
                    start - Duration::days(7 * i as i64),
                    (if i % 2 == 0 { "lions" } else { "tigers" }).into(),
                    (if i % 2 == 0 { "tigers" } else { "lions" }).into(),
                    MatchResult::new((i % 3) as u32, (i % 2) as u32),
                )
                .with_corners(CornerStats::new(SideCounts::new(h, a)))
                .with_cards(SideCounts::new(1, 2))
            })
            .collect()
    }

    #[test]
    fn test_analyze_default_windows() {
        let report = analyze(&season(), &AnalysisOptions::default()).unwrap();

        assert_eq!(report.input_matches, 12);
        assert_eq!(report.windows.len(), 2);

        let last5 = report.window("last5").unwrap();
        assert_eq!(last5.aggregate.total_matches, 5);
        // Totals 4, 6, 9, 11, 7
        assert_eq!(last5.aggregate.average_total, 7.4);
        let t85 = last5
            .thresholds
            .iter()
            .find(|t| t.threshold == 8.5)
            .unwrap();
        assert_eq!(t85.matches_over, 2);
        assert_eq!(t85.matches_under, 3);
        assert_eq!(t85.over_percentage, 40.0);

        let last10 = report.window("last10").unwrap();
        assert_eq!(last10.aggregate.total_matches, 10);
        assert_eq!(last10.thresholds.len(), DEFAULT_THRESHOLDS.len());
    }

    #[test]
    fn test_analyze_derived_quality_is_partial_without_estimate() {
        let report = analyze(&season(), &AnalysisOptions::default()).unwrap();

        assert_eq!(report.quality.quality_tier, QualityTier::Partial);
        assert!(report.quality.missing_fields.contains(&DataField::Players));
        assert!(report.quality.missing_fields.contains(&DataField::HeadToHead));
        assert!(report.estimate.is_none());
        assert!(!report.is_estimated());
    }

    #[test]
    fn test_analyze_thin_youth_data_is_estimated() {
        let matches: Vec<_> = season().into_iter().take(2).collect();
        let options = AnalysisOptions::default().with_league_name("Premier League U21");

        let report = analyze(&matches, &options).unwrap();
        assert_eq!(report.window("last5").unwrap().aggregate.total_matches, 2);
        assert_eq!(report.quality.quality_tier, QualityTier::Minimal);
        assert!(report.quality.has_hint(LeagueHint::ReserveYouth));

        let estimate = report.estimate.unwrap();
        assert_eq!(estimate.estimates.len(), 3);
        assert!(estimate.get(EstimatedStatistic::Corners).unwrap().estimated);
    }

    #[test]
    fn test_analyze_explicit_availability() {
        let options = AnalysisOptions::default().with_availability(DataAvailability::all());
        let report = analyze(&season(), &options).unwrap();
        assert_eq!(report.quality.quality_tier, QualityTier::Full);
    }

    #[test]
    fn test_analyze_focus_team_adds_venue_effect() {
        let options = AnalysisOptions::default().with_focus_team("lions".into());
        let report = analyze(&season(), &options).unwrap();

        let last5 = report.window("last5").unwrap();
        let venue = last5.venue_effect.as_ref().unwrap();
        assert_eq!(venue.home_matches, 3);
        assert_eq!(venue.away_matches, 2);
        // Home: 3, 5, 4 -> 4.0; away: 2, 4 -> 3.0
        assert_eq!(venue.average_at_home, 4.0);
        assert_eq!(venue.average_away_from_home, 3.0);
        assert_eq!(venue.venue_effect, 1.0);
    }

    #[test]
    fn test_analyze_empty_input() {
        let report = analyze(&[], &AnalysisOptions::default()).unwrap();
        let last5 = report.window("last5").unwrap();

        assert_eq!(last5.aggregate.total_matches, 0);
        assert_eq!(last5.aggregate.average_total, 0.0);
        assert!(last5.thresholds.iter().all(|t| t.total_matches == 0));
        assert_eq!(last5.conversion.conversion_rate, 0.0);
        assert_eq!(report.quality.quality_tier, QualityTier::Minimal);
        assert!(report.estimate.is_some());
    }

    #[test]
    fn test_analyze_rejects_bad_configuration() {
        let mut options = AnalysisOptions::default();
        options.windows = vec![5, 0];
        assert_eq!(
            analyze(&season(), &options),
            Err(AnalysisError::InvalidWindowSize(0))
        );

        options.windows = vec![];
        assert_eq!(analyze(&season(), &options), Err(AnalysisError::NoWindows));

        let mut options = AnalysisOptions::default();
        options.thresholds = vec![f64::NAN];
        assert!(matches!(
            analyze(&season(), &options),
            Err(AnalysisError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_analyze_rejects_contradictory_order() {
        let mut options = AnalysisOptions::default();
        options.order = MatchOrder::OldestFirst;
        assert_eq!(
            analyze(&season(), &options),
            Err(AnalysisError::InconsistentOrder { index: 1 })
        );
    }

    #[test]
    fn test_analyze_order_declaration_selects_same_window() {
        let desc = season();
        let mut asc = season();
        asc.reverse();

        let a = analyze(&desc, &AnalysisOptions::default()).unwrap();
        let mut options = AnalysisOptions::default();
        options.order = MatchOrder::OldestFirst;
        let b = analyze(&asc, &options).unwrap();

        assert_eq!(
            a.window("last5").unwrap().aggregate.average_total,
            b.window("last5").unwrap().aggregate.average_total
        );
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let matches = season();
        let options = AnalysisOptions::default().with_league_name("Women's Division 2");
        let first = analyze(&matches, &options).unwrap();
        let second = analyze(&matches, &options).unwrap();
        assert_eq!(first, second);
    }
}
