//! Analysis result bundle.

use serde::{Deserialize, Serialize};

use super::{
    ConversionRate, DataQualityIndicator, HalfDistribution, HomeAwayAdvantage, MatchOrder,
    ModelEstimate, StatFamily, TeamId, ThresholdResult, VenueEffect, WindowAggregate,
};

/// Measured figures for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    pub aggregate: WindowAggregate,
    pub thresholds: Vec<ThresholdResult>,
    pub advantage: HomeAwayAdvantage,
    pub half_distribution: HalfDistribution,
    pub conversion: ConversionRate,

    /// Only when a focus team was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_effect: Option<VenueEffect>,
}

/// What was measured, and what was estimated and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub family: StatFamily,

    pub order: MatchOrder,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_team: Option<TeamId>,

    /// Matches handed in, before windowing
    pub input_matches: usize,

    pub windows: Vec<WindowReport>,

    pub quality: DataQualityIndicator,

    /// Present only for limited/minimal quality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<ModelEstimate>,
}

impl AnalysisReport {
    /// Window report by label (e.g. "last5").
    pub fn window(&self, label: &str) -> Option<&WindowReport> {
        self.windows.iter().find(|w| w.aggregate.label == label)
    }

    /// True if any figure in the report is model-based.
    pub fn is_estimated(&self) -> bool {
        self.estimate.is_some()
    }
}
