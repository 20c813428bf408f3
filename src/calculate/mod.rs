//! Statistics calculation engine.
//!
//! Pure computations over an already-collected list of matches:
//! - Window selection and per-window aggregates
//! - Over/under threshold counts
//! - Home/away advantage, half-time distribution and venue effect
//! - Family-to-goals conversion
//! - Data quality classification
//! - Poisson estimates for thin or atypical data
//!
//! Nothing here performs I/O, logs, or keeps state between calls.

pub mod advantage;
pub mod conversion;
pub mod poisson;
pub mod quality;
pub mod threshold;
pub mod window;

use thiserror::Error;

/// Errors raised for invalid analysis input.
///
/// Missing optional data is never an error; it only shrinks divisors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Window size must be positive, got {0}")]
    InvalidWindowSize(usize),

    #[error("At least one window size is required")]
    NoWindows,

    #[error("Threshold must be a finite non-negative number, got {0}")]
    InvalidThreshold(f64),

    #[error("Unknown statistic family: {0}")]
    UnknownFamily(String),

    #[error("Unknown perspective: {0}")]
    UnknownPerspective(String),

    #[error("Unknown match order: {0}")]
    UnknownOrder(String),

    #[error("Match at index {index} breaks the declared chronological order")]
    InconsistentOrder { index: usize },
}

/// Reject thresholds that cannot be compared against counts.
pub fn validate_thresholds(thresholds: &[f64]) -> Result<(), AnalysisError> {
    match thresholds.iter().find(|t| !t.is_finite() || **t < 0.0) {
        Some(bad) => Err(AnalysisError::InvalidThreshold(*bad)),
        None => Ok(()),
    }
}

/// Mean of a sum over `count` observations; 0 when there are none.
pub fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `part` as a percentage of `whole`; 0 when `whole` is 0.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Round to one decimal place (percentage-like outputs).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places (averages).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
