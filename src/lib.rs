//! # Match Stats
//!
//! Rolling-window football match statistics with model-based fallbacks when
//! the data is too thin to trust.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, window results, quality, estimates)
//! - **calculate**: Pure statistics: windows, thresholds, advantage, conversion, quality, Poisson
//! - **analysis**: Runs every calculator for a list of matches and bundles the result
//! - **normalize**: Maps provider rows with inconsistent field names onto match records
//! - **storage**: JSONL input and JSON report output
//! - **config**: Configuration loading and validation

pub mod analysis;
pub mod calculate;
pub mod config;
pub mod models;
pub mod normalize;
pub mod storage;

pub use analysis::{analyze, AnalysisOptions};
pub use calculate::AnalysisError;
pub use models::*;

/// Parse a comma-separated list (e.g. "5,10" or "6.5, 7.5").
pub fn parse_list<T: std::str::FromStr>(s: &str) -> Option<Vec<T>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect()
}
