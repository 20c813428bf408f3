//! Core data models for match statistics analysis.

mod confidence;
mod estimate;
mod ids;
mod match_record;
mod quality;
mod report;
mod stats;

pub use confidence::*;
pub use estimate::*;
pub use ids::*;
pub use match_record::*;
pub use quality::*;
pub use report::*;
pub use stats::*;
