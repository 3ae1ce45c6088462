//! # Grade Calculations
//!
//! Every calculation is a pure function from caller-owned input plus static
//! scale/threshold data to a fresh result:
//!
//! - [`weighted_average`] - `compute(entries, scale) -> CalculationResult`
//! - [`classification`] - `classify(average, thresholds) -> ClassificationResult`
//! - [`projection`] - cumulative merge and target-average planning
//!
//! No result is ever rounded in this module; see [`crate::format`].

pub mod classification;
pub mod projection;
pub mod weighted_average;

// Re-export commonly used types
pub use classification::{
    classify, classify_all, classify_calculation, ClassificationResult, ThresholdSet, Tier,
};
pub use projection::{combine, required_average, Standing, TargetPlan};
pub use weighted_average::{compute, CalculationResult, ExcludedEntry, ExclusionReason};
