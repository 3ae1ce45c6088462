//! # Classification
//!
//! Maps an average onto a named, ordered set of thresholds: Latin honors,
//! Dean's List, academic standing, program eligibility. Each
//! [`ThresholdSet`] is an independent axis; evaluating several sets against
//! the same calculation involves no shared state.
//!
//! ## Rules
//!
//! - Tiers are scanned from the highest threshold down; the first tier the
//!   average meets (`>=`) wins.
//! - If no tier is met, the set's explicit fallback label applies.
//! - The margin is the gap to the next-higher unmet threshold, `None` at the
//!   top tier.
//! - A set may also require a minimum total weight (e.g. a full course load
//!   for Dean's List); below it the fallback applies regardless of average.
//!
//! ## Example
//!
//! ```rust
//! use gpa_core::calculations::classification::{classify, ThresholdSet, Tier};
//!
//! let honors = ThresholdSet::new(
//!     "Latin Honors",
//!     vec![
//!         Tier::new(3.9, "Summa Cum Laude"),
//!         Tier::new(3.7, "Magna Cum Laude"),
//!         Tier::new(3.5, "Cum Laude"),
//!     ],
//!     "No Latin Honors",
//! )
//! .unwrap();
//!
//! let result = classify(3.62, &honors);
//! assert_eq!(result.label, "Cum Laude");
//! assert!((result.margin_to_next_threshold.unwrap() - 0.08).abs() < 1e-9);
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::calculations::CalculationResult;
use crate::config::ThresholdSetConfig;
use crate::errors::{GradeError, GradeResult};

/// Tolerance for `average >= threshold`, absorbing floating-point noise
/// such as 3.4999999999999996 for an exact 3.5.
pub const THRESHOLD_EPSILON: f64 = 1e-9;

/// One tier of a threshold set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub threshold: f64,
    pub label: String,
}

impl Tier {
    pub fn new(threshold: f64, label: impl Into<String>) -> Self {
        Tier {
            threshold,
            label: label.into(),
        }
    }
}

/// A named classification with strictly decreasing thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSet {
    pub name: String,
    tiers: Vec<Tier>,
    fallback_label: String,
    min_total_weight: Option<f64>,
}

impl ThresholdSet {
    /// Build a validated threshold set.
    ///
    /// # Errors
    ///
    /// * `InvalidThresholds` - blank name or labels, no tiers, a non-finite
    ///   threshold, or thresholds that do not strictly decrease
    pub fn new(
        name: impl Into<String>,
        tiers: Vec<Tier>,
        fallback_label: impl Into<String>,
    ) -> GradeResult<Self> {
        let name = name.into();
        let fallback_label = fallback_label.into();

        if name.trim().is_empty() {
            return Err(GradeError::invalid_thresholds(name, "Name cannot be blank"));
        }
        if fallback_label.trim().is_empty() {
            return Err(GradeError::invalid_thresholds(name, "Fallback label cannot be blank"));
        }
        if tiers.is_empty() {
            return Err(GradeError::invalid_thresholds(name, "At least one tier is required"));
        }

        for tier in &tiers {
            if !tier.threshold.is_finite() {
                return Err(GradeError::invalid_thresholds(
                    name,
                    format!("Threshold for '{}' is not a finite number", tier.label),
                ));
            }
            if tier.label.trim().is_empty() {
                return Err(GradeError::invalid_thresholds(
                    name,
                    format!("Tier at {} has a blank label", tier.threshold),
                ));
            }
        }

        for pair in tiers.windows(2) {
            if pair[1].threshold >= pair[0].threshold {
                return Err(GradeError::invalid_thresholds(
                    name,
                    format!(
                        "Thresholds must strictly decrease: {} ('{}') follows {} ('{}')",
                        pair[1].threshold, pair[1].label, pair[0].threshold, pair[0].label
                    ),
                ));
            }
        }

        Ok(ThresholdSet {
            name,
            tiers,
            fallback_label,
            min_total_weight: None,
        })
    }

    /// Require a minimum total weight before any tier can be awarded.
    pub fn with_min_total_weight(mut self, min_total_weight: f64) -> GradeResult<Self> {
        if !min_total_weight.is_finite() || min_total_weight < 0.0 {
            return Err(GradeError::invalid_thresholds(
                &self.name,
                format!("Minimum total weight {} must be a non-negative number", min_total_weight),
            ));
        }
        self.min_total_weight = Some(min_total_weight);
        Ok(self)
    }

    /// Build from a `[[profiles.<id>.thresholds]]` config entry.
    pub fn from_config(config: &ThresholdSetConfig) -> GradeResult<Self> {
        let tiers = config
            .tiers
            .iter()
            .map(|t| Tier::new(t.threshold, t.label.clone()))
            .collect();
        let set = ThresholdSet::new(config.name.clone(), tiers, config.fallback.clone())?;
        match config.min_total_weight {
            Some(min) => set.with_min_total_weight(min),
            None => Ok(set),
        }
    }

    /// Tiers from highest to lowest
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn fallback_label(&self) -> &str {
        &self.fallback_label
    }

    pub fn min_total_weight(&self) -> Option<f64> {
        self.min_total_weight
    }
}

/// Outcome of one classification axis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "set_name": "Dean's List",
///   "label": "Not Eligible",
///   "rank": 0,
///   "margin_to_next_threshold": 0.25,
///   "weight_shortfall": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Name of the threshold set this result belongs to
    pub set_name: String,

    /// Label of the tier reached, or the fallback label
    pub label: String,

    /// 0 for the fallback, `tiers.len()` for the top tier
    pub rank: usize,

    /// Points still needed for the next-higher tier; `None` at the top
    pub margin_to_next_threshold: Option<f64>,

    /// Weight still needed when the set's minimum total weight is unmet
    pub weight_shortfall: Option<f64>,
}

impl ClassificationResult {
    /// True when any tier (not the fallback) was reached
    pub fn is_eligible(&self) -> bool {
        self.rank > 0
    }
}

/// Classify an average against a threshold set.
pub fn classify(average: f64, thresholds: &ThresholdSet) -> ClassificationResult {
    let average = sanitize(average, thresholds);
    let tiers = &thresholds.tiers;

    match tiers
        .iter()
        .position(|t| average >= t.threshold - THRESHOLD_EPSILON)
    {
        Some(index) => ClassificationResult {
            set_name: thresholds.name.clone(),
            label: tiers[index].label.clone(),
            rank: tiers.len() - index,
            margin_to_next_threshold: index
                .checked_sub(1)
                .map(|above| tiers[above].threshold - average),
            weight_shortfall: None,
        },
        None => fallback(average, thresholds, None),
    }
}

/// Classify a calculation, honoring the set's minimum total weight.
pub fn classify_calculation(calc: &CalculationResult, thresholds: &ThresholdSet) -> ClassificationResult {
    if let Some(min) = thresholds.min_total_weight {
        if calc.total_weight < min - THRESHOLD_EPSILON {
            let average = sanitize(calc.average, thresholds);
            return fallback(average, thresholds, Some(min - calc.total_weight));
        }
    }
    classify(calc.average, thresholds)
}

/// Evaluate several independent threshold sets against one calculation.
pub fn classify_all(calc: &CalculationResult, sets: &[ThresholdSet]) -> Vec<ClassificationResult> {
    sets.iter().map(|set| classify_calculation(calc, set)).collect()
}

fn fallback(average: f64, thresholds: &ThresholdSet, weight_shortfall: Option<f64>) -> ClassificationResult {
    // Gap to the lowest tier; zero when only the weight requirement is missing.
    let margin = thresholds
        .tiers
        .last()
        .map(|lowest| (lowest.threshold - average).max(0.0));

    ClassificationResult {
        set_name: thresholds.name.clone(),
        label: thresholds.fallback_label.clone(),
        rank: 0,
        margin_to_next_threshold: margin,
        weight_shortfall,
    }
}

fn sanitize(average: f64, thresholds: &ThresholdSet) -> f64 {
    if average.is_finite() {
        average
    } else {
        warn!(
            "non-finite average {} classified against '{}'; treating as 0",
            average, thresholds.name
        );
        0.0
    }
}
