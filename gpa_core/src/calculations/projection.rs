//! # Projections
//!
//! Cumulative and target-average arithmetic built on top of a term
//! calculation: merging a new term into a prior standing, and working out
//! the average still needed over remaining credits to reach a goal.
//!
//! ## Example
//!
//! ```rust
//! use gpa_core::calculations::projection::{combine, required_average, Standing};
//!
//! let prior = Standing::new(3.2, 60.0);
//! let term = Standing::new(3.8, 15.0);
//! let cumulative = combine(prior, term).unwrap();
//! assert!((cumulative.average - 3.32).abs() < 1e-9);
//!
//! let plan = required_average(cumulative, 3.5, 45.0, 4.0).unwrap();
//! assert!(plan.achievable);
//! assert!((plan.required_average - 3.8).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::CalculationResult;
use crate::errors::{GradeError, GradeResult};

/// An average together with the weight it was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Standing {
    pub average: f64,
    pub weight: f64,
}

impl Standing {
    pub fn new(average: f64, weight: f64) -> Self {
        Standing { average, weight }
    }

    /// Standing represented by a term calculation
    pub fn from_calculation(calc: &CalculationResult) -> Self {
        Standing {
            average: calc.average,
            weight: calc.total_weight,
        }
    }

    /// average × weight
    pub fn weighted_sum(&self) -> f64 {
        self.average * self.weight
    }

    fn validate(&self, field: &str) -> GradeResult<()> {
        if !self.average.is_finite() || self.average < 0.0 {
            return Err(GradeError::invalid_input(
                format!("{}.average", field),
                self.average.to_string(),
                "Average must be a non-negative number",
            ));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(GradeError::invalid_input(
                format!("{}.weight", field),
                self.weight.to_string(),
                "Weight must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Merge a prior cumulative standing with a new term.
///
/// Both weights zero gives a zero standing rather than an error.
pub fn combine(prior: Standing, term: Standing) -> GradeResult<Standing> {
    prior.validate("prior")?;
    term.validate("term")?;

    let weight = prior.weight + term.weight;
    let average = if weight > 0.0 {
        (prior.weighted_sum() + term.weighted_sum()) / weight
    } else {
        0.0
    };

    Ok(Standing { average, weight })
}

/// What it takes to reach a target average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetPlan {
    /// Average needed over the remaining weight (may be negative or exceed the scale)
    pub required_average: f64,

    /// `required_average` is within the scale's maximum value
    pub achievable: bool,

    /// Target is met even with a zero average on the remaining weight
    pub already_secured: bool,
}

/// Average required over `remaining_weight` to end at `target`.
///
/// # Errors
///
/// * `InvalidInput` - non-positive `remaining_weight`, negative or
///   non-finite target or scale maximum, or an invalid current standing
pub fn required_average(
    current: Standing,
    target: f64,
    remaining_weight: f64,
    scale_max: f64,
) -> GradeResult<TargetPlan> {
    current.validate("current")?;

    if !target.is_finite() || target < 0.0 {
        return Err(GradeError::invalid_input(
            "target",
            target.to_string(),
            "Target average must be a non-negative number",
        ));
    }
    if !remaining_weight.is_finite() || remaining_weight <= 0.0 {
        return Err(GradeError::invalid_input(
            "remaining_weight",
            remaining_weight.to_string(),
            "Remaining weight must be positive",
        ));
    }
    if !scale_max.is_finite() || scale_max <= 0.0 {
        return Err(GradeError::invalid_input(
            "scale_max",
            scale_max.to_string(),
            "Scale maximum must be positive",
        ));
    }

    let total_weight = current.weight + remaining_weight;
    let required = (target * total_weight - current.weighted_sum()) / remaining_weight;

    Ok(TargetPlan {
        required_average: required,
        achievable: required <= scale_max + 1e-9,
        already_secured: required <= 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_weights_by_credits() {
        let result = combine(Standing::new(3.0, 30.0), Standing::new(4.0, 10.0)).unwrap();
        assert!((result.average - 3.25).abs() < 1e-12);
        assert_eq!(result.weight, 40.0);
    }

    #[test]
    fn test_combine_with_empty_prior() {
        let result = combine(Standing::default(), Standing::new(3.6, 15.0)).unwrap();
        assert!((result.average - 3.6).abs() < 1e-12);
    }

    #[test]
    fn test_combine_both_empty() {
        let result = combine(Standing::default(), Standing::default()).unwrap();
        assert_eq!(result, Standing::default());
    }

    #[test]
    fn test_combine_rejects_negative() {
        assert!(combine(Standing::new(-1.0, 3.0), Standing::default()).is_err());
        assert!(combine(Standing::default(), Standing::new(3.0, f64::NAN)).is_err());
    }

    #[test]
    fn test_from_calculation() {
        let mut calc = CalculationResult::empty();
        calc.average = 3.5;
        calc.total_weight = 6.0;
        calc.attempted_weight = 9.0;
        let standing = Standing::from_calculation(&calc);
        assert_eq!(standing, Standing::new(3.5, 6.0));
    }

    #[test]
    fn test_unreachable_target() {
        let plan = required_average(Standing::new(2.0, 90.0), 3.5, 30.0, 4.0).unwrap();
        assert!(!plan.achievable);
        assert!(plan.required_average > 4.0);
    }

    #[test]
    fn test_already_secured_target() {
        let plan = required_average(Standing::new(3.9, 100.0), 2.0, 10.0, 4.0).unwrap();
        assert!(plan.already_secured);
        assert!(plan.achievable);
    }

    #[test]
    fn test_required_average_without_history() {
        let plan = required_average(Standing::default(), 3.0, 15.0, 4.0).unwrap();
        assert!((plan.required_average - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_required_average_rejects_zero_remaining() {
        let err = required_average(Standing::new(3.0, 30.0), 3.5, 0.0, 4.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
