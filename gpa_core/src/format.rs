//! # Result Formatting
//!
//! Shapes a [`CalculationResult`] and its [`ClassificationResult`]s into the
//! stable [`DisplayRecord`] consumed by rendering, export and share code.
//! This is the only place numbers are rounded: two decimals, half away from
//! zero, for every tool.

use serde::{Deserialize, Serialize};

use crate::calculations::classification::THRESHOLD_EPSILON;
use crate::calculations::{CalculationResult, ClassificationResult, ExcludedEntry};
use crate::errors::{GradeError, GradeResult};

/// Decimal places used for every displayed number
pub const DISPLAY_PRECISION: i32 = 2;

/// Round to [`DISPLAY_PRECISION`] decimals, half away from zero.
///
/// Values within [`THRESHOLD_EPSILON`] below a midpoint (2.4249999999999998
/// for an exact 2.425) are treated as the midpoint.
pub fn round_display(value: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_PRECISION);
    let nudge = value.signum() * THRESHOLD_EPSILON * factor;
    (value * factor + nudge).round() / factor
}

/// One classification axis as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationDisplay {
    pub set_name: String,
    pub label: String,
    pub eligible: bool,
    pub margin_to_next_threshold: Option<f64>,
    pub weight_shortfall: Option<f64>,
}

/// One excluded entry as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedDisplay {
    pub position: usize,
    pub label: String,
    pub symbol: String,
    pub message: String,
    /// True when the user should correct the entry (bad weight, unknown grade)
    pub needs_attention: bool,
}

/// Presentation-ready calculation outcome.
///
/// ## JSON Example
///
/// ```json
/// {
///   "average": 3.2,
///   "average_display": "3.20",
///   "total_weight": 10.0,
///   "attempted_weight": 10.0,
///   "total_weighted_sum": 31.99,
///   "included_count": 3,
///   "classifications": [],
///   "excluded": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub average: f64,
    /// Average with exactly two decimals, e.g. "3.20"
    pub average_display: String,
    pub total_weight: f64,
    pub attempted_weight: f64,
    pub total_weighted_sum: f64,
    pub included_count: usize,
    pub classifications: Vec<ClassificationDisplay>,
    pub excluded: Vec<ExcludedDisplay>,
}

impl DisplayRecord {
    /// Pretty JSON for export collaborators
    pub fn to_json(&self) -> GradeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GradeError::invalid_input("display_record", "json", e.to_string()))
    }

    /// Find a classification by threshold-set name
    pub fn classification(&self, set_name: &str) -> Option<&ClassificationDisplay> {
        self.classifications.iter().find(|c| c.set_name == set_name)
    }
}

/// Build the display record. No calculation happens here.
pub fn format(calc: &CalculationResult, classifications: &[ClassificationResult]) -> DisplayRecord {
    let average = round_display(calc.average);

    DisplayRecord {
        average,
        average_display: format!("{:.2}", average),
        total_weight: round_display(calc.total_weight),
        attempted_weight: round_display(calc.attempted_weight),
        total_weighted_sum: round_display(calc.total_weighted_sum),
        included_count: calc.included_count,
        classifications: classifications.iter().map(classification_display).collect(),
        excluded: calc.excluded_entries.iter().map(excluded_display).collect(),
    }
}

fn classification_display(result: &ClassificationResult) -> ClassificationDisplay {
    ClassificationDisplay {
        set_name: result.set_name.clone(),
        label: result.label.clone(),
        eligible: result.is_eligible(),
        margin_to_next_threshold: result.margin_to_next_threshold.map(round_display),
        weight_shortfall: result.weight_shortfall.map(round_display),
    }
}

fn excluded_display(excluded: &ExcludedEntry) -> ExcludedDisplay {
    ExcludedDisplay {
        position: excluded.position,
        label: excluded.entry.label.clone(),
        symbol: excluded.entry.symbol.clone(),
        message: excluded.message(),
        needs_attention: excluded.reason.is_invalid_input(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{classify, compute, ThresholdSet, Tier};
    use crate::entries::Entry;
    use crate::scales::GradeScale;

    fn scenario_scale() -> GradeScale {
        GradeScale::builder("scenario", "Scenario")
            .grade("A", 4.0)
            .grade("B+", 3.33)
            .grade("C", 2.0)
            .excluded("S")
            .build()
            .unwrap()
    }

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(3.199), 3.2);
        assert_eq!(round_display(3.125), 3.13);
        assert_eq!(round_display(2.0 / 3.0), 0.67);
        assert_eq!(round_display(0.0), 0.0);
    }

    #[test]
    fn test_round_display_midpoints_away_from_zero() {
        assert_eq!(round_display(1.005), 1.01);
        assert_eq!(round_display(2.675), 2.68);
        assert_eq!(round_display(-1.005), -1.01);
        assert_eq!(round_display(1.0049), 1.0);
    }

    #[test]
    fn test_builtin_midpoint_averages_round_up() {
        let registry = crate::scales::GradeScaleRegistry::builtin().unwrap();
        let standard = registry.resolve("standard").unwrap();

        let entries = vec![Entry::new("A1", "A", 1.0), Entry::new("A2", "A-", 1.0), Entry::new("D1", "D", 2.0)];
        assert_eq!(format(&compute(&entries, standard), &[]).average_display, "2.43");

        let entries = vec![Entry::new("A1", "A", 1.0), Entry::new("B1", "B+", 1.0), Entry::new("B2", "B+", 2.0)];
        assert_eq!(format(&compute(&entries, standard), &[]).average_display, "3.48");
    }

    #[test]
    fn test_scenario_rounds_to_3_20() {
        let entries = vec![
            Entry::new("MATH101", "A", 4.0),
            Entry::new("ENG101", "B+", 3.0),
            Entry::new("HIST101", "C", 3.0),
        ];
        let calc = compute(&entries, &scenario_scale());
        let record = format(&calc, &[]);

        assert_eq!(record.average_display, "3.20");
        assert_eq!(record.average, 3.2);
        assert_eq!(record.total_weight, 10.0);
        assert_eq!(record.total_weighted_sum, 31.99);
        assert_eq!(record.included_count, 3);
    }

    #[test]
    fn test_classifications_and_exclusions_are_shaped() {
        let entries = vec![Entry::new("PE", "S", 3.0), Entry::new("BIO", "A", 3.0), Entry::new("ART", "A", 0.0)];
        let calc = compute(&entries, &scenario_scale());
        let set = ThresholdSet::new("Dean's List", vec![Tier::new(3.5, "Dean's List")], "Not Eligible").unwrap();
        let record = format(&calc, &[classify(calc.average, &set)]);

        assert_eq!(record.average_display, "4.00");
        let deans = record.classification("Dean's List").unwrap();
        assert_eq!(deans.label, "Dean's List");
        assert!(deans.eligible);

        assert_eq!(record.excluded.len(), 2);
        assert!(!record.excluded[0].needs_attention);
        assert!(record.excluded[1].needs_attention);
        assert!(record.excluded[1].message.contains("invalid credits"));
    }

    #[test]
    fn test_margin_is_rounded() {
        let set = ThresholdSet::new("Honors", vec![Tier::new(3.5, "Honors")], "None").unwrap();
        let calc = CalculationResult {
            average: 3.1234,
            ..CalculationResult::empty()
        };
        let record = format(&calc, &[classify(calc.average, &set)]);
        assert_eq!(record.classifications[0].margin_to_next_threshold, Some(0.38));
    }

    #[test]
    fn test_json_export() {
        let record = format(&CalculationResult::empty(), &[]);
        let json = record.to_json().unwrap();
        assert!(json.contains("\"average_display\": \"0.00\""));
        let roundtrip: DisplayRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, roundtrip);
    }
}
