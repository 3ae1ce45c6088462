//! # Weighted Average
//!
//! Computes `Σ(value × weight) / Σ(weight)` over the entries that resolve
//! to a numeric grade on the active scale.
//!
//! ## Rules
//!
//! - Weight is checked first: it must be finite, `> 0` and `<= max_weight`.
//! - Excluded symbols (P/F, W, Q...) never enter the average or
//!   `total_weight`; the scale's [`ExcludedCredit`] policy decides whether
//!   they count toward `attempted_weight`.
//! - Unknown symbols are excluded and reported, never fatal.
//! - An empty (or fully excluded) list yields `average = 0`.
//! - Nothing is rounded here.
//!
//! ## Example
//!
//! ```rust
//! use gpa_core::calculations::weighted_average::compute;
//! use gpa_core::entries::Entry;
//! use gpa_core::scales::GradeScale;
//!
//! let scale = GradeScale::builder("s", "Sample")
//!     .grade("A", 4.0)
//!     .grade("B+", 3.33)
//!     .grade("C", 2.0)
//!     .build()
//!     .unwrap();
//!
//! let entries = vec![
//!     Entry::new("MATH101", "A", 4.0),
//!     Entry::new("ENG101", "B+", 3.0),
//!     Entry::new("HIST101", "C", 3.0),
//! ];
//!
//! let result = compute(&entries, &scale);
//! assert!((result.total_weighted_sum - 31.99).abs() < 1e-9);
//! assert!((result.average - 3.199).abs() < 1e-9);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::entries::Entry;
use crate::scales::{ExcludedCredit, GradeScale, GradeValue};

/// Why an entry did not contribute to the average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Weight was not finite, `<= 0`, or above the scale's maximum
    InvalidWeight { weight: f64, max: f64 },
    /// Symbol maps to the excluded marker (pass/fail, withdrawal, drop)
    ExcludedSymbol,
    /// Symbol is not part of the scale
    UnknownSymbol { scale_id: String },
}

impl ExclusionReason {
    /// Short user-facing description
    pub fn describe(&self) -> String {
        match self {
            ExclusionReason::InvalidWeight { weight, max } => {
                format!("invalid credits ({}); must be greater than 0 and at most {}", weight, max)
            }
            ExclusionReason::ExcludedSymbol => "not counted in the average".to_string(),
            ExclusionReason::UnknownSymbol { scale_id } => {
                format!("grade not recognized on scale '{}'", scale_id)
            }
        }
    }

    /// True for soft-validation failures the user should fix
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, ExclusionReason::ExcludedSymbol)
    }
}

/// An entry left out of the average, with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedEntry {
    pub position: usize,
    pub entry: Entry,
    pub reason: ExclusionReason,
}

impl ExcludedEntry {
    /// Feedback line such as "Course 2 (ENG101) has invalid credits ..."
    pub fn message(&self) -> String {
        let name = if self.entry.label.trim().is_empty() {
            format!("Course {}", self.position)
        } else {
            format!("Course {} ({})", self.position, self.entry.label.trim())
        };
        match &self.reason {
            ExclusionReason::InvalidWeight { .. } => format!("{} has {}", name, self.reason.describe()),
            _ => format!("{} '{}': {}", name, self.entry.symbol, self.reason.describe()),
        }
    }
}

/// Unrounded output of one weighted-average computation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "average": 3.199,
///   "total_weight": 10.0,
///   "total_weighted_sum": 31.99,
///   "attempted_weight": 10.0,
///   "included_count": 3,
///   "excluded_entries": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// `total_weighted_sum / total_weight`, or 0 when nothing counted
    pub average: f64,

    /// Σ weight over included entries
    pub total_weight: f64,

    /// Σ value × weight over included entries
    pub total_weighted_sum: f64,

    /// `total_weight` plus excluded-symbol weights when the scale counts them
    pub attempted_weight: f64,

    /// Number of entries that entered the average
    pub included_count: usize,

    /// Entries that did not enter the average, in input order
    pub excluded_entries: Vec<ExcludedEntry>,
}

impl CalculationResult {
    /// Result for an empty entry list
    pub fn empty() -> Self {
        CalculationResult {
            average: 0.0,
            total_weight: 0.0,
            total_weighted_sum: 0.0,
            attempted_weight: 0.0,
            included_count: 0,
            excluded_entries: Vec::new(),
        }
    }

    /// True when no entry contributed to the average
    pub fn is_empty(&self) -> bool {
        self.included_count == 0
    }

    /// Excluded entries that indicate bad input (not pass/fail policy)
    pub fn invalid_entries(&self) -> impl Iterator<Item = &ExcludedEntry> {
        self.excluded_entries.iter().filter(|e| e.reason.is_invalid_input())
    }
}

/// Compute the weighted average of `entries` on `scale`.
///
/// Accepts any iterator of entry references: a slice, a `Vec`, or
/// [`EntryList::iter`](crate::entries::EntryList::iter).
pub fn compute<'a, I>(entries: I, scale: &GradeScale) -> CalculationResult
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut result = CalculationResult::empty();
    let mut excluded_weight = 0.0;

    for (index, entry) in entries.into_iter().enumerate() {
        let position = index + 1;

        if !scale.weight_is_valid(entry.weight) {
            debug!(
                "entry {} ({}) excluded: weight {} outside (0, {}]",
                position, entry.label, entry.weight, scale.max_weight
            );
            result.excluded_entries.push(ExcludedEntry {
                position,
                entry: entry.clone(),
                reason: ExclusionReason::InvalidWeight {
                    weight: entry.weight,
                    max: scale.max_weight,
                },
            });
            continue;
        }

        match scale.lookup(&entry.symbol) {
            Ok(GradeValue::Points(points)) => {
                result.total_weighted_sum += points * entry.weight;
                result.total_weight += entry.weight;
                result.included_count += 1;
            }
            Ok(GradeValue::Excluded(_)) => {
                debug!("entry {} ({}) excluded: symbol '{}' is not averaged", position, entry.label, entry.symbol);
                excluded_weight += entry.weight;
                result.excluded_entries.push(ExcludedEntry {
                    position,
                    entry: entry.clone(),
                    reason: ExclusionReason::ExcludedSymbol,
                });
            }
            Err(err) => {
                warn!("entry {} ({}) excluded: {}", position, entry.label, err);
                result.excluded_entries.push(ExcludedEntry {
                    position,
                    entry: entry.clone(),
                    reason: ExclusionReason::UnknownSymbol {
                        scale_id: scale.id.clone(),
                    },
                });
            }
        }
    }

    if result.total_weight > 0.0 {
        result.average = result.total_weighted_sum / result.total_weight;
    }

    result.attempted_weight = match scale.excluded_credit {
        ExcludedCredit::CountAttempted => result.total_weight + excluded_weight,
        ExcludedCredit::Ignore => result.total_weight,
    };

    debug!(
        "computed average {} over {} weight on '{}' ({} included, {} excluded)",
        result.average,
        result.total_weight,
        scale.id,
        result.included_count,
        result.excluded_entries.len()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_scale(policy: ExcludedCredit) -> GradeScale {
        GradeScale::builder("sample", "Sample")
            .grade("A", 4.0)
            .grade("B+", 3.33)
            .grade("B", 3.0)
            .grade("C", 2.0)
            .grade("F", 0.0)
            .excluded("S")
            .excluded("W")
            .excluded_credit(policy)
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_input() {
        let entries: Vec<Entry> = Vec::new();
        let result = compute(&entries, &sample_scale(ExcludedCredit::Ignore));
        assert_eq!(result.average, 0.0);
        assert_eq!(result.total_weight, 0.0);
        assert_eq!(result.total_weighted_sum, 0.0);
        assert!(result.is_empty());
        assert!(result.excluded_entries.is_empty());
    }

    #[test]
    fn test_single_entry_identity() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        for weight in [0.5, 1.0, 3.0, 12.0] {
            let result = compute(&[Entry::new("X", "B+", weight)], &scale);
            assert!((result.average - 3.33).abs() < 1e-12);
        }
    }

    #[test]
    fn test_two_entries_average() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        let entries = vec![Entry::new("one", "A", 3.0), Entry::new("two", "B", 3.0)];
        let result = compute(&entries, &scale);
        assert_eq!(result.average, 3.5);
        assert_eq!(result.total_weight, 6.0);
        assert_eq!(result.total_weighted_sum, 21.0);
    }

    #[test]
    fn test_three_course_scenario() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        let entries = vec![
            Entry::new("MATH101", "A", 4.0),
            Entry::new("ENG101", "B+", 3.0),
            Entry::new("HIST101", "C", 3.0),
        ];
        let result = compute(&entries, &scale);
        assert!((result.total_weighted_sum - 31.99).abs() < 1e-9);
        assert_eq!(result.total_weight, 10.0);
        assert!((result.average - 3.199).abs() < 1e-9);
        assert_eq!(result.included_count, 3);
    }

    #[test]
    fn test_excluded_symbol_not_counted_as_zero() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        let entries = vec![Entry::new("PE", "S", 3.0), Entry::new("BIO", "A", 3.0)];
        let result = compute(&entries, &scale);
        assert_eq!(result.average, 4.0);
        assert_eq!(result.total_weight, 3.0);
        assert_eq!(result.excluded_entries.len(), 1);
        assert_eq!(result.excluded_entries[0].reason, ExclusionReason::ExcludedSymbol);
        assert_eq!(result.excluded_entries[0].position, 1);
    }

    #[test]
    fn test_excluded_symbol_does_not_change_average() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        let base = vec![Entry::new("a", "A", 4.0), Entry::new("b", "C", 2.0)];
        let mut with_withdrawal = base.clone();
        with_withdrawal.push(Entry::new("c", "W", 3.0));

        let before = compute(&base, &scale);
        let after = compute(&with_withdrawal, &scale);
        assert_eq!(before.average, after.average);
        assert_eq!(after.excluded_entries.len(), 1);
        assert_eq!(after.excluded_entries[0].entry.symbol, "W");
    }

    #[test]
    fn test_attempted_weight_policy() {
        let entries = vec![Entry::new("PE", "S", 2.0), Entry::new("BIO", "A", 3.0)];

        let counted = compute(&entries, &sample_scale(ExcludedCredit::CountAttempted));
        assert_eq!(counted.total_weight, 3.0);
        assert_eq!(counted.attempted_weight, 5.0);

        let ignored = compute(&entries, &sample_scale(ExcludedCredit::Ignore));
        assert_eq!(ignored.total_weight, 3.0);
        assert_eq!(ignored.attempted_weight, 3.0);
        assert_eq!(counted.average, ignored.average);
    }

    #[test]
    fn test_invalid_weights_are_excluded() {
        let scale = sample_scale(ExcludedCredit::CountAttempted);
        let entries = vec![
            Entry::new("zero", "A", 0.0),
            Entry::new("negative", "A", -3.0),
            Entry::new("huge", "A", 15.0),
            Entry::new("nan", "A", f64::NAN),
            Entry::new("ok", "C", 3.0),
        ];
        let result = compute(&entries, &scale);
        assert_eq!(result.average, 2.0);
        assert_eq!(result.total_weight, 3.0);
        assert_eq!(result.attempted_weight, 3.0);
        assert_eq!(result.excluded_entries.len(), 4);
        assert!(result
            .excluded_entries
            .iter()
            .all(|e| matches!(e.reason, ExclusionReason::InvalidWeight { .. })));
        assert_eq!(result.invalid_entries().count(), 4);
    }

    #[test]
    fn test_weight_checked_before_symbol() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        let result = compute(&[Entry::new("bad", "ZZ", -1.0)], &scale);
        assert!(matches!(
            result.excluded_entries[0].reason,
            ExclusionReason::InvalidWeight { .. }
        ));
    }

    #[test]
    fn test_unknown_symbol_is_reported_not_fatal() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        let entries = vec![Entry::new("ART", "E", 3.0), Entry::new("BIO", "B", 3.0)];
        let result = compute(&entries, &scale);
        assert_eq!(result.average, 3.0);
        assert_eq!(
            result.excluded_entries[0].reason,
            ExclusionReason::UnknownSymbol {
                scale_id: "sample".to_string()
            }
        );
    }

    #[test]
    fn test_all_excluded_is_zero_average() {
        let scale = sample_scale(ExcludedCredit::CountAttempted);
        let entries = vec![Entry::new("PE", "S", 1.0), Entry::new("LAB", "W", 2.0)];
        let result = compute(&entries, &scale);
        assert_eq!(result.average, 0.0);
        assert_eq!(result.total_weight, 0.0);
        assert_eq!(result.attempted_weight, 3.0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        let entries = vec![Entry::new("a", "A", 4.0), Entry::new("b", "B+", 3.0)];
        assert_eq!(compute(&entries, &scale), compute(&entries, &scale));
    }

    #[test]
    fn test_excluded_entry_messages() {
        let scale = sample_scale(ExcludedCredit::Ignore);
        let entries = vec![Entry::new("", "A", 0.0), Entry::new("ENG101", "E", 3.0)];
        let result = compute(&entries, &scale);
        assert!(result.excluded_entries[0].message().starts_with("Course 1 has invalid credits"));
        assert!(result.excluded_entries[1].message().starts_with("Course 2 (ENG101) 'E'"));
    }

    fn symbol_strategy() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["A", "B+", "B", "C", "F", "S", "W", "?"])
    }

    proptest! {
        #[test]
        fn average_is_invariant_to_entry_order(
            raw in prop::collection::vec((symbol_strategy(), 0.5f64..6.0), 0..12),
            seed in any::<usize>(),
        ) {
            let scale = sample_scale(ExcludedCredit::CountAttempted);
            let entries: Vec<Entry> = raw
                .iter()
                .map(|(symbol, weight)| Entry::new("x", *symbol, *weight))
                .collect();

            let mut reordered = entries.clone();
            reordered.reverse();
            if !reordered.is_empty() {
                let len = reordered.len();
                reordered.rotate_left(seed % len);
            }

            let a = compute(&entries, &scale);
            let b = compute(&reordered, &scale);
            prop_assert!((a.average - b.average).abs() < 1e-9);
            prop_assert!((a.total_weight - b.total_weight).abs() < 1e-9);
            prop_assert!((a.attempted_weight - b.attempted_weight).abs() < 1e-9);
            prop_assert_eq!(a.excluded_entries.len(), b.excluded_entries.len());
        }

        #[test]
        fn average_stays_within_scale(
            raw in prop::collection::vec((symbol_strategy(), 0.5f64..6.0), 1..12),
        ) {
            let scale = sample_scale(ExcludedCredit::Ignore);
            let entries: Vec<Entry> = raw
                .iter()
                .map(|(symbol, weight)| Entry::new("x", *symbol, *weight))
                .collect();
            let result = compute(&entries, &scale);
            prop_assert!(result.average >= 0.0);
            prop_assert!(result.average <= scale.max_points() + 1e-9);
        }
    }
}
