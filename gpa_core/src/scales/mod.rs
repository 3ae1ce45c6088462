//! # Grade Scales
//!
//! A [`GradeScale`] maps grade symbols ("A+", "B-", "S", "Q") to either a
//! numeric grade value or the [`ExcludedMarker`] used for pass/fail,
//! withdrawal and drop symbols. Scales are built once (from the embedded
//! table or a user TOML file) and never mutated afterwards.
//!
//! ## Example
//!
//! ```rust
//! use gpa_core::scales::{ExcludedCredit, GradeScale, GradeValue};
//!
//! let scale = GradeScale::builder("pass-fail", "Letter + P/F")
//!     .grade("A", 4.0)
//!     .grade("B", 3.0)
//!     .excluded("P")
//!     .excluded_credit(ExcludedCredit::CountAttempted)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(scale.lookup("a").unwrap(), GradeValue::Points(4.0));
//! assert!(scale.lookup("P").unwrap().is_excluded());
//! assert!(scale.lookup("Z").is_err());
//! ```

pub mod registry;

pub use registry::{GradeScaleRegistry, InstitutionProfile};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{GradeError, GradeResult};

/// Default upper bound for a single entry's weight (credit hours)
pub const DEFAULT_MAX_WEIGHT: f64 = 12.0;

/// Sentinel for symbols that never contribute to the average.
///
/// Serializes as the string `"excluded"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcludedMarker {
    Excluded,
}

/// Result of looking a symbol up in a scale.
///
/// ```json
/// { "A": 4.0, "P": "excluded" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeValue {
    /// Numeric grade value counted in the average
    Points(f64),
    /// Pass/fail, withdrawal or drop symbol
    Excluded(ExcludedMarker),
}

impl GradeValue {
    /// The excluded sentinel value
    pub const EXCLUDED: GradeValue = GradeValue::Excluded(ExcludedMarker::Excluded);

    pub fn is_excluded(&self) -> bool {
        matches!(self, GradeValue::Excluded(_))
    }

    /// Numeric value, `None` for excluded symbols
    pub fn points(&self) -> Option<f64> {
        match self {
            GradeValue::Points(p) => Some(*p),
            GradeValue::Excluded(_) => None,
        }
    }
}

impl std::fmt::Display for GradeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeValue::Points(p) => write!(f, "{:.2}", p),
            GradeValue::Excluded(_) => write!(f, "excluded"),
        }
    }
}

/// How weights of excluded-symbol entries affect the attempted total.
///
/// Excluded entries never count toward the average or `total_weight`;
/// this only controls the "total credits attempted" figure shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExcludedCredit {
    /// Excluded-symbol weights are added to `attempted_weight`
    CountAttempted,
    /// Excluded-symbol weights are left out of every total
    #[default]
    Ignore,
}

impl ExcludedCredit {
    pub fn display_name(&self) -> &'static str {
        match self {
            ExcludedCredit::CountAttempted => "counted as attempted",
            ExcludedCredit::Ignore => "not counted",
        }
    }
}

/// Normalize a grade symbol for storage and lookup.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// An immutable grade-symbol table for one institution or exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeScale {
    /// Registry identifier (e.g., "standard", "ut-austin")
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Symbol → value, in declaration order (best grade first by convention)
    grades: IndexMap<String, GradeValue>,

    /// Policy for excluded symbols in the attempted total
    pub excluded_credit: ExcludedCredit,

    /// Largest weight a single entry may carry
    pub max_weight: f64,
}

impl GradeScale {
    /// Start building a scale.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> GradeScaleBuilder {
        GradeScaleBuilder {
            id: id.into(),
            name: name.into(),
            grades: Vec::new(),
            excluded_credit: ExcludedCredit::default(),
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }

    /// Build a validated scale from raw parts.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - no symbols, a blank or duplicate symbol, a negative
    ///   or non-finite value, or a bad `max_weight`
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        grades: impl IntoIterator<Item = (String, GradeValue)>,
        excluded_credit: ExcludedCredit,
        max_weight: f64,
    ) -> GradeResult<Self> {
        let id = id.into();
        let field = |suffix: &str| format!("scales.{}.{}", id, suffix);

        if !max_weight.is_finite() || max_weight <= 0.0 {
            return Err(GradeError::invalid_input(
                field("max_weight"),
                max_weight.to_string(),
                "Maximum weight must be a positive number",
            ));
        }

        let mut table = IndexMap::new();
        for (raw, value) in grades {
            let symbol = normalize_symbol(&raw);
            if symbol.is_empty() {
                return Err(GradeError::invalid_input(
                    field("grades"),
                    raw,
                    "Grade symbol cannot be blank",
                ));
            }
            if let GradeValue::Points(points) = value {
                if !points.is_finite() || points < 0.0 {
                    return Err(GradeError::invalid_input(
                        field(&format!("grades.{}", symbol)),
                        points.to_string(),
                        "Grade value must be a non-negative number",
                    ));
                }
            }
            if table.insert(symbol.clone(), value).is_some() {
                return Err(GradeError::invalid_input(
                    field("grades"),
                    raw,
                    "Duplicate grade symbol",
                ));
            }
        }

        if table.is_empty() {
            return Err(GradeError::invalid_input(
                field("grades"),
                "{}",
                "Scale must define at least one symbol",
            ));
        }

        Ok(GradeScale {
            id,
            name: name.into(),
            grades: table,
            excluded_credit,
            max_weight,
        })
    }

    /// Look up a symbol.
    ///
    /// # Errors
    ///
    /// * `UnknownSymbol` - the symbol is not a key of this scale
    pub fn lookup(&self, symbol: &str) -> GradeResult<GradeValue> {
        self.grades
            .get(&normalize_symbol(symbol))
            .copied()
            .ok_or_else(|| GradeError::unknown_symbol(&self.id, symbol))
    }

    /// All symbols in declaration order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.grades.keys().map(String::as_str)
    }

    /// Symbol/value pairs in declaration order
    pub fn grades(&self) -> impl Iterator<Item = (&str, GradeValue)> {
        self.grades.iter().map(|(s, v)| (s.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    /// Highest numeric value on the scale (0.0 if every symbol is excluded)
    pub fn max_points(&self) -> f64 {
        self.grades
            .values()
            .filter_map(GradeValue::points)
            .fold(0.0, f64::max)
    }

    /// Check a weight against `0 < weight <= max_weight`.
    pub fn weight_is_valid(&self, weight: f64) -> bool {
        weight.is_finite() && weight > 0.0 && weight <= self.max_weight
    }
}

impl std::fmt::Display for GradeScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Builder for [`GradeScale`], validated on [`build`](GradeScaleBuilder::build).
#[derive(Debug, Clone)]
pub struct GradeScaleBuilder {
    id: String,
    name: String,
    grades: Vec<(String, GradeValue)>,
    excluded_credit: ExcludedCredit,
    max_weight: f64,
}

impl GradeScaleBuilder {
    /// Add a symbol counted in the average
    pub fn grade(mut self, symbol: impl Into<String>, points: f64) -> Self {
        self.grades.push((symbol.into(), GradeValue::Points(points)));
        self
    }

    /// Add a symbol mapped to the excluded marker
    pub fn excluded(mut self, symbol: impl Into<String>) -> Self {
        self.grades.push((symbol.into(), GradeValue::EXCLUDED));
        self
    }

    pub fn excluded_credit(mut self, policy: ExcludedCredit) -> Self {
        self.excluded_credit = policy;
        self
    }

    pub fn max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = max_weight;
        self
    }

    pub fn build(self) -> GradeResult<GradeScale> {
        GradeScale::new(
            self.id,
            self.name,
            self.grades,
            self.excluded_credit,
            self.max_weight,
        )
    }
}
