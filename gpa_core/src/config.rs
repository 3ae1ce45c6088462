//! # Configuration
//!
//! Grade scales, threshold sets and institution profiles are declared in
//! TOML rather than code. This module holds the raw, serde-facing shapes of
//! that file; [`GradeScaleRegistry`](crate::scales::GradeScaleRegistry)
//! validates them into engine types.
//!
//! ## File Format
//!
//! ```toml
//! [scales.standard]
//! name = "Standard 4.0"
//! excluded_credit = "count-attempted"
//! max_weight = 12.0
//!
//! [scales.standard.grades]
//! "A" = 4.0
//! "B" = 3.0
//! "P" = "excluded"
//!
//! [profiles.state-u]
//! name = "State University"
//! scale = "standard"
//!
//! [[profiles.state-u.thresholds]]
//! name = "Dean's List"
//! fallback = "Not Eligible"
//! min_total_weight = 12.0
//! tiers = [{ threshold = 3.5, label = "Dean's List" }]
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{GradeError, GradeResult};
use crate::scales::{ExcludedCredit, GradeValue, DEFAULT_MAX_WEIGHT};

/// Built-in scale and profile table, embedded at compile time
pub const BUILTIN_CONFIG: &str = include_str!("../data/grade_scales.toml");

/// Source name used in error messages for the embedded table
pub const BUILTIN_SOURCE: &str = "built-in grade_scales.toml";

/// Root of a grade-scale configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default)]
    pub scales: IndexMap<String, ScaleConfig>,

    #[serde(default)]
    pub profiles: IndexMap<String, ProfileConfig>,
}

/// One `[scales.<id>]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleConfig {
    pub name: String,

    #[serde(default)]
    pub excluded_credit: ExcludedCredit,

    #[serde(default = "default_max_weight")]
    pub max_weight: f64,

    pub grades: IndexMap<String, GradeValue>,
}

/// One `[profiles.<id>]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub name: String,

    /// Scale id this profile calculates with
    pub scale: String,

    #[serde(default)]
    pub thresholds: Vec<ThresholdSetConfig>,
}

/// One `[[profiles.<id>.thresholds]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdSetConfig {
    pub name: String,
    pub fallback: String,

    #[serde(default)]
    pub min_total_weight: Option<f64>,

    pub tiers: Vec<TierConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    pub threshold: f64,
    pub label: String,
}

fn default_max_weight() -> f64 {
    DEFAULT_MAX_WEIGHT
}

impl RegistryConfig {
    /// Parse a configuration document.
    ///
    /// `source_name` only appears in error messages.
    pub fn from_toml_str(source: &str, source_name: &str) -> GradeResult<Self> {
        toml::from_str(source).map_err(|e| GradeError::config(source_name, e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn from_toml_file(path: &Path) -> GradeResult<Self> {
        let source_name = path.display().to_string();
        let source = std::fs::read_to_string(path)
            .map_err(|e| GradeError::config(&source_name, e.to_string()))?;
        Self::from_toml_str(&source, &source_name)
    }

    /// The embedded built-in table
    pub fn builtin() -> GradeResult<Self> {
        Self::from_toml_str(BUILTIN_CONFIG, BUILTIN_SOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [scales.simple]
        name = "Simple"
        excluded_credit = "count-attempted"

        [scales.simple.grades]
        "A" = 4.0
        "B" = 3.0
        "S" = "excluded"

        [profiles.simple-u]
        name = "Simple University"
        scale = "simple"

        [[profiles.simple-u.thresholds]]
        name = "Honors"
        fallback = "None"
        tiers = [{ threshold = 3.5, label = "Honors" }]
    "#;

    #[test]
    fn test_parse_sample() {
        let config = RegistryConfig::from_toml_str(SAMPLE, "sample").unwrap();
        let scale = &config.scales["simple"];
        assert_eq!(scale.name, "Simple");
        assert_eq!(scale.excluded_credit, ExcludedCredit::CountAttempted);
        assert_eq!(scale.max_weight, DEFAULT_MAX_WEIGHT);
        assert_eq!(scale.grades["A"], GradeValue::Points(4.0));
        assert!(scale.grades["S"].is_excluded());

        let profile = &config.profiles["simple-u"];
        assert_eq!(profile.scale, "simple");
        assert_eq!(profile.thresholds[0].tiers[0].label, "Honors");
        assert_eq!(profile.thresholds[0].min_total_weight, None);
    }

    #[test]
    fn test_rejects_unknown_marker() {
        let source = r#"
            [scales.bad]
            name = "Bad"
            [scales.bad.grades]
            "P" = "pass"
        "#;
        let err = RegistryConfig::from_toml_str(source, "bad.toml").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_rejects_unknown_field() {
        let source = r#"
            [scales.bad]
            name = "Bad"
            rounding = 3
            [scales.bad.grades]
            "A" = 4.0
        "#;
        assert!(RegistryConfig::from_toml_str(source, "bad.toml").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = RegistryConfig::from_toml_file(Path::new("/nonexistent/scales.toml")).unwrap_err();
        assert!(matches!(err, GradeError::Config { .. }));
    }

    #[test]
    fn test_builtin_parses() {
        let config = RegistryConfig::builtin().unwrap();
        assert!(!config.scales.is_empty());
        assert!(!config.profiles.is_empty());
    }
}
