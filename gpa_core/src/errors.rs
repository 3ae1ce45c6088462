//! # Error Types
//!
//! Structured error types for gpa_core. Only genuine programmer or
//! integration mistakes are errors: an unknown scale, an unknown symbol
//! passed to a direct lookup, malformed configuration. Ordinary user input
//! problems (bad credit hours, an empty course list) are reported as data
//! inside [`CalculationResult`](crate::calculations::CalculationResult).
//!
//! ## Example
//!
//! ```rust
//! use gpa_core::errors::{GradeError, GradeResult};
//!
//! fn validate_target(target: f64) -> GradeResult<()> {
//!     if !target.is_finite() || target < 0.0 {
//!         return Err(GradeError::invalid_input(
//!             "target",
//!             target.to_string(),
//!             "Target average must be a non-negative number",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_target(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gpa_core operations
pub type GradeResult<T> = Result<T, GradeError>;

/// Structured error type for grade calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GradeError {
    /// Requested scale identifier is not registered
    #[error("Unknown grade scale: '{scale_id}'")]
    UnknownScale { scale_id: String },

    /// Symbol is not a key of the active scale
    #[error("Unknown grade symbol '{symbol}' for scale '{scale_id}'")]
    UnknownSymbol { scale_id: String, symbol: String },

    /// Requested institution profile is not registered
    #[error("Unknown institution profile: '{profile_id}'")]
    UnknownProfile { profile_id: String },

    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A threshold set violates its ordering or labeling rules
    #[error("Invalid threshold set '{set_name}': {reason}")]
    InvalidThresholds { set_name: String, reason: String },

    /// No entry with the given id exists in the entry list
    #[error("Entry not found: {id}")]
    EntryNotFound { id: String },

    /// Configuration could not be read or parsed
    #[error("Configuration error in {source_name}: {reason}")]
    Config { source_name: String, reason: String },
}

impl GradeError {
    /// Create an UnknownScale error
    pub fn unknown_scale(scale_id: impl Into<String>) -> Self {
        GradeError::UnknownScale {
            scale_id: scale_id.into(),
        }
    }

    /// Create an UnknownSymbol error
    pub fn unknown_symbol(scale_id: impl Into<String>, symbol: impl Into<String>) -> Self {
        GradeError::UnknownSymbol {
            scale_id: scale_id.into(),
            symbol: symbol.into(),
        }
    }

    /// Create an UnknownProfile error
    pub fn unknown_profile(profile_id: impl Into<String>) -> Self {
        GradeError::UnknownProfile {
            profile_id: profile_id.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GradeError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidThresholds error
    pub fn invalid_thresholds(set_name: impl Into<String>, reason: impl Into<String>) -> Self {
        GradeError::InvalidThresholds {
            set_name: set_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        GradeError::Config {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// True for errors a constrained UI (dropdowns, validated ids) should
    /// have made impossible.
    pub fn is_integration_bug(&self) -> bool {
        matches!(
            self,
            GradeError::UnknownScale { .. }
                | GradeError::UnknownSymbol { .. }
                | GradeError::UnknownProfile { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GradeError::UnknownScale { .. } => "UNKNOWN_SCALE",
            GradeError::UnknownSymbol { .. } => "UNKNOWN_SYMBOL",
            GradeError::UnknownProfile { .. } => "UNKNOWN_PROFILE",
            GradeError::InvalidInput { .. } => "INVALID_INPUT",
            GradeError::InvalidThresholds { .. } => "INVALID_THRESHOLDS",
            GradeError::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
            GradeError::Config { .. } => "CONFIG_ERROR",
        }
    }
}
