//! # gpa_core - Grade-Point Calculation Engine
//!
//! `gpa_core` is the single engine behind every GPA and score calculator:
//! one parameterized implementation, with each institution supplied as data
//! (a grade scale plus threshold sets) instead of a copy of the logic.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from caller-owned entries and static
//!   scale data to a fresh result
//! - **Data-driven**: Scales and honors thresholds come from TOML
//! - **Round once**: Full precision until [`format::format`] builds the display record
//! - **Soft validation**: Bad credit hours or unknown grades are reported in
//!   the result, never thrown
//!
//! ## Quick Start
//!
//! ```rust
//! use gpa_core::{classify_all, compute, format, Entry, GradeScaleRegistry};
//!
//! let registry = GradeScaleRegistry::builtin().unwrap();
//! let scale = registry.resolve("thirds").unwrap();
//! let profile = registry.profile("lakeshore-college").unwrap();
//!
//! let entries = vec![
//!     Entry::new("MATH101", "A", 4.0),
//!     Entry::new("ENG101", "B+", 3.0),
//! ];
//!
//! let calc = compute(&entries, scale);
//! let classifications = classify_all(&calc, &profile.threshold_sets);
//!
//! let record = format(&calc, &classifications);
//! println!("GPA {} over {} credits", record.average_display, record.total_weight);
//!
//! // 7 credits is below the Dean's List minimum load
//! let deans = record.classification("Dean's List").unwrap();
//! assert!(!deans.eligible);
//! ```
//!
//! ## Modules
//!
//! - [`scales`] - Grade scales and the scale/profile registry
//! - [`entries`] - Entry type and caller-owned entry list
//! - [`calculations`] - Weighted average, classification, projections
//! - [`format`] - Display record and rounding
//! - [`engine`] - Compute → classify → format pipeline
//! - [`config`] - TOML configuration format
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod engine;
pub mod entries;
pub mod errors;
pub mod format;
pub mod scales;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    classify, classify_all, classify_calculation, compute, CalculationResult, ClassificationResult,
    ThresholdSet, Tier,
};
pub use engine::{evaluate, evaluate_profile};
pub use entries::{Entry, EntryList};
pub use errors::{GradeError, GradeResult};
pub use format::{format, DisplayRecord};
pub use scales::{GradeScale, GradeScaleRegistry, GradeValue, InstitutionProfile};
