//! # Evaluation Pipeline
//!
//! Runs the full calculator flow for one page-level request: compute the
//! weighted average, classify it against each threshold set independently,
//! and shape everything into a [`DisplayRecord`].
//!
//! ## Example
//!
//! ```rust
//! use gpa_core::engine::evaluate_profile;
//! use gpa_core::entries::Entry;
//! use gpa_core::scales::GradeScaleRegistry;
//!
//! let registry = GradeScaleRegistry::builtin().unwrap();
//! let entries = vec![
//!     Entry::new("CHEM110", "A", 4.0),
//!     Entry::new("CALC120", "A-", 4.0),
//!     Entry::new("WRIT101", "B+", 3.0),
//!     Entry::new("PE100", "P", 1.0),
//! ];
//!
//! let record = evaluate_profile(registry, "northfield-state", &entries).unwrap();
//! assert_eq!(record.average_display, "3.70");
//! assert_eq!(record.classification("Latin Honors").unwrap().label, "Magna Cum Laude");
//! assert_eq!(record.classification("Dean's List").unwrap().label, "Not Eligible");
//! ```

use log::debug;

use crate::calculations::{classify_all, compute, ThresholdSet};
use crate::entries::Entry;
use crate::errors::GradeResult;
use crate::format::{format, DisplayRecord};
use crate::scales::{GradeScale, GradeScaleRegistry};

/// Compute, classify and format in one call.
pub fn evaluate<'a, I>(entries: I, scale: &GradeScale, threshold_sets: &[ThresholdSet]) -> DisplayRecord
where
    I: IntoIterator<Item = &'a Entry>,
{
    let calc = compute(entries, scale);
    let classifications = classify_all(&calc, threshold_sets);
    format(&calc, &classifications)
}

/// Evaluate entries with a registered institution profile.
///
/// # Errors
///
/// * `UnknownProfile` - `profile_id` is not registered
/// * `UnknownScale` - the profile's scale is missing from the registry
pub fn evaluate_profile<'a, I>(
    registry: &GradeScaleRegistry,
    profile_id: &str,
    entries: I,
) -> GradeResult<DisplayRecord>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let (profile, scale) = registry.profile_with_scale(profile_id)?;
    debug!("evaluating profile '{}' on scale '{}'", profile.id, scale.id);
    Ok(evaluate(entries, scale, &profile.threshold_sets))
}
