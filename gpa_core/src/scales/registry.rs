//! # Grade Scale Registry
//!
//! Maps scale identifiers to [`GradeScale`]s and profile identifiers to
//! [`InstitutionProfile`]s. One registry replaces the per-institution
//! calculator pages: the institution differs only in data.
//!
//! The built-in registry is parsed once from the embedded TOML table and
//! shared for the life of the process. Callers wanting custom scales build
//! their own registry (usually by cloning the built-in one and merging a
//! user file over it).
//!
//! ## Example
//!
//! ```rust
//! use gpa_core::scales::GradeScaleRegistry;
//!
//! let registry = GradeScaleRegistry::builtin().unwrap();
//! let scale = registry.resolve("standard").unwrap();
//! assert_eq!(scale.lookup("A-").unwrap().points(), Some(3.7));
//!
//! assert!(registry.resolve("no-such-scale").is_err());
//! ```

use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::calculations::ThresholdSet;
use crate::config::{ProfileConfig, RegistryConfig, ScaleConfig};
use crate::errors::{GradeError, GradeResult};
use crate::scales::{GradeScale, GradeValue};

static BUILTIN: Lazy<GradeResult<GradeScaleRegistry>> =
    Lazy::new(|| RegistryConfig::builtin().and_then(GradeScaleRegistry::from_config));

/// Data-driven description of one institution's calculator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionProfile {
    pub id: String,
    pub name: String,
    /// Scale this profile calculates with
    pub scale_id: String,
    /// Independent classification axes, in display order
    pub threshold_sets: Vec<ThresholdSet>,
}

impl InstitutionProfile {
    fn from_config(id: &str, config: &ProfileConfig) -> GradeResult<Self> {
        let threshold_sets = config
            .thresholds
            .iter()
            .map(ThresholdSet::from_config)
            .collect::<GradeResult<Vec<_>>>()?;

        Ok(InstitutionProfile {
            id: id.to_string(),
            name: config.name.clone(),
            scale_id: config.scale.clone(),
            threshold_sets,
        })
    }
}

/// Registry of grade scales and institution profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GradeScaleRegistry {
    scales: IndexMap<String, GradeScale>,
    profiles: IndexMap<String, InstitutionProfile>,
}

impl GradeScaleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry built from the embedded table.
    pub fn builtin() -> GradeResult<&'static GradeScaleRegistry> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    /// Validate a parsed configuration into a registry.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` / `InvalidThresholds` - a scale or threshold set is malformed
    /// * `UnknownScale` - a profile references a scale that is not defined
    pub fn from_config(config: RegistryConfig) -> GradeResult<Self> {
        let mut registry = GradeScaleRegistry::new();
        registry.apply(config)?;
        Ok(registry)
    }

    pub fn from_toml_str(source: &str, source_name: &str) -> GradeResult<Self> {
        Self::from_config(RegistryConfig::from_toml_str(source, source_name)?)
    }

    pub fn from_toml_file(path: &Path) -> GradeResult<Self> {
        Self::from_config(RegistryConfig::from_toml_file(path)?)
    }

    /// Overlay another registry; scales and profiles with the same id replace ours.
    pub fn merge(&mut self, other: GradeScaleRegistry) {
        self.scales.extend(other.scales);
        self.profiles.extend(other.profiles);
    }

    /// Overlay a parsed configuration, validating profiles against the merged scales.
    pub fn apply(&mut self, config: RegistryConfig) -> GradeResult<()> {
        for (id, scale) in &config.scales {
            self.register_scale(scale_from_config(id, scale)?);
        }
        for (id, profile) in &config.profiles {
            self.register_profile(InstitutionProfile::from_config(id, profile)?)?;
        }
        Ok(())
    }

    /// Add or replace a scale.
    pub fn register_scale(&mut self, scale: GradeScale) {
        self.scales.insert(scale.id.clone(), scale);
    }

    /// Add or replace a profile. Its scale must already be registered.
    pub fn register_profile(&mut self, profile: InstitutionProfile) -> GradeResult<()> {
        if !self.scales.contains_key(&profile.scale_id) {
            return Err(GradeError::unknown_scale(&profile.scale_id));
        }
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Find a scale by id.
    ///
    /// # Errors
    ///
    /// * `UnknownScale` - `scale_id` is not registered
    pub fn resolve(&self, scale_id: &str) -> GradeResult<&GradeScale> {
        self.scales
            .get(scale_id)
            .ok_or_else(|| GradeError::unknown_scale(scale_id))
    }

    /// Resolve a scale and look a symbol up in it.
    pub fn lookup(&self, scale_id: &str, symbol: &str) -> GradeResult<GradeValue> {
        self.resolve(scale_id)?.lookup(symbol)
    }

    /// Find a profile by id.
    pub fn profile(&self, profile_id: &str) -> GradeResult<&InstitutionProfile> {
        self.profiles
            .get(profile_id)
            .ok_or_else(|| GradeError::unknown_profile(profile_id))
    }

    /// Resolve a profile together with its scale.
    pub fn profile_with_scale(&self, profile_id: &str) -> GradeResult<(&InstitutionProfile, &GradeScale)> {
        let profile = self.profile(profile_id)?;
        let scale = self.resolve(&profile.scale_id)?;
        Ok((profile, scale))
    }

    /// Scales in declaration order
    pub fn scales(&self) -> impl Iterator<Item = &GradeScale> {
        self.scales.values()
    }

    /// Profiles in declaration order
    pub fn profiles(&self) -> impl Iterator<Item = &InstitutionProfile> {
        self.profiles.values()
    }

    /// Scale ids in declaration order
    pub fn scale_ids(&self) -> impl Iterator<Item = &str> {
        self.scales.keys().map(String::as_str)
    }
}

fn scale_from_config(id: &str, config: &ScaleConfig) -> GradeResult<GradeScale> {
    GradeScale::new(
        id,
        config.name.clone(),
        config.grades.iter().map(|(s, v)| (s.clone(), *v)),
        config.excluded_credit,
        config.max_weight,
    )
}
