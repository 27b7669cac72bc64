//! Trajectory parameters and their TOML representation.

use crate::arm::{Arm, ArmChain};
use crate::error::{Error, Result};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a compiler run needs.
///
/// Missing TOML keys fall back to [`Default`], which mirrors the defaults of the
/// interactive tool this format replaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Particle effect name, e.g. `flame`.
    pub particle: String,
    /// Trailing particle arguments, interpolated verbatim.
    pub particle_params: String,
    pub arms: Vec<Arm>,
    pub iterations: u32,
    /// Linear drift added every iteration.
    pub per_step_offset: DVec3,
    /// Absolute displacement of the first step.
    pub initial_offset: DVec3,
    /// Starting facing of every arm, in degrees.
    pub start_angle: f64,

    /// Tag entities the effect passes through.
    pub tagging: bool,
    pub tag_radius: f64,
    pub tag_name: String,
    /// Entity type (or type tag) never tagged.
    pub excluded_entity_type: String,

    // Proxy mode only.
    pub objective: String,
    pub marker_tag: String,
    /// Function that re-invokes itself, e.g. `particle:trajectory`.
    pub function: String,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            particle: "flame".to_string(),
            particle_params: "0 0 0 0.1 0 force @a[distance=..50]".to_string(),
            arms: vec![Arm::default()],
            iterations: 50,
            per_step_offset: DVec3::ZERO,
            initial_offset: DVec3::ZERO,
            start_angle: 0.0,
            tagging: false,
            tag_radius: 1.0,
            tag_name: "target".to_string(),
            excluded_entity_type: "#system:nothing".to_string(),
            objective: "particle_worker".to_string(),
            marker_tag: "particle_gen".to_string(),
            function: "particle:trajectory".to_string(),
        }
    }
}

impl TrajectoryConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks the input contract the compilers rely on.
    ///
    /// The compilers themselves never call this; callers decide when input is
    /// complete enough to check.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        if self.particle.trim().is_empty() {
            return invalid("particle name is empty".into());
        }
        if self.arms.is_empty() {
            return invalid("at least one arm is required".into());
        }
        if self.iterations == 0 {
            return invalid("iteration count must be positive".into());
        }
        for (i, arm) in self.arms.iter().enumerate() {
            if !arm.length.is_finite() || arm.length < 0.0 {
                return invalid(format!("arm {} has invalid length {}", i + 1, arm.length));
            }
            if !arm.angle_step.is_finite() {
                return invalid(format!("arm {} has invalid angle step", i + 1));
            }
        }
        if !self.start_angle.is_finite() {
            return invalid("start angle must be finite".into());
        }
        if !self.initial_offset.is_finite() || !self.per_step_offset.is_finite() {
            return invalid("offsets must be finite".into());
        }
        if self.tagging && !(self.tag_radius.is_finite() && self.tag_radius > 0.0) {
            return invalid(format!("tag radius must be positive, got {}", self.tag_radius));
        }
        Ok(())
    }

    /// The arm chain described by this configuration.
    pub fn chain(&self) -> ArmChain<'_> {
        ArmChain {
            arms: &self.arms,
            start_angle: self.start_angle,
            initial_offset: self.initial_offset,
            per_step_offset: self.per_step_offset,
        }
    }
}
