//! Rotating arms and the chain they form.

use crate::geometry::{self, round2};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single rotating arm.
///
/// Arms are immutable once collected. The arm's tip sweeps a circle of radius
/// `length`, advancing `angle_step` degrees every iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arm {
    /// Radius of rotation.
    pub length: f64,

    /// Degrees advanced per iteration.
    pub angle_step: f64,
}

impl Default for Arm {
    fn default() -> Self {
        Self {
            length: 1.0,
            angle_step: 1.0,
        }
    }
}

impl Arm {
    pub fn new(length: f64, angle_step: f64) -> Self {
        Self { length, angle_step }
    }

    /// Effective facing of this arm at `iteration`, normalised into `[0, 360)`.
    pub fn angle_at(&self, start_angle: f64, iteration: u32) -> f64 {
        (start_angle + self.angle_step * f64::from(iteration)).rem_euclid(360.0)
    }

    /// Planar `(x, z)` displacement of this arm's tip at `iteration`.
    pub fn displacement_at(&self, start_angle: f64, iteration: u32) -> DVec2 {
        geometry::position(self.length, self.angle_at(start_angle, iteration))
    }
}

/// Parses `LENGTH:STEP` (a comma also works as separator).
impl FromStr for Arm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (length, step) = s
            .split_once([':', ','])
            .ok_or_else(|| format!("expected LENGTH:STEP, got `{s}`"))?;
        let length = length
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("bad arm length `{length}`: {e}"))?;
        let angle_step = step
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("bad arm angle step `{step}`: {e}"))?;
        Ok(Self::new(length, angle_step))
    }
}

/// The ordered chain of arms plus the offsets that move the whole chain.
///
/// Rotation state is never stored: every position is a pure function of the
/// iteration index.
#[derive(Clone, Debug, PartialEq)]
pub struct ArmChain<'a> {
    pub arms: &'a [Arm],
    pub start_angle: f64,
    pub initial_offset: DVec3,
    pub per_step_offset: DVec3,
}

impl ArmChain<'_> {
    /// Sum of every arm's planar displacement at `iteration`.
    pub fn displacement_at(&self, iteration: u32) -> DVec2 {
        self.arms
            .iter()
            .map(|arm| arm.displacement_at(self.start_angle, iteration))
            .sum()
    }

    /// Position of the compound point at `iteration`, rounded to two decimals.
    ///
    /// The vertical component has no arm contribution; it comes from the
    /// initial offset and the accumulated drift only.
    pub fn position_at(&self, iteration: u32) -> DVec3 {
        let planar = self.displacement_at(iteration);
        let drift = self.per_step_offset * f64::from(iteration);
        let raw = self.initial_offset + DVec3::new(planar.x, 0.0, planar.y) + drift;
        DVec3::new(round2(raw.x), round2(raw.y), round2(raw.z))
    }

    /// Positions for iterations `0..iterations`, in step order.
    pub fn positions(&self, iterations: u32) -> impl Iterator<Item = DVec3> + '_ {
        (0..iterations).map(move |i| self.position_at(i))
    }
}
