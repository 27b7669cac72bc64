//! Planar arm geometry.

use glam::DVec2;

/// Returns the displacement of an arm of `arm_length` rotated by `angle_degrees`.
///
/// The result is `(x, z)`: `x` is the lateral component (`L·cos θ`) and `y` of the
/// returned vector carries the depth component (`L·sin θ`). Non-finite inputs
/// propagate; a zero-length arm yields the origin.
pub fn position(arm_length: f64, angle_degrees: f64) -> DVec2 {
    DVec2::from_angle(angle_degrees.to_radians()) * arm_length
}

/// Rounds `value` to two decimal places.
///
/// Rounds the exact binary value, so `2.675` (stored just below) gives `2.67`,
/// and breaks exact ties to even (`0.125` gives `0.12`). Non-finite values pass
/// through unchanged.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
