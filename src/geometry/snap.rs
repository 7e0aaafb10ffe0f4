//! Grid and angle snapping
//!
//! All snapping rounds to the nearest step (not floor). A step of zero
//! or less disables snapping.

use super::math::Vec3;

/// Snap a single value to grid
pub fn snap_value(value: f32, grid_size: f32) -> f32 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap X and Z to the grid, leaving Y untouched
pub fn snap_xz(position: Vec3, grid_size: f32) -> Vec3 {
    Vec3::new(
        snap_value(position.x, grid_size),
        position.y,
        snap_value(position.z, grid_size),
    )
}

/// Clamp a height to `min`, snap it, then clamp again.
///
/// The second clamp matters when `min` is not a multiple of the grid:
/// rounding can land below the floor. The result is a fixed point, so
/// feeding it back in returns the same value.
pub fn clamp_snap(value: f32, min: f32, grid_size: f32) -> f32 {
    snap_value(value.max(min), grid_size).max(min)
}

/// Snap an angle in degrees to `step_degrees` increments
pub fn snap_angle(degrees: f32, step_degrees: f32) -> f32 {
    snap_value(degrees, step_degrees)
}
