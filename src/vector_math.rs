//! Basic vector math helper functions.
//! Orientation wrapping, planar rotation and world-bounds checks.
use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::constants::{WORLD_EDGE_MARGIN, WORLD_HALF_EXTENT};

/// Wraps an orientation in radians into `[0, 2π)`.
///
/// # Examples
///
/// ```
/// use tramline::vector_math::normalize_orientation;
/// let o = normalize_orientation(-std::f32::consts::FRAC_PI_2);
/// assert!((o - 3.0 * std::f32::consts::FRAC_PI_2).abs() < 1e-5);
/// assert_eq!(normalize_orientation(0.0), 0.0);
/// ```
#[must_use]
pub fn normalize_orientation(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Rotates a planar offset by `angle` radians counter-clockwise.
#[must_use]
pub fn rotate_planar(offset: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(offset)
}

/// Returns `true` when the point lies on a map and every component is finite.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use tramline::vector_math::is_valid_world_coord;
/// assert!(is_valid_world_coord(Vec3::new(-3_500.0, 1_200.0, 20.0)));
/// assert!(!is_valid_world_coord(Vec3::new(f32::NAN, 0.0, 0.0)));
/// assert!(!is_valid_world_coord(Vec3::new(20_000.0, 0.0, 0.0)));
/// ```
#[must_use]
pub fn is_valid_world_coord(point: Vec3) -> bool {
    let limit = WORLD_HALF_EXTENT - WORLD_EDGE_MARGIN;
    point.is_finite() && point.x.abs() <= limit && point.y.abs() <= limit
}
