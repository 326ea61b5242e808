//! One-dimensional motion model shared by the waypoint builder.
//!
//! The vehicle accelerates uniformly away from a stop until it reaches cruise
//! speed, then holds that speed. Decelerating into the next stop mirrors the
//! acceleration, so the same curve answers "how long since the last stop" and
//! "how long until the next one".

use crate::constants::{ACCELERATION, CRUISE_DISTANCE, CRUISE_SPEED, CRUISE_TIME_MS};

/// Seconds needed to cover `distance` units starting from rest.
///
/// # Examples
/// ```
/// use tramline::path::time_for_distance;
/// assert!((time_for_distance(50.0) - 10.0).abs() < 1e-5);
/// assert!((time_for_distance(750.0) - 40.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn time_for_distance(distance: f32) -> f32 {
    if distance < CRUISE_DISTANCE {
        (2.0 * distance / ACCELERATION).sqrt()
    } else {
        (distance - CRUISE_DISTANCE) / CRUISE_SPEED + CRUISE_SPEED / ACCELERATION
    }
}

/// Distance covered `elapsed_ms` milliseconds after leaving rest.
///
/// Inverse of [`time_for_distance`], expressed in milliseconds.
#[must_use]
pub fn distance_for_time(elapsed_ms: f32) -> f32 {
    if elapsed_ms <= CRUISE_TIME_MS {
        let secs = elapsed_ms / 1000.0;
        0.5 * ACCELERATION * secs * secs
    } else {
        CRUISE_DISTANCE + CRUISE_SPEED * ((elapsed_ms - CRUISE_TIME_MS) / 1000.0)
    }
}
