//! Kinematic and scheduling constants used across systems.
//!
//! The motion model values reproduce the timings that existing transport paths
//! were authored against. Changing them shifts every arrival and departure.

/// Acceleration away from (and deceleration into) a stop, in units/s².
pub const ACCELERATION: f32 = 1.0;
/// Cruise speed reached after leaving a stop, in units/s.
pub const CRUISE_SPEED: f32 = 30.0;
/// Distance covered while accelerating to cruise speed.
pub const CRUISE_DISTANCE: f32 = 0.5 * CRUISE_SPEED * CRUISE_SPEED / ACCELERATION;
/// Time spent accelerating to cruise speed, in milliseconds.
pub const CRUISE_TIME_MS: f32 = CRUISE_SPEED / ACCELERATION * 1000.0;
/// Resolution of the waypoint table clock, in milliseconds.
pub const SAMPLE_STEP_MS: i64 = 100;

/// Waypoint gaps longer than this are treated as an authored dock.
pub const STALL_THRESHOLD_MS: u32 = 5000;
/// Upper bound on waypoints consumed by a single scheduler tick.
pub const MAX_WAYPOINTS_PER_TICK: usize = 64;

/// Half the edge length of a map, in world units.
pub const WORLD_HALF_EXTENT: f32 = 17_066.666;
/// Margin kept between valid coordinates and the map edge.
pub const WORLD_EDGE_MARGIN: f32 = 0.5;
/// Positions closer than this are considered identical when relocating.
pub const POSITION_EPSILON: f32 = 1e-3;

/// Health fraction restored when a dead passenger is carried across maps.
pub const TRANSFER_RESURRECT_HEALTH: f32 = 1.0;
