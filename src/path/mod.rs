//! Authored transport paths and the waypoint tables generated from them.
//!
//! [`generate_waypoints`] turns a sparse list of [`PathNode`]s into a
//! [`WaypointTable`] keyed by milliseconds since the start of the cycle, so
//! the scheduler can look positions up instead of integrating motion.

mod builder;
pub mod keyframe;
mod kinematics;
mod node;
mod waypoint;

pub use builder::{generate_waypoints, BuiltPath, MIN_PATH_NODES};
pub use keyframe::KeyFrame;
pub use kinematics::{distance_for_time, time_for_distance};
pub use node::{NodeAction, PathNode};
pub use waypoint::{WayPoint, WaypointTable};
