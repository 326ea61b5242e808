//! Converts authored path nodes into a dense, time-keyed waypoint table.
//!
//! The builder walks every leg between consecutive key frames at
//! [`SAMPLE_STEP_MS`] resolution, using whichever end of the leg exerts the
//! stronger pull (the shorter of the dock times) to decide how far along the
//! leg the vehicle is. Samples are not kept as waypoints; the sampling
//! exists to land every arrival on the right millisecond. A leg that ends
//! on another map marks its arrival as the teleport entry.

use std::collections::{BTreeMap, BTreeSet};

use crate::constants::SAMPLE_STEP_MS;
use crate::error::ConfigurationError;
use crate::ids::MapId;
use crate::numeric::{clock_to_key, secs_to_ms, truncate_ms};

use super::keyframe::{
    accumulate_stop_distances, assign_dock_times, collect_key_frames, measure_segments, KeyFrame,
};
use super::kinematics::distance_for_time;
use super::node::PathNode;
use super::waypoint::{WayPoint, WaypointTable};

#[expect(
    clippy::cast_precision_loss,
    reason = "The sample step is a small constant."
)]
const STEP: f32 = SAMPLE_STEP_MS as f32;

/// Minimum authored nodes: entry sentinel, one key frame, exit sentinel.
pub const MIN_PATH_NODES: usize = 3;

/// Output of [`generate_waypoints`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltPath {
    /// Time-keyed waypoints with the cursor on the first leg.
    pub waypoints: WaypointTable,
    /// Duration of one pass along the path, in milliseconds.
    pub path_time: u32,
    /// Every map the path visits.
    pub maps: BTreeSet<MapId>,
}

/// Builds the waypoint table for an authored path.
///
/// # Errors
/// Returns [`ConfigurationError::PathTooShort`] for paths with fewer than
/// [`MIN_PATH_NODES`] nodes, [`ConfigurationError::EmptyPath`] when no key
/// frame survives sentinel removal and map-change coalescing, and
/// [`ConfigurationError::DurationOverflow`] when the path clock exceeds `u32`.
///
/// # Examples
/// ```
/// use tramline::ids::MapId;
/// use tramline::path::{generate_waypoints, NodeAction, PathNode};
///
/// let mut dock = PathNode::new(MapId(0), 0.0, 0.0, 0.0);
/// dock.action = NodeAction::Stop;
/// let nodes = vec![
///     PathNode::new(MapId(0), -10.0, 0.0, 0.0),
///     dock,
///     PathNode::new(MapId(0), 50.0, 0.0, 0.0),
///     PathNode::new(MapId(0), 60.0, 0.0, 0.0),
/// ];
/// let built = generate_waypoints(42, &nodes).expect("path should build");
/// assert_eq!(built.waypoints.get(0).map(|(key, _)| key), Some(0));
/// assert!(built.path_time > 0);
/// ```
pub fn generate_waypoints(
    path_id: u32,
    nodes: &[PathNode],
) -> Result<BuiltPath, ConfigurationError> {
    if nodes.len() < MIN_PATH_NODES {
        return Err(ConfigurationError::PathTooShort {
            path_id,
            len: nodes.len(),
        });
    }

    let (mut frames, maps) = collect_key_frames(nodes);
    if frames.is_empty() {
        return Err(ConfigurationError::EmptyPath { path_id });
    }
    let anchors = measure_segments(&mut frames);
    accumulate_stop_distances(&mut frames, anchors);
    assign_dock_times(&mut frames);

    let mut clock = PathClock::new(path_id);
    let mut points = BTreeMap::new();
    clock.emit_origin(&frames, &mut points)?;
    for leg in frames.windows(2) {
        let [from, to] = leg else { continue };
        clock.sample_leg(from, to);
        clock.emit_arrival(from, to, &mut points)?;
    }

    let path_time = clock.key()?;
    let waypoints =
        WaypointTable::from_keyed(points).ok_or(ConfigurationError::EmptyPath { path_id })?;
    Ok(BuiltPath {
        waypoints,
        path_time,
        maps,
    })
}

/// Running path clock.
struct PathClock {
    path_id: u32,
    now: i64,
}

impl PathClock {
    const fn new(path_id: u32) -> Self {
        Self {
            path_id,
            now: 0,
        }
    }

    fn key(&self) -> Result<u32, ConfigurationError> {
        clock_to_key(self.now).ok_or(ConfigurationError::DurationOverflow {
            path_id: self.path_id,
        })
    }

    /// Emits the spawn waypoint at time zero.
    ///
    /// It counts as a teleport when the cycle ends on another map, because
    /// wrapping around then jumps back across the boundary.
    fn emit_origin(
        &mut self,
        frames: &[KeyFrame<'_>],
        points: &mut BTreeMap<u32, WayPoint>,
    ) -> Result<(), ConfigurationError> {
        let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
            return Err(ConfigurationError::EmptyPath {
                path_id: self.path_id,
            });
        };
        let teleport = last.map() != first.map();
        points.insert(0, waypoint_for(first.node, teleport));
        self.now += secs_to_ms(first.node.delay_secs);
        Ok(())
    }

    /// Steps along one leg in fixed increments.
    ///
    /// The clock ends on the last sample that was still short of the
    /// destination.
    fn sample_leg(&mut self, from: &KeyFrame<'_>, to: &KeyFrame<'_>) {
        let length = to.dist_from_prev;
        let mut travelled = 0.0_f32;
        let mut t_from = from.t_from;
        let mut t_to = from.t_to;
        if !(travelled < length && t_to > 0.0) {
            return;
        }

        while travelled < length && t_to > 0.0 {
            t_from += STEP;
            t_to -= STEP;

            travelled = if t_from < t_to {
                // Still inside the departure dock's pull.
                distance_for_time(t_from) - from.dist_since_stop
            } else {
                from.dist_until_stop - distance_for_time(t_to)
            };
            self.now += SAMPLE_STEP_MS;
        }
        self.now -= SAMPLE_STEP_MS;
    }

    /// Emits the destination waypoint of a leg and applies its authored delay.
    fn emit_arrival(
        &mut self,
        from: &KeyFrame<'_>,
        to: &KeyFrame<'_>,
        points: &mut BTreeMap<u32, WayPoint>,
    ) -> Result<(), ConfigurationError> {
        let remainder = truncate_ms(to.t_to) % SAMPLE_STEP_MS;
        self.now += if to.t_from > to.t_to {
            SAMPLE_STEP_MS - remainder
        } else {
            remainder
        };

        let teleport = to.node.is_teleport() || to.map() != from.map();
        points.insert(self.key()?, waypoint_for(to.node, teleport));
        self.now += secs_to_ms(to.node.delay_secs);
        Ok(())
    }
}

fn waypoint_for(node: &PathNode, teleport: bool) -> WayPoint {
    WayPoint {
        arrival_event: node.arrival_event,
        departure_event: node.departure_event,
        ..WayPoint::new(node.map, node.position(), teleport)
    }
}
