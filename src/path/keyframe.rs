//! Build-time key frames annotated with distances and dock times.
//!
//! Key frames only live while a waypoint table is being generated. Each pass
//! below fills in one column; the builder consumes the finished frames.

use std::collections::BTreeSet;

use crate::ids::MapId;

use super::kinematics::time_for_distance;
use super::node::PathNode;

/// Authored node plus the distance/time metadata derived from its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFrame<'a> {
    /// Source node.
    pub node: &'a PathNode,
    /// Straight-line distance from the previous frame (0 after a jump).
    pub dist_from_prev: f32,
    /// Distance travelled since the most recent stop.
    pub dist_since_stop: f32,
    /// Distance remaining until the next stop.
    pub dist_until_stop: f32,
    /// Milliseconds since leaving the most recent stop.
    pub t_from: f32,
    /// Milliseconds until reaching the next stop.
    pub t_to: f32,
}

impl<'a> KeyFrame<'a> {
    const fn new(node: &'a PathNode) -> Self {
        Self {
            node,
            dist_from_prev: 0.0,
            dist_since_stop: 0.0,
            dist_until_stop: 0.0,
            t_from: 0.0,
            t_to: 0.0,
        }
    }

    /// Map of the underlying node.
    #[must_use]
    pub const fn map(&self) -> MapId {
        self.node.map
    }
}

/// Selects key frames from an authored path and records the maps it visits.
///
/// The first and last nodes are entry/exit sentinels and are dropped. When a
/// node's successor lies on another map, both the node and that successor are
/// skipped so a single frame on the far side represents the jump.
#[must_use]
pub fn collect_key_frames(nodes: &[PathNode]) -> (Vec<KeyFrame<'_>>, BTreeSet<MapId>) {
    let mut frames = Vec::new();
    let mut maps = BTreeSet::new();
    let mut skip_next = false;

    let interior = nodes.windows(2).skip(1);
    for pair in interior {
        let [node, successor] = pair else { continue };
        if skip_next {
            skip_next = false;
            continue;
        }
        if node.map == successor.map {
            frames.push(KeyFrame::new(node));
            maps.insert(node.map);
        } else {
            skip_next = true;
        }
    }

    (frames, maps)
}

/// Stop indices bracketing the circular distance walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAnchors {
    /// Frame the forward walk starts from.
    pub last_stop: usize,
    /// Frame the backward walk starts after, if any stop follows frame 0.
    pub first_stop: Option<usize>,
}

/// Fills `dist_from_prev` and locates the stop anchors.
///
/// Distances are zero for the first frame, for teleport frames and across
/// map changes.
pub fn measure_segments(frames: &mut [KeyFrame<'_>]) -> StopAnchors {
    let mut last_stop = frames.first().filter(|f| f.node.is_stop()).map(|_| 0);
    let mut first_stop = None;

    let mut previous: Option<&PathNode> = None;
    for (index, frame) in frames.iter_mut().enumerate() {
        frame.dist_from_prev = match previous {
            Some(prev) if !frame.node.is_teleport() && prev.map == frame.node.map => {
                prev.position().distance(frame.node.position())
            }
            _ => 0.0,
        };
        if index > 0 && frame.node.is_stop() {
            first_stop.get_or_insert(index);
            last_stop = Some(index);
        }
        previous = Some(frame.node);
    }

    StopAnchors {
        last_stop: last_stop.unwrap_or(0),
        first_stop,
    }
}

/// Walks the frames circularly to fill `dist_since_stop` and `dist_until_stop`.
///
/// The backward walk continues the forward walk's running total; the stop
/// frame it starts on therefore carries the remainder of the last leg.
#[expect(
    clippy::indexing_slicing,
    reason = "Every index is reduced modulo the frame count."
)]
pub fn accumulate_stop_distances(frames: &mut [KeyFrame<'_>], anchors: StopAnchors) {
    let count = frames.len();
    if count == 0 {
        return;
    }

    let mut running = 0.0;
    for step in 0..count {
        let j = (step + anchors.last_stop) % count;
        if frames[j].node.is_stop() {
            running = 0.0;
        } else {
            running += frames[j].dist_from_prev;
        }
        frames[j].dist_since_stop = running;
    }

    let start = anchors.first_stop.map_or(0, |stop| stop + 1);
    for step in (0..count).rev() {
        let j = (step + start) % count;
        running += frames[(j + 1) % count].dist_from_prev;
        frames[j].dist_until_stop = running;
        if frames[j].node.is_stop() {
            running = 0.0;
        }
    }
}

/// Converts the stop distances into dock times in milliseconds.
pub fn assign_dock_times(frames: &mut [KeyFrame<'_>]) {
    for frame in frames {
        frame.t_from = time_for_distance(frame.dist_since_stop) * 1000.0;
        frame.t_to = time_for_distance(frame.dist_until_stop) * 1000.0;
    }
}
