//! Authored path control points.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ids::{EventId, MapId};

/// Behaviour attached to a path node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAction {
    /// Plain control point travelled through at speed.
    #[default]
    None,
    /// The vehicle jumps to this node instead of travelling to it.
    Teleport,
    /// The vehicle decelerates into this node and accelerates away again.
    Stop,
}

/// Ordered control point of an authored transport path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    /// Map the node lies on.
    pub map: MapId,
    /// World x coordinate.
    pub x: f32,
    /// World y coordinate.
    pub y: f32,
    /// World z coordinate.
    pub z: f32,
    /// Stop/teleport behaviour.
    #[serde(default)]
    pub action: NodeAction,
    /// Wait after arriving, in whole seconds.
    #[serde(default)]
    pub delay_secs: u32,
    /// Event fired when the vehicle arrives here.
    #[serde(default)]
    pub arrival_event: Option<EventId>,
    /// Event fired when the vehicle leaves here.
    #[serde(default)]
    pub departure_event: Option<EventId>,
}

impl PathNode {
    /// Creates a plain node with no action, delay or events.
    #[must_use]
    pub const fn new(map: MapId, x: f32, y: f32, z: f32) -> Self {
        Self {
            map,
            x,
            y,
            z,
            action: NodeAction::None,
            delay_secs: 0,
            arrival_event: None,
            departure_event: None,
        }
    }

    /// Node coordinate as a vector.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// `true` for nodes that anchor the acceleration model.
    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.action == NodeAction::Stop
    }

    /// `true` for nodes reached by teleporting.
    #[must_use]
    pub fn is_teleport(&self) -> bool {
        self.action == NodeAction::Teleport
    }
}
