//! Time-keyed waypoint table with a circular cursor.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::ids::{EventId, MapId};

/// Position the vehicle occupies at a given offset into its cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct WayPoint {
    /// Map the waypoint lies on.
    pub map: MapId,
    /// World coordinate.
    pub position: Vec3,
    /// Reached by a jump rather than by travel.
    pub teleport: bool,
    /// Event fired when the vehicle arrives.
    pub arrival_event: Option<EventId>,
    /// Event fired when the vehicle departs.
    pub departure_event: Option<EventId>,
}

impl WayPoint {
    /// Creates a waypoint without events.
    #[must_use]
    pub const fn new(map: MapId, position: Vec3, teleport: bool) -> Self {
        Self {
            map,
            position,
            teleport,
            arrival_event: None,
            departure_event: None,
        }
    }

    /// Event fired on arrival or departure, if authored.
    #[must_use]
    pub const fn event(&self, departure: bool) -> Option<EventId> {
        if departure {
            self.departure_event
        } else {
            self.arrival_event
        }
    }
}

/// Waypoints ordered by milliseconds since cycle start.
///
/// The table is never empty. The cursor names the waypoint the vehicle most
/// recently reached; its successor wraps from the last entry to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointTable {
    entries: Vec<(u32, WayPoint)>,
    current: usize,
}

impl WaypointTable {
    /// Builds a table from keyed waypoints, or `None` when there are none.
    ///
    /// The cursor starts on the second entry (the first real leg), matching a
    /// vehicle spawned at the first waypoint and already heading onwards.
    #[must_use]
    pub fn from_keyed(points: BTreeMap<u32, WayPoint>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut table = Self {
            entries: points.into_iter().collect(),
            current: 0,
        };
        table.reset_cursor();
        Some(table)
    }

    /// Moves the cursor back to its post-construction position.
    pub fn reset_cursor(&mut self) {
        self.current = 1 % self.entries.len();
    }

    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when the vehicle has nowhere to go.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Index of the waypoint under the cursor.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Index of the waypoint after the cursor.
    #[must_use]
    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.entries.len()
    }

    /// Waypoint under the cursor with its key.
    #[must_use]
    pub fn current(&self) -> Option<(u32, &WayPoint)> {
        self.get(self.current)
    }

    /// Waypoint after the cursor with its key.
    #[must_use]
    pub fn next(&self) -> Option<(u32, &WayPoint)> {
        self.get(self.next_index())
    }

    /// Keyed waypoint at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(u32, &WayPoint)> {
        self.entries.get(index).map(|(key, point)| (*key, point))
    }

    /// First waypoint, where the vehicle spawns.
    #[must_use]
    pub fn first(&self) -> Option<&WayPoint> {
        self.entries.first().map(|(_, point)| point)
    }

    /// Advances the cursor one step, wrapping past the last entry.
    pub fn advance(&mut self) {
        self.current = self.next_index();
    }

    /// Iterates keyed waypoints in cycle order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &WayPoint)> {
        self.entries.iter().map(|(key, point)| (*key, point))
    }
}
