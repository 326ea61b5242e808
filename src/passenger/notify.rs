//! Per-category behaviour when a transport changes maps.

use log::debug;

use crate::constants::TRANSFER_RESURRECT_HEALTH;
use crate::frame::Pose;
use crate::ids::{MapId, PassengerId};
use crate::logging::MOVES_TARGET;

use super::host::{PassengerHost, PassengerKind, TeleportOptions, WorldLocation};

/// Describes a transport's jump between two maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapChange {
    /// Map the transport leaves.
    pub old_map: MapId,
    /// Transport pose before the jump.
    pub old_pose: Pose,
    /// Where the transport lands.
    pub destination: WorldLocation,
    /// Interior map of the transport itself, reported to clients.
    pub transport_map: MapId,
}

impl MapChange {
    /// `true` when source and destination maps differ.
    #[must_use]
    pub fn crosses_maps(&self) -> bool {
        self.old_map != self.destination.map
    }
}

/// Capability implemented per passenger category.
pub trait MapChangeHandler: Sync {
    /// Runs before the transport leaves its old map.
    fn on_map_change_begin(&self, id: PassengerId, change: &MapChange, host: &mut dyn PassengerHost);
    /// Runs after the transport joined its new map.
    fn on_map_change_end(&self, id: PassengerId, change: &MapChange, host: &mut dyn PassengerHost);
}

/// Players follow the transport by teleporting with it.
#[derive(Debug, Default)]
pub struct PlayerTransfer;

impl MapChangeHandler for PlayerTransfer {
    fn on_map_change_begin(&self, id: PassengerId, change: &MapChange, host: &mut dyn PassengerHost) {
        if host.is_dead(id) && !host.is_ghost(id) {
            host.resurrect(id, TRANSFER_RESURRECT_HEALTH);
        }
        if host.has_session(id) && change.crosses_maps() {
            host.send_new_world(id, change.transport_map);
        }
        debug!(
            target: MOVES_TARGET,
            "{id} follows transport from {} to {}",
            change.old_map,
            change.destination.map
        );
        host.teleport(
            id,
            change.destination,
            TeleportOptions::NOT_LEAVE_TRANSPORT | TeleportOptions::NO_DELAY,
        );
    }

    fn on_map_change_end(&self, _id: PassengerId, _change: &MapChange, _host: &mut dyn PassengerHost) {}
}

/// Non-player units stay behind for now.
// TODO: despawn units on the old map and respawn them on the new one once
// unit spawning exposes a cross-map hand-off.
#[derive(Debug, Default)]
pub struct UnitTransfer;

impl MapChangeHandler for UnitTransfer {
    fn on_map_change_begin(&self, _id: PassengerId, _change: &MapChange, _host: &mut dyn PassengerHost) {}

    fn on_map_change_end(&self, _id: PassengerId, _change: &MapChange, _host: &mut dyn PassengerHost) {}
}

/// Objects and corpses are not carried across maps.
#[derive(Debug, Default)]
pub struct InertTransfer;

impl MapChangeHandler for InertTransfer {
    fn on_map_change_begin(&self, _id: PassengerId, _change: &MapChange, _host: &mut dyn PassengerHost) {}

    fn on_map_change_end(&self, _id: PassengerId, _change: &MapChange, _host: &mut dyn PassengerHost) {}
}

/// Handler responsible for a passenger category.
#[must_use]
pub fn handler_for(kind: PassengerKind) -> &'static dyn MapChangeHandler {
    match kind {
        PassengerKind::Player => &PlayerTransfer,
        PassengerKind::Unit => &UnitTransfer,
        PassengerKind::Inert => &InertTransfer,
    }
}
