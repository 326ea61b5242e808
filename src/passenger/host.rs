//! Interface to the entities that ride transports.
//!
//! Passengers live in the wider world and are owned elsewhere; transports
//! only reach them by identifier through a [`PassengerHost`].

use bitflags::bitflags;

use crate::frame::{LocalPose, Pose};
use crate::ids::{MapId, PassengerId, TransportId};

bitflags! {
    /// Adjustments applied when a player is moved on a transport's behalf.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TeleportOptions: u8 {
        /// Keep the player attached to the transport across the move.
        const NOT_LEAVE_TRANSPORT = 1;
        /// Skip the usual teleport delay.
        const NO_DELAY = 1 << 1;
    }
}

/// Broad category used to pick map-change behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassengerKind {
    /// Controlled by a connected player.
    Player,
    /// Any other unit (creatures, pets).
    Unit,
    /// Objects and corpses with no movement state of their own.
    Inert,
}

/// Transport data recorded on a unit while it rides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportSeat {
    /// Transport being ridden.
    pub transport: TransportId,
    /// Offset from the transport at boarding time.
    pub local: LocalPose,
}

/// World position on a specific map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldLocation {
    /// Map of the location.
    pub map: MapId,
    /// Position and facing on that map.
    pub pose: Pose,
}

/// Entity-side operations the transport system relies on.
pub trait PassengerHost {
    /// `true` for entities driven by a player.
    fn is_player_controlled(&self, id: PassengerId) -> bool;
    /// `true` for units, players included.
    fn is_unit_controlled(&self, id: PassengerId) -> bool;
    /// Records or clears the "on transport" state of a unit.
    fn set_transport_seat(&mut self, id: PassengerId, seat: Option<TransportSeat>);
    /// Moves the entity to a new world pose on its current map.
    fn place(&mut self, id: PassengerId, pose: Pose);
    /// `true` when the entity is dead.
    fn is_dead(&self, id: PassengerId) -> bool;
    /// `true` when a dead player has released to a ghost.
    fn is_ghost(&self, id: PassengerId) -> bool;
    /// Brings a dead player back with the given health fraction.
    fn resurrect(&mut self, id: PassengerId, health_fraction: f32);
    /// `true` when a client session is attached to the entity.
    fn has_session(&self, id: PassengerId) -> bool;
    /// Tells the client a world switch is coming.
    fn send_new_world(&mut self, id: PassengerId, transport_map: MapId);
    /// Moves a player to another location, possibly on another map.
    fn teleport(&mut self, id: PassengerId, destination: WorldLocation, options: TeleportOptions);

    /// Classifies an entity for map-change dispatch.
    fn classify(&self, id: PassengerId) -> PassengerKind {
        if self.is_player_controlled(id) {
            PassengerKind::Player
        } else if self.is_unit_controlled(id) {
            PassengerKind::Unit
        } else {
            PassengerKind::Inert
        }
    }
}
