//! In-memory [`PassengerHost`] used by the demo binary and tests.

use hashbrown::HashMap;
use log::debug;

use crate::frame::Pose;
use crate::ids::{MapId, PassengerId};
use crate::logging::MOVES_TARGET;

use super::host::{PassengerHost, PassengerKind, TeleportOptions, TransportSeat, WorldLocation};

/// State tracked for one rostered entity.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    /// Category of the entity.
    pub kind: PassengerKind,
    /// Map the entity is on.
    pub map: MapId,
    /// World pose.
    pub pose: Pose,
    /// Transport data while riding.
    pub seat: Option<TransportSeat>,
    /// Health fraction; zero means dead.
    pub health: f32,
    /// Released spirit of a dead player.
    pub ghost: bool,
    /// Client session attached.
    pub session: bool,
}

impl RosterEntry {
    /// Live entity of the given kind at a location; players get a session.
    #[must_use]
    pub fn new(kind: PassengerKind, map: MapId, pose: Pose) -> Self {
        Self {
            kind,
            map,
            pose,
            seat: None,
            health: 1.0,
            ghost: false,
            session: kind == PassengerKind::Player,
        }
    }
}

/// Plain collection of entities keyed by identifier.
#[derive(Debug, Default, Clone)]
pub struct PassengerRoster {
    entries: HashMap<PassengerId, RosterEntry>,
}

impl PassengerRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entity.
    pub fn insert(&mut self, id: PassengerId, entry: RosterEntry) {
        self.entries.insert(id, entry);
    }

    /// Removes an entity, returning its last state.
    pub fn remove(&mut self, id: PassengerId) -> Option<RosterEntry> {
        self.entries.remove(&id)
    }

    /// State of an entity.
    #[must_use]
    pub fn get(&self, id: PassengerId) -> Option<&RosterEntry> {
        self.entries.get(&id)
    }

    /// Mutable state of an entity.
    pub fn get_mut(&mut self, id: PassengerId) -> Option<&mut RosterEntry> {
        self.entries.get_mut(&id)
    }
}

impl PassengerHost for PassengerRoster {
    fn is_player_controlled(&self, id: PassengerId) -> bool {
        self.get(id)
            .is_some_and(|entry| entry.kind == PassengerKind::Player)
    }

    fn is_unit_controlled(&self, id: PassengerId) -> bool {
        self.get(id)
            .is_some_and(|entry| entry.kind != PassengerKind::Inert)
    }

    fn set_transport_seat(&mut self, id: PassengerId, seat: Option<TransportSeat>) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.seat = seat;
        }
    }

    fn place(&mut self, id: PassengerId, pose: Pose) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.pose = pose;
        }
    }

    fn is_dead(&self, id: PassengerId) -> bool {
        self.get(id).is_some_and(|entry| entry.health <= 0.0)
    }

    fn is_ghost(&self, id: PassengerId) -> bool {
        self.get(id).is_some_and(|entry| entry.ghost)
    }

    fn resurrect(&mut self, id: PassengerId, health_fraction: f32) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.health = health_fraction;
            entry.ghost = false;
        }
    }

    fn has_session(&self, id: PassengerId) -> bool {
        self.get(id).is_some_and(|entry| entry.session)
    }

    fn send_new_world(&mut self, id: PassengerId, transport_map: MapId) {
        // No client session to notify in memory.
        debug!(target: MOVES_TARGET, "{id} is shown transport map {transport_map}");
    }

    fn teleport(&mut self, id: PassengerId, destination: WorldLocation, options: TeleportOptions) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.map = destination.map;
            entry.pose = destination.pose;
            if !options.contains(TeleportOptions::NOT_LEAVE_TRANSPORT) {
                entry.seat = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rstest::rstest;

    #[rstest]
    #[case(PassengerKind::Player, PassengerKind::Player)]
    #[case(PassengerKind::Unit, PassengerKind::Unit)]
    #[case(PassengerKind::Inert, PassengerKind::Inert)]
    fn classification_follows_kind(#[case] kind: PassengerKind, #[case] expected: PassengerKind) {
        let mut roster = PassengerRoster::new();
        roster.insert(PassengerId(1), RosterEntry::new(kind, MapId(0), Pose::default()));
        assert_eq!(roster.classify(PassengerId(1)), expected);
    }

    #[rstest]
    fn unknown_entities_are_inert() {
        let roster = PassengerRoster::new();
        assert_eq!(roster.classify(PassengerId(9)), PassengerKind::Inert);
        assert!(!roster.is_dead(PassengerId(9)));
    }

    #[rstest]
    fn teleport_moves_the_entity_across_maps() {
        let mut roster = PassengerRoster::new();
        roster.insert(
            PassengerId(2),
            RosterEntry::new(PassengerKind::Player, MapId(0), Pose::default()),
        );
        let destination = WorldLocation {
            map: MapId(1),
            pose: Pose::new(Vec3::new(5.0, 6.0, 7.0), 1.0),
        };
        roster.teleport(PassengerId(2), destination, TeleportOptions::NO_DELAY);
        let entry = roster.get(PassengerId(2)).expect("rostered");
        assert_eq!(entry.map, MapId(1));
        assert_eq!(entry.pose, destination.pose);
    }
}
