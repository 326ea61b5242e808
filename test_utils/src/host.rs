//! Passenger host that records calls in order.

use tramline::frame::Pose;
use tramline::ids::{MapId, PassengerId};
use tramline::passenger::{
    PassengerHost, PassengerKind, PassengerRoster, RosterEntry, TeleportOptions, TransportSeat,
    WorldLocation,
};

/// A call observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// `set_transport_seat`.
    Seat(PassengerId, Option<TransportSeat>),
    /// `place`.
    Place(PassengerId, Pose),
    /// `resurrect`.
    Resurrect(PassengerId, f32),
    /// `send_new_world`.
    NewWorld(PassengerId, MapId),
    /// `teleport`.
    Teleport(PassengerId, WorldLocation, TeleportOptions),
}

/// [`PassengerRoster`] wrapper that logs every mutating call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Backing entity state.
    pub roster: PassengerRoster,
    /// Calls in the order they were made.
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity of `kind` on `map` at `pose`.
    pub fn spawn(&mut self, id: PassengerId, kind: PassengerKind, map: MapId, pose: Pose) {
        self.roster.insert(id, RosterEntry::new(kind, map, pose));
    }

    /// Kills an entity, optionally releasing it as a ghost.
    pub fn kill(&mut self, id: PassengerId, ghost: bool) {
        if let Some(entry) = self.roster.get_mut(id) {
            entry.health = 0.0;
            entry.ghost = ghost;
        }
    }

    /// Calls concerning `id`, in order.
    pub fn calls_for(&self, id: PassengerId) -> Vec<&HostCall> {
        self.calls
            .iter()
            .filter(|call| match call {
                HostCall::Seat(who, _)
                | HostCall::Place(who, _)
                | HostCall::Resurrect(who, _)
                | HostCall::NewWorld(who, _)
                | HostCall::Teleport(who, _, _) => *who == id,
            })
            .collect()
    }
}

impl PassengerHost for RecordingHost {
    fn is_player_controlled(&self, id: PassengerId) -> bool {
        self.roster.is_player_controlled(id)
    }

    fn is_unit_controlled(&self, id: PassengerId) -> bool {
        self.roster.is_unit_controlled(id)
    }

    fn set_transport_seat(&mut self, id: PassengerId, seat: Option<TransportSeat>) {
        self.calls.push(HostCall::Seat(id, seat));
        self.roster.set_transport_seat(id, seat);
    }

    fn place(&mut self, id: PassengerId, pose: Pose) {
        self.calls.push(HostCall::Place(id, pose));
        self.roster.place(id, pose);
    }

    fn is_dead(&self, id: PassengerId) -> bool {
        self.roster.is_dead(id)
    }

    fn is_ghost(&self, id: PassengerId) -> bool {
        self.roster.is_ghost(id)
    }

    fn resurrect(&mut self, id: PassengerId, health_fraction: f32) {
        self.calls.push(HostCall::Resurrect(id, health_fraction));
        self.roster.resurrect(id, health_fraction);
    }

    fn has_session(&self, id: PassengerId) -> bool {
        self.roster.has_session(id)
    }

    fn send_new_world(&mut self, id: PassengerId, transport_map: MapId) {
        self.calls.push(HostCall::NewWorld(id, transport_map));
        self.roster.send_new_world(id, transport_map);
    }

    fn teleport(&mut self, id: PassengerId, destination: WorldLocation, options: TeleportOptions) {
        self.calls.push(HostCall::Teleport(id, destination, options));
        self.roster.teleport(id, destination, options);
    }
}
