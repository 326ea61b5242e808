//! Arena of passenger records keyed by entity identifier.
//!
//! The registry never owns the entities it tracks. Each record keeps the
//! passenger's transport-local pose captured at boarding; world poses are
//! re-derived from it whenever the vehicle moves.

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use log::{debug, trace};

use crate::frame::{CoordinateFrame, LocalPose, Pose};
use crate::ids::{PassengerId, TransportId};
use crate::logging::MOVES_TARGET;

use super::host::{PassengerHost, TransportSeat};
use super::notify::{handler_for, MapChange};

/// Outcome of [`PassengerRegistry::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boarding {
    /// The passenger was not aboard before.
    Boarded,
    /// The passenger was already aboard; its local pose was refreshed.
    Updated,
}

/// Which half of a map transition is being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapChangePhase {
    /// Before the vehicle leaves the old map.
    Begin,
    /// After the vehicle joined the new map.
    End,
}

/// One attached passenger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerRecord {
    /// Pose relative to the vehicle.
    pub local: LocalPose,
    /// Monotonic boarding order, used to notify passengers deterministically.
    pub boarded: u64,
}

/// Passengers attached to one transport.
#[derive(Debug, Clone)]
pub struct PassengerRegistry {
    transport: TransportId,
    records: HashMap<PassengerId, PassengerRecord>,
    next_boarding: u64,
    initialized: bool,
}

impl PassengerRegistry {
    /// Creates an empty registry for `transport`.
    #[must_use]
    pub fn new(transport: TransportId) -> Self {
        Self {
            transport,
            records: HashMap::new(),
            next_boarding: 0,
            initialized: false,
        }
    }

    /// Boards `id` at its current world pose.
    ///
    /// Re-attaching a passenger that is already aboard recomputes its local
    /// pose in place and keeps its boarding order.
    pub fn attach(
        &mut self,
        id: PassengerId,
        world: Pose,
        frame: &CoordinateFrame,
        host: &mut dyn PassengerHost,
    ) -> Boarding {
        let local = frame.to_local(world);
        let outcome = match self.records.entry(id) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().local = local;
                Boarding::Updated
            }
            Entry::Vacant(slot) => {
                slot.insert(PassengerRecord {
                    local,
                    boarded: self.next_boarding,
                });
                self.next_boarding += 1;
                Boarding::Boarded
            }
        };
        self.initialized = true;

        if host.is_unit_controlled(id) {
            host.set_transport_seat(
                id,
                Some(TransportSeat {
                    transport: self.transport,
                    local,
                }),
            );
        }
        debug!(
            target: MOVES_TARGET,
            "{id} {outcome:?} on {} at local {:?}",
            self.transport,
            local.offset
        );
        outcome
    }

    /// Removes `id` and clears its transport data.
    ///
    /// Returns `false`, without touching the entity, when it was not aboard.
    pub fn detach(&mut self, id: PassengerId, host: &mut dyn PassengerHost) -> bool {
        if self.records.remove(&id).is_none() {
            return false;
        }
        if host.is_unit_controlled(id) {
            host.set_transport_seat(id, None);
        }
        debug!(target: MOVES_TARGET, "{id} left {}", self.transport);
        true
    }

    /// Forgets an entity that no longer exists.
    pub fn remove_destroyed(&mut self, id: PassengerId) -> bool {
        self.records.remove(&id).is_some()
    }

    /// Re-places every passenger relative to the vehicle's new pose.
    ///
    /// Does nothing until the first passenger has boarded.
    pub fn update_all(&self, frame: &CoordinateFrame, host: &mut dyn PassengerHost) {
        if !self.initialized {
            return;
        }
        for (id, record) in &self.records {
            let pose = frame.to_world(record.local);
            trace!(target: MOVES_TARGET, "{id} follows {} to {:?}", self.transport, pose.position);
            host.place(*id, pose);
        }
    }

    /// Announces one half of a map transition to every passenger.
    pub fn notify_map_change(
        &self,
        phase: MapChangePhase,
        change: &MapChange,
        host: &mut dyn PassengerHost,
    ) {
        for id in self.boarding_order() {
            let handler = handler_for(host.classify(id));
            match phase {
                MapChangePhase::Begin => handler.on_map_change_begin(id, change, host),
                MapChangePhase::End => handler.on_map_change_end(id, change, host),
            }
        }
    }

    /// Passenger identifiers in boarding order.
    #[must_use]
    pub fn boarding_order(&self) -> Vec<PassengerId> {
        let mut ids: Vec<(u64, PassengerId)> = self
            .records
            .iter()
            .map(|(id, record)| (record.boarded, *id))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Record for `id`, if aboard.
    #[must_use]
    pub fn get(&self, id: PassengerId) -> Option<&PassengerRecord> {
        self.records.get(&id)
    }

    /// `true` when `id` is aboard.
    #[must_use]
    pub fn contains(&self, id: PassengerId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of passengers aboard.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when nobody is aboard.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `true` once any passenger has boarded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }
}
