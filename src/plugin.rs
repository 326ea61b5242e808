//! Bevy plugin driving transports from the app schedule.
//!
//! [`TransportPlugin`] loads every transport when the app is built, stores
//! the result in a [`TransportWorld`] resource and ticks it from `Update`
//! using the app's [`Time`]. Waypoint events fired during a tick leave the
//! resource straight away as [`WaypointEventFired`] triggers.

use std::time::Duration;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::error;
use thiserror::Error;

use crate::definitions::{DefinitionSource, WorldData};
use crate::error::TransportError;
use crate::events::{EventJournal, FiredEvent};
use crate::manager::TransportManager;
use crate::passenger::PassengerRoster;
use crate::transport::WorldServices;
use crate::world::Partitions;

/// Event raised for every transport discarded while loading.
#[derive(Event, Debug, Clone, Error)]
#[error("transport {entry} will not be loaded: {reason}")]
pub struct TransportLoadError {
    /// Entry of the discarded transport.
    pub entry: u32,
    /// Why it was discarded.
    pub reason: TransportError,
}

/// Event raised for every waypoint event a transport fires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaypointEventFired(pub FiredEvent);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_transport_load_error(event: On<TransportLoadError>) {
    error!("{}", event.event());
}

/// Transports together with the in-memory world they move through.
#[derive(Resource, Debug)]
pub struct TransportWorld {
    /// Loaded transports and the world clock.
    pub manager: TransportManager,
    /// Map partitions.
    pub partitions: Partitions,
    /// Entities that can ride transports.
    pub passengers: PassengerRoster,
    /// Events fired during the tick in progress; emptied by every tick.
    events: EventJournal,
    events_fired: u64,
    carry: Duration,
}

impl TransportWorld {
    /// Wraps a loaded manager and its partitions.
    #[must_use]
    pub fn new(manager: TransportManager, partitions: Partitions) -> Self {
        Self {
            manager,
            partitions,
            passengers: PassengerRoster::new(),
            events: EventJournal::new(),
            events_fired: 0,
            carry: Duration::ZERO,
        }
    }

    /// Advances every active transport by `diff_ms`.
    ///
    /// Returns the waypoint events fired during the tick, oldest first. The
    /// world keeps only their running count.
    pub fn tick(&mut self, diff_ms: u32) -> Vec<FiredEvent> {
        let mut services = WorldServices {
            partitions: &mut self.partitions,
            events: &mut self.events,
            passengers: &mut self.passengers,
        };
        self.manager.tick(diff_ms, &mut services);
        let fired = self.events.drain();
        self.events_fired = self
            .events_fired
            .saturating_add(u64::try_from(fired.len()).unwrap_or(u64::MAX));
        fired
    }

    /// Waypoint events fired since the world was created.
    #[must_use]
    pub const fn events_fired(&self) -> u64 {
        self.events_fired
    }

    /// Adds frame time, returning the whole milliseconds to tick.
    ///
    /// Sub-millisecond remainders are kept for the next frame.
    fn accumulate(&mut self, delta: Duration) -> u32 {
        self.carry += delta;
        let whole = u32::try_from(self.carry.as_millis()).unwrap_or(u32::MAX);
        self.carry = self
            .carry
            .saturating_sub(Duration::from_millis(u64::from(whole)));
        whole
    }
}

/// Ticks transports with the frame's elapsed time and triggers the
/// waypoint events they fired.
pub fn advance_transports_system(
    mut commands: Commands,
    time: Res<Time>,
    mut world: ResMut<TransportWorld>,
) {
    let diff_ms = world.accumulate(time.delta());
    if diff_ms == 0 {
        return;
    }
    for fired in world.tick(diff_ms) {
        commands.trigger(WaypointEventFired(fired));
    }
}

/// Bevy plugin loading transports from world data.
#[derive(Debug, Clone, Default)]
pub struct TransportPlugin {
    data: WorldData,
}

impl TransportPlugin {
    /// Plugin that loads the transports described by `data`.
    #[must_use]
    pub fn new(data: WorldData) -> Self {
        Self { data }
    }
}

impl Plugin for TransportPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_transport_load_error);

        let mut partitions = Partitions::new(self.data.map_catalogue());
        let mut manager = TransportManager::new();
        let report = manager.load(&self.data, &mut partitions);
        for (entry, reason) in report.skipped {
            app.world_mut()
                .trigger(TransportLoadError { entry, reason });
        }

        app.insert_resource(TransportWorld::new(manager, partitions));
        app.add_systems(Update, advance_transports_system);
    }
}
