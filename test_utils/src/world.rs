//! In-memory world harness for driving transports by hand.

use tramline::events::EventJournal;
use tramline::ids::MapId;
use tramline::transport::{Transport, WorldServices};
use tramline::world::{MapInfo, PartitionManager, Partitions};

use crate::host::RecordingHost;

/// Partitions, event journal and passenger host bundled for tests.
#[derive(Debug, Default)]
pub struct TestWorld {
    /// Map partitions.
    pub partitions: Partitions,
    /// Fired waypoint events.
    pub journal: EventJournal,
    /// Passenger host.
    pub host: RecordingHost,
}

impl TestWorld {
    /// World knowing `maps`, each created up front.
    pub fn with_maps(maps: &[u32]) -> Self {
        let mut partitions = Partitions::new(
            maps.iter()
                .map(|map| (MapId(*map), MapInfo::default())),
        );
        for map in maps {
            partitions.create_or_get(MapId(*map));
        }
        Self {
            partitions,
            ..Self::default()
        }
    }

    /// Borrows the collaborators for one call.
    pub fn services(&mut self) -> WorldServices<'_> {
        WorldServices {
            partitions: &mut self.partitions,
            events: &mut self.journal,
            passengers: &mut self.host,
        }
    }

    /// Runs one scheduler tick.
    pub fn tick(&mut self, transport: &mut Transport, now_ms: u32, diff_ms: u32) {
        transport.update(now_ms, diff_ms, &mut self.services());
    }
}
