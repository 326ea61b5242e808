//! Owner of every loaded transport.
//!
//! The [`TransportManager`] builds transports from authored definitions,
//! places them into their starting partitions, keeps the world clock and
//! ticks every active transport.

use log::{debug, info};

use crate::definitions::{DefinitionSource, TemplateKind, TransportEntry};
use crate::error::{ConfigurationError, TransportError};
use crate::ids::{MapId, TransportId};
use crate::transport::{Transport, WorldServices};
use crate::world::PartitionManager;

/// Millisecond world clock that wraps like a 32-bit tick counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldClock {
    now_ms: u32,
}

impl WorldClock {
    /// Clock reading `now_ms`.
    #[must_use]
    pub const fn starting_at(now_ms: u32) -> Self {
        Self { now_ms }
    }

    /// Current reading.
    #[must_use]
    pub const fn now(&self) -> u32 {
        self.now_ms
    }

    /// Moves the clock forward, wrapping on overflow.
    pub fn advance(&mut self, diff_ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(diff_ms);
    }
}

/// Outcome of [`TransportManager::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Transports created and started.
    pub loaded: usize,
    /// Entries that were discarded, with the reason.
    pub skipped: Vec<(u32, TransportError)>,
}

/// Registry of live transports.
#[derive(Debug, Default)]
pub struct TransportManager {
    transports: Vec<Transport>,
    clock: WorldClock,
}

impl TransportManager {
    /// Creates an empty manager with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty manager with the clock at `now_ms`.
    #[must_use]
    pub fn with_clock(now_ms: u32) -> Self {
        Self {
            transports: Vec::new(),
            clock: WorldClock::starting_at(now_ms),
        }
    }

    /// Builds every transport listed by `source`.
    ///
    /// A bad entry only discards that transport; the reason is returned in
    /// the report for the caller to log.
    pub fn load(
        &mut self,
        source: &dyn DefinitionSource,
        partitions: &mut dyn PartitionManager,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        for entry in source.transports() {
            match load_one(entry, source, partitions) {
                Ok(transport) => {
                    debug!(
                        "loaded {} ({}) on {}, path time {}",
                        transport.id(),
                        transport.name(),
                        transport.map(),
                        transport.cycle_duration()
                    );
                    self.transports.push(transport);
                    report.loaded += 1;
                }
                Err(err) => report.skipped.push((entry.entry, err)),
            }
        }
        info!(
            "loaded {} transports, skipped {}",
            report.loaded,
            report.skipped.len()
        );
        report
    }

    /// Adds an already built transport.
    pub fn insert(&mut self, transport: Transport) {
        self.transports.push(transport);
    }

    /// Transport with the given identity.
    #[must_use]
    pub fn by_guid(&self, id: TransportId) -> Option<&Transport> {
        self.transports.iter().find(|transport| transport.id() == id)
    }

    /// Mutable transport with the given identity.
    pub fn by_guid_mut(&mut self, id: TransportId) -> Option<&mut Transport> {
        self.transports
            .iter_mut()
            .find(|transport| transport.id() == id)
    }

    /// Transport whose interior is `map`.
    #[must_use]
    pub fn by_transport_map(&self, map: MapId) -> Option<&Transport> {
        self.transports
            .iter()
            .find(|transport| transport.transport_map() == map)
    }

    /// `true` when the catalogue marks `map` as a transport interior.
    #[must_use]
    pub fn is_transport_map(partitions: &dyn PartitionManager, map: MapId) -> bool {
        partitions
            .map_info(map)
            .is_some_and(|info| info.is_transport)
    }

    /// Every transport in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Transport> {
        self.transports.iter()
    }

    /// Number of transports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    /// `true` when nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Current world clock.
    #[must_use]
    pub const fn clock(&self) -> WorldClock {
        self.clock
    }

    /// Advances the world clock and every active transport.
    pub fn tick(&mut self, diff_ms: u32, services: &mut WorldServices<'_>) {
        self.clock.advance(diff_ms);
        let now = self.clock.now();
        for transport in self.transports.iter_mut().filter(|t| t.is_active()) {
            transport.update(now, diff_ms, services);
        }
    }
}

fn load_one(
    entry: &TransportEntry,
    source: &dyn DefinitionSource,
    partitions: &mut dyn PartitionManager,
) -> Result<Transport, TransportError> {
    let template = source
        .template(entry.entry)
        .ok_or(ConfigurationError::MissingTemplate { entry: entry.entry })?;
    if template.kind != TemplateKind::MoTransport {
        return Err(ConfigurationError::WrongTemplateKind { entry: entry.entry }.into());
    }
    let nodes = source
        .path(template.path_id)
        .ok_or(ConfigurationError::InvalidPathId {
            path_id: template.path_id,
        })?;

    let mut transport = Transport::from_definition(entry, template, nodes)?;
    let supported = partitions
        .map_info(transport.map())
        .is_some_and(|info| !info.instanceable);
    if !supported {
        return Err(ConfigurationError::UnsupportedMap {
            entry: entry.entry,
            map: transport.map(),
        }
        .into());
    }

    transport.place_in_world(partitions)?;
    transport.start();
    Ok(transport)
}
