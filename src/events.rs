//! Scripted events fired when a transport reaches or leaves a waypoint.

use log::debug;

use crate::ids::{EventId, TransportId};
use crate::logging::MOVES_TARGET;

/// Executes scripted events on behalf of transports.
pub trait EventDispatcher {
    /// Runs `event` with the transport as both source and target.
    fn fire_event(
        &mut self,
        event: EventId,
        source: TransportId,
        target: TransportId,
        departure: bool,
    );
}

/// A fired event as recorded by [`EventJournal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredEvent {
    /// Event that ran.
    pub event: EventId,
    /// Transport that triggered it.
    pub source: TransportId,
    /// Transport the event acted on.
    pub target: TransportId,
    /// `true` for departure events, `false` for arrivals.
    pub departure: bool,
}

/// Dispatcher that keeps every fired event in order.
#[derive(Debug, Default, Clone)]
pub struct EventJournal {
    fired: Vec<FiredEvent>,
}

impl EventJournal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events fired so far, oldest first.
    #[must_use]
    pub fn fired(&self) -> &[FiredEvent] {
        &self.fired
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&mut self) -> Vec<FiredEvent> {
        std::mem::take(&mut self.fired)
    }
}

impl EventDispatcher for EventJournal {
    fn fire_event(
        &mut self,
        event: EventId,
        source: TransportId,
        target: TransportId,
        departure: bool,
    ) {
        debug!(
            target: MOVES_TARGET,
            "{source} fires {} {event}",
            if departure { "departure" } else { "arrival" }
        );
        self.fired.push(FiredEvent {
            event,
            source,
            target,
            departure,
        });
    }
}
