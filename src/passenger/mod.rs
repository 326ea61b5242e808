//! Passengers riding transports.
//!
//! The [`PassengerRegistry`] tracks who is aboard and where they stand
//! relative to the vehicle. Entities themselves are reached through the
//! [`PassengerHost`] collaborator, and map transitions are dispatched to a
//! [`MapChangeHandler`] chosen by passenger category.

mod host;
mod notify;
mod registry;
mod roster;

pub use host::{PassengerHost, PassengerKind, TeleportOptions, TransportSeat, WorldLocation};
pub use notify::{
    handler_for, InertTransfer, MapChange, MapChangeHandler, PlayerTransfer, UnitTransfer,
};
pub use registry::{Boarding, MapChangePhase, PassengerRecord, PassengerRegistry};
pub use roster::{PassengerRoster, RosterEntry};
