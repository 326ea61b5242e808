//! Typed identifiers shared across the crate.
//!
//! Maps, scripted events, transports and passengers are all keyed by plain
//! integers in authored data. Wrapping them keeps a map id from being passed
//! where an event id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// World partition ("map") identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MapId(pub u32);

/// Scripted event identifier fired on waypoint arrival or departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

/// Stable identity of a transport instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportId(pub u64);

/// Stable identity of an entity riding a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassengerId(pub u64);

macro_rules! id_display {
    ($($name:ident => $label:literal),* $(,)?) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($label, "#{}"), self.0)
                }
            }
        )*
    };
}

id_display! {
    MapId => "map",
    EventId => "event",
    TransportId => "transport",
    PassengerId => "passenger",
}

impl From<u32> for MapId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for EventId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<u64> for PassengerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
