//! Scheduled transports that loop along authored paths and carry passengers.
//!
//! Paths are turned into time-keyed waypoint tables once at load time
//! ([`path::generate_waypoints`]); each world tick the scheduler looks up
//! where every transport should be, fires waypoint events, relocates the
//! vehicle and keeps passengers in place relative to it, including when the
//! vehicle jumps between maps.
pub mod constants;
pub mod definitions;
pub mod error;
pub mod events;
pub mod frame;
pub mod ids;
pub mod logging;
pub mod manager;
pub mod motion;
pub mod numeric;
pub mod passenger;
pub mod path;
pub mod plugin;
pub mod transport;
pub mod vector_math;
pub mod world;

pub use definitions::{DefinitionSource, WorldData};
pub use error::{ConfigurationError, DefinitionsError, GeometryError, TransportError};
pub use events::{EventDispatcher, EventJournal, FiredEvent};
pub use frame::{CoordinateFrame, LocalPose, Pose};
pub use ids::{EventId, MapId, PassengerId, TransportId};
pub use logging::init as init_logging;
pub use manager::{LoadReport, TransportManager, WorldClock};
pub use motion::{HopMotion, LinearHop};
pub use passenger::{Boarding, PassengerHost, PassengerRegistry};
pub use path::{generate_waypoints, BuiltPath, PathNode, WayPoint, WaypointTable};
pub use plugin::{TransportLoadError, TransportPlugin, TransportWorld, WaypointEventFired};
pub use transport::{Relocation, SchedulerState, Transport, WorldServices};
pub use world::{MapInfo, PartitionManager, Partitions};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use tramline::prelude::*;
    //! ```

    pub use crate::frame::{CoordinateFrame, Pose};
    pub use crate::ids::{MapId, PassengerId, TransportId};
    pub use crate::path::{generate_waypoints, NodeAction, PathNode};
    pub use crate::transport::{Transport, WorldServices};
    pub use crate::TransportPlugin;
    pub use crate::WorldData;
}
