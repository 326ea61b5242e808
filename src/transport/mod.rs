//! A vehicle looping along its waypoint table.
//!
//! A [`Transport`] owns the table built from its path, its cycle timing,
//! its scheduler state and the registry of passengers aboard. Its world
//! pose only changes inside [`Transport::update`] (see `scheduler`) and
//! the relocation step it drives (see `relocate`).

use std::collections::BTreeSet;

use log::{debug, info};

use crate::definitions::{TransportEntry, TransportTemplate};
use crate::error::{ConfigurationError, GeometryError, TransportError};
use crate::events::EventDispatcher;
use crate::frame::{CoordinateFrame, Pose};
use crate::ids::{MapId, PassengerId, TransportId};
use crate::logging::MOVES_TARGET;
use crate::motion::{HopMotion, LinearHop};
use crate::passenger::{Boarding, PassengerHost, PassengerRegistry};
use crate::path::{generate_waypoints, BuiltPath, PathNode, WaypointTable};
use crate::vector_math::is_valid_world_coord;
use crate::world::PartitionManager;

mod relocate;
mod scheduler;

pub use relocate::Relocation;

/// Collaborators a transport reaches while it moves.
pub struct WorldServices<'a> {
    /// Map partitions the transport lives in.
    pub partitions: &'a mut dyn PartitionManager,
    /// Runner for waypoint events.
    pub events: &'a mut dyn EventDispatcher,
    /// Entities that may be aboard.
    pub passengers: &'a mut dyn PassengerHost,
}

/// Scheduler state between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Following the waypoint table.
    #[default]
    Cruising,
    /// Holding at a dock until the countdown runs out.
    Stalled {
        /// Milliseconds left before moving on.
        remaining_ms: u32,
    },
}

/// A vehicle following a fixed, periodically repeating path.
#[derive(Debug)]
pub struct Transport {
    id: TransportId,
    name: String,
    transport_map: MapId,
    period: u32,
    path_time: u32,
    move_speed: f32,
    waypoints: WaypointTable,
    maps: BTreeSet<MapId>,
    map: MapId,
    pose: Pose,
    state: SchedulerState,
    pending_relocation: bool,
    active: bool,
    passengers: PassengerRegistry,
    hop: Box<dyn HopMotion>,
}

impl Transport {
    /// Creates a transport sitting on the first waypoint of `path`.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::ZeroPeriod`] for a zero `period` and
    /// [`GeometryError::OffWorld`] when the first waypoint is not a valid
    /// world coordinate.
    pub fn new(
        id: TransportId,
        path: BuiltPath,
        period: u32,
        move_speed: f32,
    ) -> Result<Self, TransportError> {
        if period == 0 {
            return Err(ConfigurationError::ZeroPeriod { entry: entry_of(id) }.into());
        }
        let BuiltPath {
            waypoints,
            path_time,
            maps,
        } = path;
        let (map, position) = waypoints
            .first()
            .map(|point| (point.map, point.position))
            .unwrap_or_default();
        if !is_valid_world_coord(position) {
            return Err(GeometryError::OffWorld {
                map,
                x: position.x,
                y: position.y,
                z: position.z,
            }
            .into());
        }

        Ok(Self {
            id,
            name: String::new(),
            transport_map: MapId::default(),
            period,
            path_time,
            move_speed,
            waypoints,
            maps,
            map,
            pose: Pose::new(position, 0.0),
            state: SchedulerState::Cruising,
            pending_relocation: false,
            active: false,
            passengers: PassengerRegistry::new(id),
            hop: Box::new(LinearHop::with_speed(move_speed)),
        })
    }

    /// Builds a transport from its authored definition.
    ///
    /// # Errors
    /// Propagates path generation failures and the checks of [`Self::new`].
    pub fn from_definition(
        entry: &TransportEntry,
        template: &TransportTemplate,
        nodes: &[PathNode],
    ) -> Result<Self, TransportError> {
        if entry.period == 0 {
            return Err(ConfigurationError::ZeroPeriod { entry: entry.entry }.into());
        }
        let path = generate_waypoints(template.path_id, nodes)?;
        let transport = Self::new(
            TransportId(u64::from(entry.entry)),
            path,
            entry.period,
            template.move_speed,
        )?
        .with_name(entry.name.clone())
        .with_transport_map(template.transport_map);
        Ok(transport)
    }

    /// Sets the display name used in diagnostics.
    #[must_use]
    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    /// Sets the map id of the vehicle's interior.
    #[must_use]
    pub fn with_transport_map(mut self, map: MapId) -> Self {
        self.transport_map = map;
        self
    }

    /// Replaces the short-hop motion primitive.
    #[must_use]
    pub fn with_hop(mut self, hop: Box<dyn HopMotion>) -> Self {
        self.hop = hop;
        self
    }

    /// Identity of the transport.
    #[must_use]
    pub const fn id(&self) -> TransportId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Map id of the vehicle's interior.
    #[must_use]
    pub const fn transport_map(&self) -> MapId {
        self.transport_map
    }

    /// Full cycle length in milliseconds.
    #[must_use]
    pub const fn period(&self) -> u32 {
        self.period
    }

    /// Duration of one pass along the path in milliseconds.
    #[must_use]
    pub const fn cycle_duration(&self) -> u32 {
        self.path_time
    }

    /// Map the vehicle is currently on.
    #[must_use]
    pub const fn map(&self) -> MapId {
        self.map
    }

    /// Current world pose.
    #[must_use]
    pub const fn current_pose(&self) -> Pose {
        self.pose
    }

    /// Frame anchored on the current pose.
    #[must_use]
    pub const fn frame(&self) -> CoordinateFrame {
        CoordinateFrame::new(self.pose)
    }

    /// Time-keyed waypoints with the scheduler cursor.
    #[must_use]
    pub const fn waypoints(&self) -> &WaypointTable {
        &self.waypoints
    }

    /// Every map the path visits.
    #[must_use]
    pub const fn maps(&self) -> &BTreeSet<MapId> {
        &self.maps
    }

    /// Scheduler state.
    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// `true` while holding at a dock.
    #[must_use]
    pub const fn is_stalled(&self) -> bool {
        matches!(self.state, SchedulerState::Stalled { .. })
    }

    /// `true` when the last relocation failed and will be retried.
    #[must_use]
    pub const fn has_pending_relocation(&self) -> bool {
        self.pending_relocation
    }

    /// `true` when the transport is being ticked.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Passengers aboard.
    #[must_use]
    pub const fn passengers(&self) -> &PassengerRegistry {
        &self.passengers
    }

    /// Starts moving.
    pub fn start(&mut self) {
        info!(
            target: MOVES_TARGET,
            "{} ({}) starts moving, path time {}/{}",
            self.id, self.name, self.path_time, self.period
        );
        self.active = true;
    }

    /// Stops moving; the pose and cursor are kept.
    pub fn stop(&mut self) {
        info!(
            target: MOVES_TARGET,
            "{} ({}) stops moving, path time {}/{}",
            self.id, self.name, self.path_time, self.period
        );
        self.active = false;
    }

    /// Boards a passenger standing at `world`.
    pub fn on_attach(
        &mut self,
        passenger: PassengerId,
        world: Pose,
        host: &mut dyn PassengerHost,
    ) -> Boarding {
        let frame = self.frame();
        self.passengers.attach(passenger, world, &frame, host)
    }

    /// Lets a passenger off; `false` when it was not aboard.
    pub fn on_detach(&mut self, passenger: PassengerId, host: &mut dyn PassengerHost) -> bool {
        self.passengers.detach(passenger, host)
    }

    /// Forgets a passenger whose entity was destroyed.
    pub fn on_passenger_destroyed(&mut self, passenger: PassengerId) -> bool {
        let removed = self.passengers.remove_destroyed(passenger);
        if removed {
            debug!(target: MOVES_TARGET, "{passenger} destroyed aboard {}", self.id);
        }
        removed
    }
}

fn entry_of(id: TransportId) -> u32 {
    u32::try_from(id.0).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passenger::{PassengerKind, PassengerRoster, RosterEntry};
    use crate::path::NodeAction;
    use glam::Vec3;
    use rstest::{fixture, rstest};

    fn shuttle_path() -> BuiltPath {
        let node = |x: f32| PathNode::new(MapId(1), x, 0.0, 0.0);
        let dock = |x: f32| PathNode {
            action: NodeAction::Stop,
            delay_secs: 2,
            ..node(x)
        };
        generate_waypoints(1, &[node(-10.0), dock(0.0), node(100.0), dock(200.0), node(300.0)])
            .expect("shuttle should build")
    }

    #[fixture]
    fn shuttle() -> Transport {
        Transport::new(TransportId(3), shuttle_path(), 60_000, 30.0).expect("valid transport")
    }

    #[rstest]
    fn new_transport_sits_on_its_first_waypoint(shuttle: Transport) {
        assert_eq!(shuttle.map(), MapId(1));
        assert_eq!(shuttle.current_pose().position, Vec3::ZERO);
        assert_eq!(shuttle.period(), 60_000);
        assert_eq!(shuttle.cycle_duration(), 28_084);
        assert!(!shuttle.is_active());
        assert_eq!(shuttle.state(), SchedulerState::Cruising);
    }

    #[rstest]
    fn zero_period_is_a_configuration_error() {
        let err = Transport::new(TransportId(8), shuttle_path(), 0, 30.0).expect_err("zero period");
        assert_eq!(
            err,
            TransportError::Configuration(ConfigurationError::ZeroPeriod { entry: 8 })
        );
    }

    #[rstest]
    fn start_and_stop_toggle_activity(mut shuttle: Transport) {
        shuttle.start();
        assert!(shuttle.is_active());
        shuttle.stop();
        assert!(!shuttle.is_active());
    }

    #[rstest]
    fn boarding_is_relative_to_the_vehicle(mut shuttle: Transport) {
        let mut roster = PassengerRoster::new();
        let id = PassengerId(1);
        roster.insert(id, RosterEntry::new(PassengerKind::Unit, MapId(1), Pose::default()));
        let world = Pose::new(Vec3::new(0.0, 5.0, 0.0), 0.0);
        assert_eq!(shuttle.on_attach(id, world, &mut roster), Boarding::Boarded);
        let local = shuttle.passengers().get(id).expect("aboard").local;
        assert!((local.offset - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-5);
        assert!(shuttle.on_detach(id, &mut roster));
        assert!(!shuttle.on_detach(id, &mut roster));
    }

    #[rstest]
    fn destroyed_passengers_leave_silently(mut shuttle: Transport) {
        let mut roster = PassengerRoster::new();
        let id = PassengerId(2);
        shuttle.on_attach(id, Pose::default(), &mut roster);
        assert!(shuttle.on_passenger_destroyed(id));
        assert!(shuttle.passengers().is_empty());
    }
}
