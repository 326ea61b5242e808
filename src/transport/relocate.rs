//! Moving the vehicle's representation, within a map or across maps.

use glam::Vec3;
use log::debug;

use crate::constants::POSITION_EPSILON;
use crate::error::GeometryError;
use crate::frame::Pose;
use crate::ids::MapId;
use crate::logging::MOVES_TARGET;
use crate::passenger::{MapChange, MapChangePhase, WorldLocation};
use crate::vector_math::is_valid_world_coord;
use crate::world::PartitionManager;

use super::{Transport, WorldServices};

/// What a relocation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// The vehicle moved within its map; passengers must follow.
    Moved,
    /// The vehicle changed maps and passengers were handed over.
    Transferred,
    /// The vehicle was already there.
    Unchanged,
}

impl Transport {
    /// Places a freshly created transport into its starting partition.
    ///
    /// # Errors
    /// Returns [`GeometryError::PartitionUnavailable`] when the start map
    /// cannot be created.
    pub fn place_in_world(
        &mut self,
        partitions: &mut dyn PartitionManager,
    ) -> Result<(), GeometryError> {
        if !partitions.create_or_get(self.map) {
            return Err(GeometryError::PartitionUnavailable { map: self.map });
        }
        partitions.relocate(self.id, self.map, self.pose);
        partitions.add_active(self.map, self.id);
        Ok(())
    }

    /// Moves the vehicle to `position` on `map`.
    ///
    /// Teleports and map changes go through the partition manager; a map
    /// change also hands every passenger over to the destination.
    ///
    /// # Errors
    /// Returns [`GeometryError::OffWorld`] for invalid coordinates and
    /// [`GeometryError::PartitionUnavailable`] when the destination map
    /// cannot be created. The vehicle is left untouched in both cases.
    pub fn relocate(
        &mut self,
        map: MapId,
        position: Vec3,
        teleport: bool,
        services: &mut WorldServices<'_>,
    ) -> Result<Relocation, GeometryError> {
        if !is_valid_world_coord(position) {
            return Err(GeometryError::OffWorld {
                map,
                x: position.x,
                y: position.y,
                z: position.z,
            });
        }

        if teleport || map != self.map {
            if !services.partitions.create_or_get(map) {
                return Err(GeometryError::PartitionUnavailable { map });
            }
            if map != self.map {
                self.transfer(map, position, services);
                return Ok(Relocation::Transferred);
            }
        }
        Ok(self.move_within_map(position, services))
    }

    fn move_within_map(&mut self, position: Vec3, services: &mut WorldServices<'_>) -> Relocation {
        if self.pose.position.distance(position) <= POSITION_EPSILON {
            return Relocation::Unchanged;
        }
        self.pose.position = position;
        services.partitions.relocate(self.id, self.map, self.pose);
        Relocation::Moved
    }

    fn transfer(&mut self, map: MapId, position: Vec3, services: &mut WorldServices<'_>) {
        let change = MapChange {
            old_map: self.map,
            old_pose: self.pose,
            destination: WorldLocation {
                map,
                pose: Pose::new(position, self.pose.orientation),
            },
            transport_map: self.transport_map,
        };
        let carrying = !self.passengers.is_empty();

        if carrying {
            debug!(
                target: MOVES_TARGET,
                "{} notifies {} passengers of map change from {} to {map}",
                self.id,
                self.passengers.len(),
                self.map
            );
            self.passengers
                .notify_map_change(MapChangePhase::Begin, &change, services.passengers);
        }

        services.partitions.remove_active(self.map, self.id);
        self.map = map;
        self.pose = change.destination.pose;
        services.partitions.relocate(self.id, map, self.pose);
        services.partitions.add_active(map, self.id);

        if carrying {
            self.passengers
                .notify_map_change(MapChangePhase::End, &change, services.passengers);
        }
        debug!(
            target: MOVES_TARGET,
            "{} teleported to {map} at {:?}",
            self.id,
            position
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventJournal;
    use crate::ids::{PassengerId, TransportId};
    use crate::passenger::{PassengerKind, PassengerRoster, RosterEntry};
    use crate::path::{generate_waypoints, PathNode};
    use crate::world::{MapInfo, Partitions};
    use rstest::{fixture, rstest};

    struct Harness {
        partitions: Partitions,
        journal: EventJournal,
        roster: PassengerRoster,
    }

    impl Harness {
        fn services(&mut self) -> WorldServices<'_> {
            WorldServices {
                partitions: &mut self.partitions,
                events: &mut self.journal,
                passengers: &mut self.roster,
            }
        }
    }

    #[fixture]
    fn harness() -> Harness {
        let mut partitions = Partitions::new([
            (MapId(1), MapInfo::default()),
            (MapId(2), MapInfo::default()),
        ]);
        assert!(partitions.create_or_get(MapId(1)));
        Harness {
            partitions,
            journal: EventJournal::new(),
            roster: PassengerRoster::new(),
        }
    }

    #[fixture]
    fn transport() -> Transport {
        let nodes: Vec<PathNode> = [0.0, 10.0, 20.0, 30.0]
            .into_iter()
            .map(|x| PathNode::new(MapId(1), x, 0.0, 0.0))
            .collect();
        let path = generate_waypoints(1, &nodes).expect("path should build");
        Transport::new(TransportId(5), path, 10_000, 30.0).expect("valid transport")
    }

    #[rstest]
    fn off_world_targets_leave_the_vehicle_alone(mut harness: Harness, mut transport: Transport) {
        let before = transport.current_pose();
        let result = transport.relocate(
            MapId(1),
            Vec3::new(f32::NAN, 0.0, 0.0),
            false,
            &mut harness.services(),
        );
        assert!(matches!(result, Err(GeometryError::OffWorld { .. })));
        assert_eq!(transport.current_pose(), before);
    }

    #[rstest]
    fn same_spot_is_unchanged(mut harness: Harness, mut transport: Transport) {
        let here = transport.current_pose().position;
        let result = transport.relocate(MapId(1), here, false, &mut harness.services());
        assert_eq!(result, Ok(Relocation::Unchanged));
    }

    #[rstest]
    fn moving_within_a_map_updates_the_partition(mut harness: Harness, mut transport: Transport) {
        transport.place_in_world(&mut harness.partitions).expect("map 1 exists");
        let target = Vec3::new(12.0, 0.0, 0.0);
        let result = transport.relocate(MapId(1), target, false, &mut harness.services());
        assert_eq!(result, Ok(Relocation::Moved));
        assert_eq!(
            harness.partitions.pose_of(MapId(1), TransportId(5)).map(|pose| pose.position),
            Some(target)
        );
    }

    #[rstest]
    fn unknown_destination_maps_are_unavailable(mut harness: Harness, mut transport: Transport) {
        let result = transport.relocate(MapId(9), Vec3::ZERO, true, &mut harness.services());
        assert_eq!(result, Err(GeometryError::PartitionUnavailable { map: MapId(9) }));
        assert_eq!(transport.map(), MapId(1));
    }

    #[rstest]
    fn crossing_maps_moves_partitions_and_players(mut harness: Harness, mut transport: Transport) {
        transport.place_in_world(&mut harness.partitions).expect("map 1 exists");
        let rider = PassengerId(4);
        harness.roster.insert(
            rider,
            RosterEntry::new(PassengerKind::Player, MapId(1), Pose::default()),
        );
        transport.on_attach(rider, Pose::default(), &mut harness.roster);

        let target = Vec3::new(500.0, 20.0, 0.0);
        let result = transport.relocate(MapId(2), target, true, &mut harness.services());
        assert_eq!(result, Ok(Relocation::Transferred));
        assert_eq!(transport.map(), MapId(2));
        assert!(harness.partitions.active_on(MapId(1)).is_empty());
        assert_eq!(harness.partitions.active_on(MapId(2)), vec![TransportId(5)]);
        assert_eq!(harness.roster.get(rider).map(|entry| entry.map), Some(MapId(2)));
    }
}
