//! World partitions ("maps") that transports are placed into.
//!
//! Partition lifecycle belongs to the host world. Transports only ask for a
//! partition to exist, move themselves inside it, and join or leave its set
//! of actively updated objects.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::frame::Pose;
use crate::ids::{MapId, TransportId};

/// Static facts about a map from the world catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapInfo {
    /// Map is created per group rather than shared by everyone.
    #[serde(default)]
    pub instanceable: bool,
    /// Map is the interior of a transport.
    #[serde(default)]
    pub is_transport: bool,
}

/// Partition operations a transport depends on.
pub trait PartitionManager {
    /// Catalogue entry for `map`, if it exists.
    fn map_info(&self, map: MapId) -> Option<MapInfo>;
    /// Ensures a partition for `map` exists; `false` when it cannot be made.
    fn create_or_get(&mut self, map: MapId) -> bool;
    /// Moves the transport's representation within `map`.
    fn relocate(&mut self, transport: TransportId, map: MapId, pose: Pose);
    /// Adds the transport to the set updated by `map`.
    fn add_active(&mut self, map: MapId, transport: TransportId);
    /// Removes the transport from the set updated by `map`.
    fn remove_active(&mut self, map: MapId, transport: TransportId);
}

#[derive(Debug, Clone, Default)]
struct Partition {
    active: BTreeSet<TransportId>,
    poses: HashMap<TransportId, Pose>,
}

/// In-memory partition manager backed by a map catalogue.
#[derive(Debug, Clone, Default)]
pub struct Partitions {
    catalogue: HashMap<MapId, MapInfo>,
    loaded: HashMap<MapId, Partition>,
}

impl Partitions {
    /// Creates a manager that knows the given maps.
    #[must_use]
    pub fn new(catalogue: impl IntoIterator<Item = (MapId, MapInfo)>) -> Self {
        Self {
            catalogue: catalogue.into_iter().collect(),
            loaded: HashMap::new(),
        }
    }

    /// Adds or replaces a catalogue entry.
    pub fn insert_map(&mut self, map: MapId, info: MapInfo) {
        self.catalogue.insert(map, info);
    }

    /// `true` once a partition for `map` has been created.
    #[must_use]
    pub fn is_loaded(&self, map: MapId) -> bool {
        self.loaded.contains_key(&map)
    }

    /// Transports actively updated by `map`, in id order.
    #[must_use]
    pub fn active_on(&self, map: MapId) -> Vec<TransportId> {
        self.loaded
            .get(&map)
            .map(|partition| partition.active.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Last pose recorded for `transport` on `map`.
    #[must_use]
    pub fn pose_of(&self, map: MapId, transport: TransportId) -> Option<Pose> {
        self.loaded
            .get(&map)
            .and_then(|partition| partition.poses.get(&transport).copied())
    }
}

impl PartitionManager for Partitions {
    fn map_info(&self, map: MapId) -> Option<MapInfo> {
        self.catalogue.get(&map).copied()
    }

    fn create_or_get(&mut self, map: MapId) -> bool {
        if !self.catalogue.contains_key(&map) {
            return false;
        }
        if !self.loaded.contains_key(&map) {
            debug!("creating partition for {map}");
            self.loaded.insert(map, Partition::default());
        }
        true
    }

    fn relocate(&mut self, transport: TransportId, map: MapId, pose: Pose) {
        if let Some(partition) = self.loaded.get_mut(&map) {
            partition.poses.insert(transport, pose);
        }
    }

    fn add_active(&mut self, map: MapId, transport: TransportId) {
        if let Some(partition) = self.loaded.get_mut(&map) {
            partition.active.insert(transport);
        }
    }

    fn remove_active(&mut self, map: MapId, transport: TransportId) {
        if let Some(partition) = self.loaded.get_mut(&map) {
            partition.active.remove(&transport);
            partition.poses.remove(&transport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rstest::{fixture, rstest};

    #[fixture]
    fn partitions() -> Partitions {
        Partitions::new([
            (MapId(0), MapInfo::default()),
            (
                MapId(33),
                MapInfo {
                    instanceable: true,
                    is_transport: false,
                },
            ),
        ])
    }

    #[rstest]
    fn unknown_maps_cannot_be_created(mut partitions: Partitions) {
        assert!(!partitions.create_or_get(MapId(5)));
        assert!(!partitions.is_loaded(MapId(5)));
    }

    #[rstest]
    fn partitions_are_created_once(mut partitions: Partitions) {
        assert!(partitions.create_or_get(MapId(0)));
        partitions.add_active(MapId(0), TransportId(1));
        assert!(partitions.create_or_get(MapId(0)));
        assert_eq!(partitions.active_on(MapId(0)), vec![TransportId(1)]);
    }

    #[rstest]
    fn leaving_a_partition_drops_the_pose(mut partitions: Partitions) {
        assert!(partitions.create_or_get(MapId(0)));
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), 0.0);
        partitions.add_active(MapId(0), TransportId(4));
        partitions.relocate(TransportId(4), MapId(0), pose);
        assert_eq!(partitions.pose_of(MapId(0), TransportId(4)), Some(pose));
        partitions.remove_active(MapId(0), TransportId(4));
        assert!(partitions.active_on(MapId(0)).is_empty());
        assert_eq!(partitions.pose_of(MapId(0), TransportId(4)), None);
    }

    #[rstest]
    fn catalogue_reports_instanced_maps(partitions: Partitions) {
        assert!(partitions.map_info(MapId(33)).is_some_and(|info| info.instanceable));
        assert_eq!(partitions.map_info(MapId(2)), None);
    }
}
