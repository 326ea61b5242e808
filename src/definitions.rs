//! Authored transport definitions.
//!
//! A world is described by four tables: the map catalogue, object
//! templates, the transport list and the path geometry. [`WorldData`] holds
//! them after reading a JSON document; anything else that can answer the
//! same questions implements [`DefinitionSource`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionsError;
use crate::ids::MapId;
use crate::path::PathNode;
use crate::world::MapInfo;

/// Kind of object a template describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// A vehicle that loops along a path across maps.
    #[default]
    MoTransport,
    /// An elevator-style transport that never leaves its map.
    Elevator,
    /// Any other object.
    Other,
}

/// Object template of a transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportTemplate {
    /// Template entry, shared with the transport list.
    pub entry: u32,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Object kind; only [`TemplateKind::MoTransport`] can be loaded.
    #[serde(default)]
    pub kind: TemplateKind,
    /// Path the vehicle follows.
    pub path_id: u32,
    /// Map id of the vehicle's own interior.
    #[serde(default)]
    pub transport_map: MapId,
    /// Speed of short hops between waypoints, in units per second.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Bitmask of difficulties the transport spawns at; zero means all.
    #[serde(default)]
    pub difficulty_mask: u32,
}

const fn default_move_speed() -> f32 {
    crate::constants::CRUISE_SPEED
}

/// One row of the transport list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportEntry {
    /// Template entry, also the transport's identity.
    pub entry: u32,
    /// Display name used in diagnostics.
    #[serde(default)]
    pub name: String,
    /// Full cycle length in milliseconds.
    pub period: u32,
}

/// Catalogue row describing one map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    /// Map identifier.
    pub id: MapId,
    /// Static facts about the map.
    #[serde(flatten)]
    pub info: MapInfo,
}

/// Answers the questions transport loading needs about authored data.
pub trait DefinitionSource {
    /// Transports to load, in load order.
    fn transports(&self) -> &[TransportEntry];
    /// Template for a transport entry.
    fn template(&self, entry: u32) -> Option<&TransportTemplate>;
    /// Authored nodes of a path.
    fn path(&self, path_id: u32) -> Option<&[PathNode]>;
    /// Every known map.
    fn map_catalogue(&self) -> Vec<(MapId, MapInfo)>;

    /// Template for `entry` when it describes a moving transport.
    fn transport_template(&self, entry: u32) -> Option<&TransportTemplate> {
        self.template(entry)
            .filter(|template| template.kind == TemplateKind::MoTransport)
    }

    /// Map a transport can be found on.
    ///
    /// With `start` set this is the first map of its path; otherwise the
    /// first map of the path that differs from the start, falling back to
    /// the start map for single-map paths.
    fn possible_map_by_entry(&self, entry: u32, start: bool) -> Option<MapId> {
        let template = self.transport_template(entry)?;
        let nodes = self.path(template.path_id)?;
        let first = nodes.first()?.map;
        if start {
            return Some(first);
        }
        Some(
            nodes
                .iter()
                .map(|node| node.map)
                .find(|map| *map != first)
                .unwrap_or(first),
        )
    }

    /// `true` when the transport spawns at `difficulty`.
    fn is_spawned_at_difficulty(&self, entry: u32, difficulty: u8) -> bool {
        let Some(template) = self.transport_template(entry) else {
            return false;
        };
        if template.difficulty_mask == 0 {
            return true;
        }
        1_u32
            .checked_shl(u32::from(difficulty))
            .is_some_and(|bit| template.difficulty_mask & bit != 0)
    }
}

/// World data read from a JSON document.
///
/// # Examples
/// ```
/// use tramline::definitions::{DefinitionSource, WorldData};
///
/// let data = WorldData::from_json_str(r#"{
///     "maps": [{"id": 0}],
///     "templates": [{"entry": 1, "path_id": 5}],
///     "transports": [{"entry": 1, "period": 60000}],
///     "paths": {"5": [{"map": 0, "x": 0.0, "y": 0.0, "z": 0.0}]}
/// }"#).expect("valid world data");
/// assert_eq!(data.transports().len(), 1);
/// assert!(data.path(5).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldData {
    /// Map catalogue.
    #[serde(default)]
    pub maps: Vec<MapEntry>,
    /// Object templates.
    #[serde(default)]
    pub templates: Vec<TransportTemplate>,
    /// Transport list.
    #[serde(default)]
    pub transports: Vec<TransportEntry>,
    /// Path geometry keyed by path id.
    #[serde(default)]
    pub paths: BTreeMap<u32, Vec<PathNode>>,
}

impl WorldData {
    /// Parses world data from a JSON string.
    ///
    /// # Errors
    /// Returns [`DefinitionsError::Parse`] when the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads world data from a JSON file.
    ///
    /// # Errors
    /// Returns [`DefinitionsError::Io`] when the file cannot be read and
    /// [`DefinitionsError::Parse`] when its contents are malformed.
    pub fn load(path: &Path) -> Result<Self, DefinitionsError> {
        let json = fs::read_to_string(path).map_err(|source| DefinitionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl DefinitionSource for WorldData {
    fn transports(&self) -> &[TransportEntry] {
        &self.transports
    }

    fn template(&self, entry: u32) -> Option<&TransportTemplate> {
        self.templates.iter().find(|template| template.entry == entry)
    }

    fn path(&self, path_id: u32) -> Option<&[PathNode]> {
        self.paths.get(&path_id).map(Vec::as_slice)
    }

    fn map_catalogue(&self) -> Vec<(MapId, MapInfo)> {
        self.maps.iter().map(|map| (map.id, map.info)).collect()
    }
}
