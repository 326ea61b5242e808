//! Error taxonomy for transport construction and relocation.
//!
//! Configuration errors discard a single transport while loading; geometry
//! errors are recovered by the scheduler on the next tick. Neither aborts the
//! world.

use thiserror::Error;

use crate::ids::MapId;

/// A transport definition that cannot produce a working transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The transport entry has no matching object template.
    #[error("transport {entry} has no object template")]
    MissingTemplate {
        /// Transport entry id.
        entry: u32,
    },
    /// The template exists but does not describe a moving transport.
    #[error("transport {entry} template is not a moving transport")]
    WrongTemplateKind {
        /// Transport entry id.
        entry: u32,
    },
    /// The template references a path that does not exist.
    #[error("path {path_id} does not exist")]
    InvalidPathId {
        /// Path identifier from the template.
        path_id: u32,
    },
    /// The path has fewer nodes than the entry and exit sentinels need.
    #[error("path {path_id} has {len} nodes, at least 3 are required")]
    PathTooShort {
        /// Path identifier.
        path_id: u32,
        /// Number of authored nodes.
        len: usize,
    },
    /// Every node was a sentinel or a coalesced map change.
    #[error("path {path_id} yields no key frames")]
    EmptyPath {
        /// Path identifier.
        path_id: u32,
    },
    /// The accumulated path clock does not fit in `u32` milliseconds.
    #[error("path {path_id} lasts longer than u32 milliseconds")]
    DurationOverflow {
        /// Path identifier.
        path_id: u32,
    },
    /// The path starts on a map that is unknown or instanced.
    #[error("transport {entry} starts on unsupported {map}")]
    UnsupportedMap {
        /// Transport entry id.
        entry: u32,
        /// Starting map of the path.
        map: MapId,
    },
    /// A zero period would make the cycle clock undefined.
    #[error("transport {entry} has a zero period")]
    ZeroPeriod {
        /// Transport entry id.
        entry: u32,
    },
}

/// A relocation target that cannot be applied right now.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The coordinate is non-finite or beyond the map edge.
    #[error("coordinate ({x}, {y}, {z}) on {map} lies outside the world")]
    OffWorld {
        /// Map of the rejected coordinate.
        map: MapId,
        /// Rejected x component.
        x: f32,
        /// Rejected y component.
        y: f32,
        /// Rejected z component.
        z: f32,
    },
    /// The partition manager could not provide the destination map.
    #[error("{map} has no partition")]
    PartitionUnavailable {
        /// Destination map.
        map: MapId,
    },
}

/// Any failure raised while creating or moving a transport.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// See [`ConfigurationError`].
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// See [`GeometryError`].
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Failure to read authored world data.
#[derive(Debug, Error)]
pub enum DefinitionsError {
    /// The file could not be read.
    #[error("failed to read world data from {path}")]
    Io {
        /// File that was requested.
        path: std::path::PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid world data.
    #[error("invalid world data: {0}")]
    Parse(#[from] serde_json::Error),
}
