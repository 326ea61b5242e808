//! Utility helpers for tests.
//!
//! Shared path fixtures, an in-memory world harness and a passenger host
//! that records every call made to it.

pub mod host;
pub mod paths;
pub mod world;

pub use host::{HostCall, RecordingHost};
pub use paths::{crossing_nodes, dock, node, shuttle_nodes};
pub use world::TestWorld;
