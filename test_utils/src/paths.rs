//! Authored path fixtures.

use tramline::ids::MapId;
use tramline::path::{NodeAction, PathNode};

/// Plain node on the x axis.
pub fn node(map: u32, x: f32) -> PathNode {
    PathNode::new(MapId(map), x, 0.0, 0.0)
}

/// Stop node on the x axis waiting `delay_secs` after arrival.
pub fn dock(map: u32, x: f32, delay_secs: u32) -> PathNode {
    PathNode {
        action: NodeAction::Stop,
        delay_secs,
        ..node(map, x)
    }
}

/// Single-map shuttle between two docks 200 units apart.
///
/// Builds to waypoint keys `[0, 11942, 26084]` with a path time of 28084 ms.
pub fn shuttle_nodes() -> Vec<PathNode> {
    vec![
        node(1, -10.0),
        dock(1, 0.0, 2),
        node(1, 100.0),
        dock(1, 200.0, 2),
        node(1, 300.0),
    ]
}

/// Path that leaves map 1 from a dock and continues on map 2.
///
/// Builds to waypoint keys `[0, 16194, 16288, 21388]`; the entry at 16288 is
/// the jump onto map 2.
pub fn crossing_nodes() -> Vec<PathNode> {
    vec![
        node(1, -10.0),
        dock(1, 0.0, 2),
        node(1, 100.0),
        node(1, 200.0),
        node(2, 5_000.0),
        node(2, 5_100.0),
        node(2, 5_200.0),
        node(2, 5_300.0),
    ]
}
