//! Loading transports through the Bevy plugin.

#[path = "support/load_error_capture.rs"]
mod load_error_capture;

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use load_error_capture::{install_load_error_observer, CapturedLoadErrors};
use rstest::{fixture, rstest};
use tramline::prelude::*;
use tramline::TransportWorld;

const WORLD: &str = r#"{
    "maps": [
        {"id": 0},
        {"id": 33, "instanceable": true}
    ],
    "templates": [
        {"entry": 1, "name": "tram", "path_id": 10},
        {"entry": 2, "name": "lift", "kind": "elevator", "path_id": 10},
        {"entry": 4, "name": "dungeon barge", "path_id": 11}
    ],
    "transports": [
        {"entry": 1, "name": "tram", "period": 20000},
        {"entry": 2, "name": "lift", "period": 20000},
        {"entry": 3, "name": "orphan", "period": 20000},
        {"entry": 4, "name": "dungeon barge", "period": 20000}
    ],
    "paths": {
        "10": [
            {"map": 0, "x": 0.0, "y": 0.0, "z": 0.0},
            {"map": 0, "x": 10.0, "y": 0.0, "z": 0.0},
            {"map": 0, "x": 20.0, "y": 0.0, "z": 0.0},
            {"map": 0, "x": 30.0, "y": 0.0, "z": 0.0}
        ],
        "11": [
            {"map": 33, "x": 0.0, "y": 0.0, "z": 0.0},
            {"map": 33, "x": 10.0, "y": 0.0, "z": 0.0},
            {"map": 33, "x": 20.0, "y": 0.0, "z": 0.0},
            {"map": 33, "x": 30.0, "y": 0.0, "z": 0.0}
        ]
    }
}"#;

#[fixture]
fn app() -> App {
    let data = WorldData::from_json_str(WORLD).expect("fixture should parse");
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    install_load_error_observer(&mut app);
    app.add_plugins(TransportPlugin::new(data));
    app
}

#[rstest]
fn rejected_transports_raise_load_errors(app: App) {
    let mut entries: Vec<u32> = app
        .world()
        .resource::<CapturedLoadErrors>()
        .0
        .iter()
        .map(|(entry, _)| *entry)
        .collect();
    entries.sort_unstable();
    assert_eq!(entries, vec![2, 3, 4]);
}

#[rstest]
fn load_errors_explain_themselves(app: App) {
    let errors = &app.world().resource::<CapturedLoadErrors>().0;
    let reason = |entry: u32| {
        errors
            .iter()
            .find(|(seen, _)| *seen == entry)
            .map(|(_, reason)| reason.clone())
            .unwrap_or_default()
    };
    assert!(reason(3).contains("no object template"));
    assert!(reason(4).contains("unsupported"));
}

#[rstest]
fn accepted_transports_start_on_their_map(mut app: App) {
    for _ in 0..3 {
        app.update();
    }
    let world = app.world().resource::<TransportWorld>();
    let tram = world.manager.by_guid(TransportId(1)).expect("tram loaded");
    assert!(tram.is_active());
    assert_eq!(tram.map(), MapId(0));
    assert_eq!(world.partitions.active_on(MapId(0)), vec![TransportId(1)]);
    assert_eq!(world.manager.len(), 1);
}
