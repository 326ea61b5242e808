//! Shared helpers for observing `TransportLoadError` events in tests.
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use tramline::TransportLoadError;

/// Load errors captured during a test, as `(entry, reason)` strings.
#[derive(Resource, Default, Debug)]
pub struct CapturedLoadErrors(pub Vec<(u32, String)>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_load_error(event: On<TransportLoadError>, mut errors: ResMut<CapturedLoadErrors>) {
    let err = event.event();
    errors.0.push((err.entry, err.reason.to_string()));
}

/// Installs the capturing observer and its resource on the provided app.
pub fn install_load_error_observer(app: &mut App) {
    app.insert_resource(CapturedLoadErrors::default());
    app.world_mut().add_observer(record_load_error);
}
