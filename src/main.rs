use std::path::PathBuf;

use anyhow::Context;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::info;
use tramline::{init_logging, TransportPlugin, TransportWorld, WorldData};

/// Runs authored transports against a simulated world clock
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// World data file describing maps, templates, transports and paths
    #[arg(short, long)]
    world: PathBuf,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Simulated milliseconds per tick, at most the app's 250 ms frame cap
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..=250))]
    tick_ms: u64,
}

fn report(world: &TransportWorld) {
    for transport in world.manager.iter() {
        let pose = transport.current_pose();
        info!(
            "{} ({}) on {} at {:?}, waypoint {}/{}, {:?}",
            transport.id(),
            transport.name(),
            transport.map(),
            pose.position,
            transport.waypoints().current_index(),
            transport.waypoints().len(),
            transport.state()
        );
    }
    info!("{} waypoint events fired", world.events_fired());
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let data = WorldData::load(&args.world)
        .with_context(|| format!("loading world data from {}", args.world.display()))?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(
            std::time::Duration::from_millis(args.tick_ms),
        ))
        .add_plugins(TransportPlugin::new(data));

    for _ in 0..args.ticks {
        app.update();
    }

    let world = app
        .world()
        .get_resource::<TransportWorld>()
        .context("transport world was not initialised")?;
    report(world);
    Ok(())
}
