//! Behavioural coverage of a shuttle docking, holding and gliding home.
//!
//! The shuttle's waypoints sit at x = 0, 100 and 200 with keys 0, 11942
//! and 26084; a full pass takes 28084 ms. Hops run at 30 units per second.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/shared.rs"]
mod shared;

use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use shared::{lock, Shared};
use test_utils::{shuttle_nodes, TestWorld};
use tramline::prelude::*;
use tramline::SchedulerState;

const PERIOD: u32 = 28_084;
const HOP_SPEED: f32 = 30.0;

#[derive(Debug)]
struct Rig {
    world: TestWorld,
    shuttle: Transport,
}

impl Rig {
    fn new() -> Self {
        let mut world = TestWorld::with_maps(&[1]);
        let path = generate_waypoints(1, &shuttle_nodes()).expect("shuttle should build");
        let mut shuttle =
            Transport::new(TransportId(40), path, PERIOD, HOP_SPEED).expect("valid transport");
        shuttle
            .place_in_world(&mut world.partitions)
            .expect("map 1 is loaded");
        shuttle.start();
        Self { world, shuttle }
    }
}

#[derive(Debug, Clone)]
struct ShuttleFixture {
    rig: Shared<Rig>,
}

impl Default for ShuttleFixture {
    fn default() -> Self {
        Self {
            rig: Arc::new(Mutex::new(Rig::new())),
        }
    }
}

impl ShuttleFixture {
    fn reset(&self) {
        *lock(&self.rig) = Rig::new();
    }

    fn tick(&self, now_ms: u32, diff_ms: u32) {
        let mut rig = lock(&self.rig);
        let Rig { world, shuttle } = &mut *rig;
        world.tick(shuttle, now_ms, diff_ms);
    }

    fn index(&self) -> usize {
        lock(&self.rig).shuttle.waypoints().current_index()
    }

    fn state(&self) -> SchedulerState {
        lock(&self.rig).shuttle.state()
    }

    fn x(&self) -> f32 {
        lock(&self.rig).shuttle.current_pose().position.x
    }

    fn partition_x(&self) -> Option<f32> {
        let rig = lock(&self.rig);
        rig.world
            .partitions
            .pose_of(MapId(1), rig.shuttle.id())
            .map(|pose| pose.position.x)
    }
}

#[test]
fn shuttle_docks_and_glides_home() {
    run_serial(&rspec::given(
        "a shuttle between two docks",
        ShuttleFixture::default(),
        |scenario: &mut Scenario<ShuttleFixture>| {
            scenario.before_each(|fixture| fixture.reset());

            scenario.when("the first leg falls due", |scenario| {
                scenario.before_each(|fixture| fixture.tick(26_085, 10));

                scenario.then("it docks at the far end", |fixture| {
                    assert_eq!(fixture.index(), 2);
                    assert_eq!(
                        fixture.state(),
                        SchedulerState::Stalled {
                            remaining_ms: 14_142
                        }
                    );
                });

                scenario.then("its partition sees the jump", |fixture| {
                    assert_relative_eq!(fixture.x(), 200.0);
                    assert_eq!(fixture.partition_x(), Some(200.0));
                });
            });

            scenario.when("the dock countdown is still running", |scenario| {
                scenario.before_each(|fixture| {
                    fixture.tick(26_085, 10);
                    fixture.tick(27_000, 915);
                });

                scenario.then("the cursor holds", |fixture| {
                    assert_eq!(fixture.index(), 2);
                    assert_eq!(
                        fixture.state(),
                        SchedulerState::Stalled {
                            remaining_ms: 13_227
                        }
                    );
                });
            });

            scenario.when("the countdown expires early", |scenario| {
                scenario.before_each(|fixture| {
                    fixture.tick(26_085, 10);
                    fixture.tick(27_000, 14_142);
                });

                scenario.then("it cruises without moving yet", |fixture| {
                    assert_eq!(fixture.state(), SchedulerState::Cruising);
                    assert_eq!(fixture.index(), 2);
                    assert_relative_eq!(fixture.x(), 200.0);
                });
            });

            scenario.when("the return hop is under way as waypoint 0 falls due", |scenario| {
                scenario.before_each(|fixture| {
                    fixture.tick(26_085, 10);
                    fixture.tick(27_000, 14_142);
                    fixture.tick(28_200, 1_200);
                });

                scenario.then("the cursor waits for the hop", |fixture| {
                    assert_eq!(fixture.index(), 2);
                    assert_relative_eq!(fixture.x(), 164.0, epsilon = 1e-3);
                });
            });

            scenario.when("the return hop lands", |scenario| {
                scenario.before_each(|fixture| {
                    fixture.tick(26_085, 10);
                    fixture.tick(27_000, 14_142);
                    fixture.tick(28_200, 1_200);
                    fixture.tick(34_000, 5_800);
                });

                scenario.then("the cursor catches up on the origin", |fixture| {
                    assert_eq!(fixture.index(), 0);
                    assert_eq!(fixture.state(), SchedulerState::Cruising);
                    assert_relative_eq!(fixture.x(), 0.0);
                    assert_eq!(fixture.partition_x(), Some(0.0));
                });
            });
        },
    ));
}
