//! Passengers riding a shuttle within one map.

use approx::assert_relative_eq;
use glam::Vec3;
use rstest::{fixture, rstest};
use test_utils::{shuttle_nodes, HostCall, TestWorld};
use tramline::passenger::PassengerKind;
use tramline::prelude::*;
use tramline::Boarding;

struct Ride {
    world: TestWorld,
    shuttle: Transport,
}

impl Ride {
    fn spawn_near_vehicle(&mut self, id: PassengerId, offset: Vec3) -> Pose {
        let pose = Pose::new(self.shuttle.current_pose().position + offset, 0.0);
        self.world.host.spawn(id, PassengerKind::Player, MapId(1), pose);
        pose
    }
}

#[fixture]
fn ride() -> Ride {
    let mut world = TestWorld::with_maps(&[1]);
    let path = generate_waypoints(1, &shuttle_nodes()).expect("shuttle should build");
    let mut shuttle = Transport::new(TransportId(40), path, 28_084, 30.0).expect("valid transport");
    shuttle
        .place_in_world(&mut world.partitions)
        .expect("map 1 is loaded");
    Ride { world, shuttle }
}

#[rstest]
fn passenger_ahead_of_the_vehicle_sits_five_units_forward(mut ride: Ride) {
    let rider = PassengerId(1);
    let standing = ride.spawn_near_vehicle(rider, Vec3::new(0.0, 5.0, 0.0));
    ride.shuttle.on_attach(rider, standing, &mut ride.world.host);

    let local = ride.shuttle.passengers().get(rider).expect("aboard").local;
    assert_relative_eq!(local.offset.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(local.offset.y, 5.0, epsilon = 1e-5);
    assert_relative_eq!(local.offset.z, 0.0, epsilon = 1e-5);
    assert_relative_eq!(local.orientation, 0.0);
}

#[rstest]
fn boarding_twice_keeps_one_record(mut ride: Ride) {
    let rider = PassengerId(2);
    let standing = ride.spawn_near_vehicle(rider, Vec3::new(1.0, 2.0, 0.5));
    assert_eq!(
        ride.shuttle.on_attach(rider, standing, &mut ride.world.host),
        Boarding::Boarded
    );
    let first = ride.shuttle.passengers().get(rider).expect("aboard").local;
    assert_eq!(
        ride.shuttle.on_attach(rider, standing, &mut ride.world.host),
        Boarding::Updated
    );

    assert_eq!(ride.shuttle.passengers().len(), 1);
    assert_eq!(
        ride.shuttle.passengers().get(rider).expect("aboard").local,
        first
    );
}

#[rstest]
fn riders_follow_the_vehicle_when_it_moves(mut ride: Ride) {
    let rider = PassengerId(3);
    let standing = ride.spawn_near_vehicle(rider, Vec3::new(0.0, 5.0, 0.0));
    ride.shuttle.on_attach(rider, standing, &mut ride.world.host);

    ride.world.tick(&mut ride.shuttle, 26_085, 10);

    let placed = ride.world.host.calls.iter().rev().find_map(|call| match call {
        HostCall::Place(who, pose) if *who == rider => Some(*pose),
        _ => None,
    });
    let pose = placed.expect("rider was re-placed");
    assert_relative_eq!(pose.position.x, 200.0, epsilon = 1e-4);
    assert_relative_eq!(pose.position.y, 5.0, epsilon = 1e-4);
    let entry = ride.world.host.roster.get(rider).expect("rostered");
    assert_eq!(entry.pose, pose);
}

#[rstest]
fn nobody_is_placed_before_the_first_boarding(mut ride: Ride) {
    ride.world.tick(&mut ride.shuttle, 26_085, 10);
    assert!(ride.world.host.calls.is_empty());
}

#[rstest]
fn leaving_twice_is_harmless(mut ride: Ride) {
    let rider = PassengerId(4);
    let standing = ride.spawn_near_vehicle(rider, Vec3::ZERO);
    ride.shuttle.on_attach(rider, standing, &mut ride.world.host);

    assert!(ride.shuttle.on_detach(rider, &mut ride.world.host));
    let calls = ride.world.host.calls.len();
    assert!(!ride.shuttle.on_detach(rider, &mut ride.world.host));
    assert_eq!(ride.world.host.calls.len(), calls);
    assert!(ride
        .world
        .host
        .roster
        .get(rider)
        .is_some_and(|entry| entry.seat.is_none()));
}

#[rstest]
fn destroyed_riders_are_not_moved_again(mut ride: Ride) {
    let rider = PassengerId(5);
    let standing = ride.spawn_near_vehicle(rider, Vec3::X);
    ride.shuttle.on_attach(rider, standing, &mut ride.world.host);
    ride.world.host.roster.remove(rider);
    assert!(ride.shuttle.on_passenger_destroyed(rider));

    ride.world.tick(&mut ride.shuttle, 26_085, 10);
    assert!(!ride
        .world
        .host
        .calls_for(rider)
        .iter()
        .any(|call| matches!(call, HostCall::Place(_, _))));
}

#[rstest]
fn riders_are_carried_along_a_short_hop(mut ride: Ride) {
    let rider = PassengerId(6);
    let standing = ride.spawn_near_vehicle(rider, Vec3::new(0.0, 5.0, 0.0));
    ride.shuttle.on_attach(rider, standing, &mut ride.world.host);

    ride.world.tick(&mut ride.shuttle, 26_085, 10);
    ride.world.tick(&mut ride.shuttle, 27_000, 14_142);
    ride.world.tick(&mut ride.shuttle, 28_200, 1_200);

    let vehicle = ride.shuttle.current_pose();
    assert_relative_eq!(vehicle.position.x, 164.0, epsilon = 1e-3);
    let placed = ride.world.host.calls.last().and_then(|call| match call {
        HostCall::Place(who, pose) if *who == rider => Some(*pose),
        _ => None,
    });
    let pose = placed.expect("the hop re-placed the rider");
    assert_relative_eq!(pose.position.x, 164.0, epsilon = 1e-3);
    assert_relative_eq!(pose.position.y, 5.0, epsilon = 1e-4);
    assert_relative_eq!(pose.position.z, 0.0, epsilon = 1e-4);

    let tracked = ride
        .world
        .partitions
        .pose_of(MapId(1), TransportId(40))
        .expect("the partition tracks the shuttle");
    assert_eq!(tracked, vehicle);
}
