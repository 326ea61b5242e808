//! Per-tick driver that walks the waypoint table against the world clock.
//!
//! Each tick first lets a running hop finish, then counts down a dock
//! stall, and finally consumes every waypoint whose time has passed. The
//! loop compares circular distances from the current waypoint, so wrapping
//! from the end of the cycle back to waypoint 0 needs no special case.

use glam::Vec3;
use log::{debug, trace, warn};

use crate::constants::{MAX_WAYPOINTS_PER_TICK, STALL_THRESHOLD_MS};
use crate::error::GeometryError;
use crate::frame::CoordinateFrame;
use crate::logging::MOVES_TARGET;

use super::relocate::Relocation;
use super::{SchedulerState, Transport, WorldServices};

impl Transport {
    /// Advances the transport by one world tick.
    ///
    /// `now_ms` is the world clock and `diff_ms` the time since the previous
    /// tick. Invalid relocation targets are logged and retried on the next
    /// tick with the cursor left where it was.
    pub fn update(&mut self, now_ms: u32, diff_ms: u32, services: &mut WorldServices<'_>) {
        if let Some(position) = self.hop.advance(diff_ms) {
            self.follow_hop(position, services);
        }
        if !self.hop.is_finished() || self.waypoints.is_stationary() {
            return;
        }

        if let SchedulerState::Stalled { remaining_ms } = self.state {
            if remaining_ms > diff_ms {
                self.state = SchedulerState::Stalled {
                    remaining_ms: remaining_ms - diff_ms,
                };
                return;
            }
            self.state = SchedulerState::Cruising;
            debug!(target: MOVES_TARGET, "{} leaves its dock", self.id);
            if self.next_is_on_current_map() {
                self.launch_hop_to_next();
            }
        }

        if self.pending_relocation {
            if let Err(err) = self.settle_on_current(services) {
                debug!(target: MOVES_TARGET, "{} still cannot relocate: {err}", self.id);
                return;
            }
            self.pending_relocation = false;
        }

        self.catch_up(now_ms % self.period, services);
    }

    /// Consumes every waypoint reached by `timer`, up to the per-tick cap.
    fn catch_up(&mut self, timer: u32, services: &mut WorldServices<'_>) {
        let mut consumed = 0;
        while self.next_is_due(timer) {
            if consumed == MAX_WAYPOINTS_PER_TICK {
                warn!(
                    "{} ({}) hit the limit of {MAX_WAYPOINTS_PER_TICK} waypoints in one tick at timer {timer}",
                    self.id, self.name
                );
                break;
            }
            consumed += 1;

            let gap = self.gap_to_next();
            if gap > i64::from(STALL_THRESHOLD_MS) {
                let remaining_ms = u32::try_from(gap).unwrap_or(u32::MAX);
                debug!(target: MOVES_TARGET, "{} docks for {remaining_ms} ms", self.id);
                self.state = SchedulerState::Stalled { remaining_ms };
            }

            self.fire_current_event(true, services);
            self.waypoints.advance();
            self.fire_current_event(false, services);

            if let Err(err) = self.settle_on_current(services) {
                warn!("{} ({}) skipped a relocation: {err}", self.id, self.name);
                self.pending_relocation = true;
                break;
            }
            if self.is_stalled() {
                break;
            }
        }
    }

    /// `true` when the clock has reached or passed the next waypoint.
    fn next_is_due(&self, timer: u32) -> bool {
        let (Some((current, _)), Some((next, _))) = (self.waypoints.current(), self.waypoints.next())
        else {
            return false;
        };
        let span = self.cycle_span();
        let elapsed = (i64::from(timer) - i64::from(current)).rem_euclid(span);
        let scheduled = (i64::from(next) - i64::from(current)).rem_euclid(span);
        elapsed > scheduled
    }

    /// Milliseconds between the current and next waypoint, across the wrap.
    fn gap_to_next(&self) -> i64 {
        match (self.waypoints.current(), self.waypoints.next()) {
            (Some((current, _)), Some((next, _))) => {
                (i64::from(next) - i64::from(current)).rem_euclid(self.cycle_span())
            }
            _ => 0,
        }
    }

    fn next_is_on_current_map(&self) -> bool {
        self.waypoints
            .next()
            .is_some_and(|(_, next)| next.map == self.map)
    }

    fn cycle_span(&self) -> i64 {
        i64::from(self.path_time.max(1))
    }

    fn fire_current_event(&self, departure: bool, services: &mut WorldServices<'_>) {
        let Some((key, point)) = self.waypoints.current() else {
            return;
        };
        if let Some(event) = point.event(departure) {
            debug!(
                target: MOVES_TARGET,
                "{} {} event {event} at node {key}",
                self.id,
                if departure { "departure" } else { "arrival" }
            );
            services.events.fire_event(event, self.id, self.id, departure);
        }
    }

    /// Relocates onto the current waypoint and reacts to the outcome.
    fn settle_on_current(&mut self, services: &mut WorldServices<'_>) -> Result<(), GeometryError> {
        let Some((key, point)) = self.waypoints.current() else {
            return Ok(());
        };
        let (map, position, teleport) = (point.map, point.position, point.teleport);
        if self.waypoints.current_index() == 0 {
            debug!(target: MOVES_TARGET, "{} ({}) begins a new cycle", self.id, self.name);
        }

        match self.relocate(map, position, teleport, services)? {
            Relocation::Moved => {
                // The snap supersedes any hop still in flight.
                self.hop.halt();
                self.carry_passengers(services);
            }
            Relocation::Transferred | Relocation::Unchanged => {
                self.hop.halt();
                let glides_on = self.next_is_on_current_map() && !teleport && !self.is_stalled();
                if glides_on {
                    self.launch_hop_to_next();
                }
            }
        }
        trace!(
            target: MOVES_TARGET,
            "{} moved to {position:?} on {map} at node {key}",
            self.id
        );
        Ok(())
    }

    fn launch_hop_to_next(&mut self) {
        let Some((_, next)) = self.waypoints.next() else {
            return;
        };
        debug!(
            target: MOVES_TARGET,
            "{} starts a hop to {:?}",
            self.id,
            next.position
        );
        self.hop.move_to(next.position);
        self.hop.set_velocity(self.move_speed);
        self.hop.launch(self.pose.position);
    }

    fn follow_hop(&mut self, position: Vec3, services: &mut WorldServices<'_>) {
        self.pose.position = position;
        services.partitions.relocate(self.id, self.map, self.pose);
        self.carry_passengers(services);
    }

    fn carry_passengers(&self, services: &mut WorldServices<'_>) {
        let frame = CoordinateFrame::new(self.pose);
        self.passengers.update_all(&frame, services.passengers);
    }
}
