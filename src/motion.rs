//! Short-hop motion between adjacent waypoints.
//!
//! The scheduler hands a hop to a [`HopMotion`] and polls it every tick; no
//! new hop is issued until the current one reports it has finished.

use glam::Vec3;

use crate::numeric::ms_as_f32;

/// Animates a vehicle along one straight hop.
pub trait HopMotion: Send + Sync + std::fmt::Debug {
    /// Sets the hop destination.
    fn move_to(&mut self, target: Vec3);
    /// Sets the travel speed in units per second.
    fn set_velocity(&mut self, speed: f32);
    /// Starts a hop from `origin` towards the last destination.
    fn launch(&mut self, origin: Vec3);
    /// Moves the hop forward by `diff_ms`, returning the new position while
    /// a hop is running.
    fn advance(&mut self, diff_ms: u32) -> Option<Vec3>;
    /// Abandons the running hop, if any.
    fn halt(&mut self);
    /// `true` when no hop is in progress.
    fn is_finished(&self) -> bool;
}

/// Constant-speed straight-line hop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearHop {
    origin: Vec3,
    target: Vec3,
    speed: f32,
    travelled: f32,
    active: bool,
}

impl LinearHop {
    /// Idle hop with the given speed.
    #[must_use]
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// Current destination.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.target
    }
}

impl HopMotion for LinearHop {
    fn move_to(&mut self, target: Vec3) {
        self.target = target;
    }

    fn set_velocity(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn launch(&mut self, origin: Vec3) {
        self.origin = origin;
        self.travelled = 0.0;
        self.active = true;
    }

    fn advance(&mut self, diff_ms: u32) -> Option<Vec3> {
        if !self.active {
            return None;
        }
        let length = self.origin.distance(self.target);
        if !(self.speed.is_finite() && self.speed > 0.0) || length <= f32::EPSILON {
            self.active = false;
            return Some(self.target);
        }

        self.travelled += self.speed * ms_as_f32(diff_ms) / 1000.0;
        if self.travelled >= length {
            self.active = false;
            return Some(self.target);
        }
        Some(self.origin.lerp(self.target, self.travelled / length))
    }

    fn halt(&mut self) {
        self.active = false;
    }

    fn is_finished(&self) -> bool {
        !self.active
    }
}
