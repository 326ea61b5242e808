//! Transport-local coordinate frame.
//!
//! Passengers keep an offset relative to the vehicle's position and facing.
//! The frame converts between that offset and world space using only the
//! vehicle's current pose.

use glam::{Vec2, Vec3, Vec3Swizzles};

use crate::vector_math::{normalize_orientation, rotate_planar};

/// Position and facing in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World coordinate.
    pub position: Vec3,
    /// Facing in radians, counter-clockwise from the x axis.
    pub orientation: f32,
}

impl Pose {
    /// Creates a pose.
    #[must_use]
    pub const fn new(position: Vec3, orientation: f32) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// Position and facing relative to a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalPose {
    /// Offset from the vehicle, in the vehicle's rotated axes.
    pub offset: Vec3,
    /// Facing relative to the vehicle's facing, in `[0, 2π)`.
    pub orientation: f32,
}

/// Frame anchored on a vehicle pose.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateFrame {
    origin: Pose,
}

impl CoordinateFrame {
    /// Anchors a frame on the vehicle's pose.
    #[must_use]
    pub const fn new(origin: Pose) -> Self {
        Self { origin }
    }

    /// Vehicle pose the frame is anchored on.
    #[must_use]
    pub const fn origin(&self) -> Pose {
        self.origin
    }

    /// Expresses a world pose relative to the vehicle.
    ///
    /// The planar offset is rotated by the negative vehicle facing, undoing
    /// the vehicle's own turn; height is a plain difference.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use tramline::frame::{CoordinateFrame, Pose};
    ///
    /// let frame = CoordinateFrame::new(Pose::new(Vec3::new(10.0, 10.0, 0.0), 0.0));
    /// let local = frame.to_local(Pose::new(Vec3::new(10.0, 15.0, 0.0), 0.0));
    /// assert!((local.offset - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-5);
    /// ```
    #[must_use]
    pub fn to_local(&self, world: Pose) -> LocalPose {
        let delta = world.position - self.origin.position;
        let planar = rotate_planar(delta.xy(), -self.origin.orientation);
        LocalPose {
            offset: planar.extend(delta.z),
            orientation: normalize_orientation(world.orientation - self.origin.orientation),
        }
    }

    /// Inverse of [`Self::to_local`].
    #[must_use]
    pub fn to_world(&self, local: LocalPose) -> Pose {
        let planar: Vec2 = rotate_planar(local.offset.xy(), self.origin.orientation);
        Pose {
            position: self.origin.position + planar.extend(local.offset.z),
            orientation: normalize_orientation(local.orientation + self.origin.orientation),
        }
    }
}
