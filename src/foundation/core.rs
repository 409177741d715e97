pub use glam::{DMat4, DQuat, DVec3};
pub use kurbo::{Rect, Size};

/// World up axis used for arcs and look-at orientation.
pub const UP: DVec3 = DVec3::Y;

/// Build an orientation from Euler radians applied in fixed intrinsic X, Y, Z order.
pub fn euler_to_quat(rotation: DVec3) -> DQuat {
    DQuat::from_rotation_x(rotation.x)
        * DQuat::from_rotation_y(rotation.y)
        * DQuat::from_rotation_z(rotation.z)
}

/// Orientation of a camera at `eye` looking at `target` (camera looks down its local -Z).
pub fn look_at_quat(eye: DVec3, target: DVec3) -> DQuat {
    let dir = target - eye;
    if dir.length_squared() <= f64::EPSILON {
        return DQuat::IDENTITY;
    }
    let forward = dir.normalize();
    let up = if forward.cross(UP).length_squared() <= 1e-12 {
        DVec3::Z
    } else {
        UP
    };
    let view = DMat4::look_to_rh(eye, forward, up);
    DQuat::from_mat4(&view.inverse())
}

/// A position plus Euler rotation, the minimum a keyframe needs to act as a camera pose.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// World position.
    pub position: DVec3,
    /// Euler radians, see [`euler_to_quat`].
    pub rotation: DVec3,
}

impl Pose {
    /// Quaternion form of `rotation`.
    pub fn orientation(self) -> DQuat {
        euler_to_quat(self.rotation)
    }
}

/// Global time window covered by a camera path. `duration` is always `> 0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    /// Earliest path time, seconds.
    pub start: f64,
    /// Latest path time, seconds.
    pub end: f64,
    /// `end - start`.
    pub duration: f64,
}

impl TimeRange {
    /// Fraction of the range reached at `time`, clamped to `0..=1`.
    pub fn progress_at(self, time: f64) -> f64 {
        ((time - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Inverse of [`TimeRange::progress_at`], unclamped.
    pub fn time_at(self, progress: f64) -> f64 {
        self.start + progress * self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
