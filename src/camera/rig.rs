use crate::camera::model::CameraPose;
use crate::foundation::core::DVec3;

/// Orbit-style controls attached to the rendering camera.
pub trait OrbitController {
    /// Accepts user input.
    fn enabled(&self) -> bool;
    /// Turn user input on or off.
    fn set_enabled(&mut self, enabled: bool);
    /// Point the camera orbits around.
    fn target(&self) -> DVec3;
    /// Move the orbit point.
    fn set_target(&mut self, target: DVec3);
    /// Refresh after the target or the camera moved.
    fn update(&mut self);
}

/// Minimal orbit state for hosts without their own controller.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitRig {
    /// Accepts user input.
    pub enabled: bool,
    /// Orbit point.
    pub target: DVec3,
    updates: u64,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self {
            enabled: true,
            target: DVec3::ZERO,
            updates: 0,
        }
    }
}

impl OrbitRig {
    /// Number of `update` calls so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl OrbitController for OrbitRig {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn target(&self) -> DVec3 {
        self.target
    }

    fn set_target(&mut self, target: DVec3) {
        self.target = target;
    }

    fn update(&mut self) {
        self.updates += 1;
    }
}

/// Looks up the current pose of a projection's camera in the host scene.
///
/// `None` means the projection is not (yet) available.
pub trait PoseProvider {
    /// Current pose of `projection_id`, if known.
    fn pose_of(&self, projection_id: &str) -> Option<CameraPose>;
}

#[cfg(test)]
#[path = "../../tests/unit/camera/rig.rs"]
mod tests;
