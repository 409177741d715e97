use crate::foundation::core::{DMat4, DQuat, DVec3, Rect, Size};

/// Lens model of a camera.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraProjection {
    /// Pinhole lens.
    Perspective {
        /// Vertical field of view in degrees.
        fov_deg: f64,
        /// Width over height.
        aspect: f64,
        /// Near plane distance.
        near: f64,
        /// Far plane distance.
        far: f64,
    },
    /// Parallel lens framed by `bounds`.
    Orthographic {
        /// `x0 = left`, `x1 = right`, `y0 = bottom`, `y1 = top`.
        bounds: Rect,
        /// Near plane distance.
        near: f64,
        /// Far plane distance.
        far: f64,
    },
}

/// Pose of a camera as seen by transitions: where it is, where it looks, and its lens angle when
/// it has one.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    /// World position.
    pub position: DVec3,
    /// World rotation.
    pub orientation: DQuat,
    /// Vertical field of view in degrees, perspective cameras only.
    pub fov: Option<f64>,
}

/// A camera the transition and overview code can write into.
///
/// The projection matrix is derived state; every lens setter recomputes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// World position.
    pub position: DVec3,
    /// World rotation; the camera looks down its local -Z.
    pub orientation: DQuat,
    projection: CameraProjection,
    projection_matrix: DMat4,
}

impl Camera {
    /// A camera at the origin with identity orientation.
    pub fn new(projection: CameraProjection) -> Self {
        let mut camera = Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            projection,
            projection_matrix: DMat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Shorthand for a [`CameraProjection::Perspective`] camera.
    pub fn perspective(fov_deg: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self::new(CameraProjection::Perspective {
            fov_deg,
            aspect,
            near,
            far,
        })
    }

    /// Shorthand for a [`CameraProjection::Orthographic`] camera.
    pub fn orthographic(bounds: Rect, near: f64, far: f64) -> Self {
        Self::new(CameraProjection::Orthographic { bounds, near, far })
    }

    /// Current lens.
    pub fn projection(&self) -> CameraProjection {
        self.projection
    }

    /// Right-handed projection matrix for the current lens.
    pub fn projection_matrix(&self) -> DMat4 {
        self.projection_matrix
    }

    /// Has a perspective lens.
    pub fn is_perspective(&self) -> bool {
        matches!(self.projection, CameraProjection::Perspective { .. })
    }

    /// Field of view in degrees; `None` for orthographic cameras.
    pub fn fov(&self) -> Option<f64> {
        match self.projection {
            CameraProjection::Perspective { fov_deg, .. } => Some(fov_deg),
            CameraProjection::Orthographic { .. } => None,
        }
    }

    /// Ignored by orthographic cameras.
    pub fn set_fov(&mut self, fov: f64) {
        if let CameraProjection::Perspective { fov_deg, .. } = &mut self.projection {
            *fov_deg = fov;
            self.update_projection_matrix();
        }
    }

    /// Ignored by orthographic cameras.
    pub fn set_aspect(&mut self, value: f64) {
        if let CameraProjection::Perspective { aspect, .. } = &mut self.projection {
            *aspect = value;
            self.update_projection_matrix();
        }
    }

    /// Far plane distance.
    pub fn far(&self) -> f64 {
        match self.projection {
            CameraProjection::Perspective { far, .. } | CameraProjection::Orthographic { far, .. } => {
                far
            }
        }
    }

    /// Set the far plane of either lens.
    pub fn set_far(&mut self, value: f64) {
        match &mut self.projection {
            CameraProjection::Perspective { far, .. } | CameraProjection::Orthographic { far, .. } => {
                *far = value
            }
        }
        self.update_projection_matrix();
    }

    /// Frustum bounds; `None` for perspective cameras.
    pub fn bounds(&self) -> Option<Rect> {
        match self.projection {
            CameraProjection::Orthographic { bounds, .. } => Some(bounds),
            CameraProjection::Perspective { .. } => None,
        }
    }

    /// Ignored by perspective cameras.
    pub fn set_bounds(&mut self, value: Rect) {
        if let CameraProjection::Orthographic { bounds, .. } = &mut self.projection {
            *bounds = value;
            self.update_projection_matrix();
        }
    }

    /// Recompute the projection matrix from the lens.
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection {
            CameraProjection::Perspective {
                fov_deg,
                aspect,
                near,
                far,
            } => DMat4::perspective_rh(fov_deg.to_radians(), aspect, near, far),
            CameraProjection::Orthographic { bounds, near, far } => {
                DMat4::orthographic_rh(bounds.x0, bounds.x1, bounds.y0, bounds.y1, near, far)
            }
        };
    }

    /// Unit view direction (local -Z).
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::NEG_Z
    }

    /// Snapshot of position, orientation and field of view.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            orientation: self.orientation,
            fov: self.fov(),
        }
    }

    /// Move to `pose`; its `fov` only applies to perspective cameras.
    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.position = pose.position;
        self.orientation = pose.orientation;
        if let Some(fov) = pose.fov {
            self.set_fov(fov);
        }
    }

    /// Width and height of the visible area at `distance` along the view direction.
    pub fn view_size_at(&self, distance: f64) -> Size {
        match self.projection {
            CameraProjection::Perspective {
                fov_deg, aspect, ..
            } => {
                let height = 2.0 * distance * (fov_deg.to_radians() / 2.0).tan();
                Size::new(height * aspect, height)
            }
            CameraProjection::Orthographic { bounds, .. } => {
                Size::new(bounds.width().abs(), bounds.height().abs())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/model.rs"]
mod tests;
