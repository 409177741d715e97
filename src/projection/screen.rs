use crate::camera::model::Camera;
use crate::foundation::core::{DQuat, DVec3, Size};
use crate::story::model::ProjectionType;

/// Where a projection's image is drawn in the scene: a camera-facing quad.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScreenPlane {
    /// World position of the quad centre.
    pub center: DVec3,
    /// Faces the projection camera.
    pub orientation: DQuat,
    /// World width and height.
    pub size: Size,
}

impl Default for ScreenPlane {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            size: Size::ZERO,
        }
    }
}

/// Map projections lie on the bounds rectangle itself; other orthographic projections use the
/// bounds pushed back by `far`; perspective ones fill the frustum at the far plane.
pub fn screen_plane(camera: &Camera, projection_type: ProjectionType) -> ScreenPlane {
    let far = camera.far();
    let local = match camera.bounds() {
        Some(bounds) => {
            let center = bounds.center();
            let depth = if projection_type.is_map() { 0.0 } else { -far };
            DVec3::new(center.x, center.y, depth)
        }
        None => DVec3::new(0.0, 0.0, -far),
    };
    ScreenPlane {
        center: camera.position + camera.orientation * local,
        orientation: camera.orientation,
        size: camera.view_size_at(far),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/screen.rs"]
mod tests;
