use super::*;
use crate::foundation::core::Rect;

#[test]
fn perspective_plane_sits_at_far_and_fills_the_frustum() {
    let mut cam = Camera::perspective(90.0, 2.0, 0.1, 10.0);
    cam.position = DVec3::new(1.0, 0.0, 0.0);
    let plane = screen_plane(&cam, ProjectionType::Perspective);
    assert!((plane.center - DVec3::new(1.0, 0.0, -10.0)).length() < 1e-12);
    assert!((plane.size.height - 20.0).abs() < 1e-9);
    assert!((plane.size.width - 40.0).abs() < 1e-9);
}

#[test]
fn map_plane_uses_bounds_without_push() {
    let mut cam = Camera::orthographic(Rect::new(0.0, 0.0, 4.0, 2.0), 0.1, 25.0);
    cam.position = DVec3::new(0.0, 50.0, 0.0);
    let plane = screen_plane(&cam, ProjectionType::OrthographicMap);
    assert!((plane.center - DVec3::new(2.0, 51.0, 0.0)).length() < 1e-12);
    assert_eq!(plane.size, Size::new(4.0, 2.0));
}

#[test]
fn orthographic_plane_is_pushed_back_by_far() {
    let mut cam = Camera::orthographic(Rect::new(-1.0, -1.0, 1.0, 1.0), 0.1, 8.0);
    cam.orientation = DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2);
    let plane = screen_plane(&cam, ProjectionType::Orthographic);
    // Rotated a quarter turn about Y, the view direction is -X.
    assert!((plane.center - DVec3::new(-8.0, 0.0, 0.0)).length() < 1e-9);
    assert_eq!(plane.orientation, cam.orientation);
}
