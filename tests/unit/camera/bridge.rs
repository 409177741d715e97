use std::cell::RefCell;
use std::collections::HashMap;

use super::*;
use crate::camera::model::CameraPose;
use crate::camera::rig::OrbitRig;
use crate::foundation::core::DQuat;
use crate::keyframe::model::Keyframe;

#[derive(Default)]
struct Poses(RefCell<HashMap<String, CameraPose>>);

impl Poses {
    fn put(&self, id: &str, x: f64) {
        self.0.borrow_mut().insert(
            id.to_owned(),
            CameraPose {
                position: DVec3::new(x, 0.0, 0.0),
                orientation: DQuat::IDENTITY,
                fov: Some(40.0),
            },
        );
    }
}

impl PoseProvider for Poses {
    fn pose_of(&self, projection_id: &str) -> Option<CameraPose> {
        self.0.borrow().get(projection_id).copied()
    }
}

fn camera() -> Camera {
    Camera::perspective(50.0, 1.0, 0.1, 1000.0)
}

fn posed(id: &str, index: usize, at: DVec3) -> Projection {
    let mut p = Projection::new(id, index);
    p.keyframes.push(Keyframe {
        position: Some(at),
        rotation: Some(DVec3::ZERO),
        fov: 35.0,
        ..Keyframe::default()
    });
    p
}

#[test]
fn transition_completes_and_restores_orbit() {
    let poses = Poses::default();
    poses.put("b", 100.0);
    let mut bridge = CameraBridge::default();
    let mut cam = camera();
    let mut orbit = OrbitRig::default();

    let handle = bridge.transition_to_camera("b", None);
    assert!(bridge.is_driving());
    assert_eq!(handle.outcome(), None);

    assert_eq!(bridge.tick(16.0, &poses, &mut cam, Some(&mut orbit)), None);
    assert!(!orbit.enabled, "orbit is locked while driving");

    let mut settled = None;
    for _ in 0..400 {
        settled = bridge.tick(16.0, &poses, &mut cam, Some(&mut orbit));
        if settled.is_some() {
            break;
        }
    }
    assert_eq!(settled, Some(true));
    assert_eq!(handle.outcome(), Some(true));
    assert!(!bridge.is_driving());
    assert!(orbit.enabled);
    assert_eq!(cam.position, DVec3::new(100.0, 0.0, 0.0));
    assert!((cam.fov().unwrap_or_default() - 40.0).abs() < 1e-9);
}

#[test]
fn new_transition_supersedes_the_old_one() {
    let poses = Poses::default();
    poses.put("a", 60.0);
    poses.put("b", -60.0);
    let mut bridge = CameraBridge::default();
    let mut cam = camera();

    let first = bridge.transition_to_camera("a", Some(1800.0));
    bridge.tick(100.0, &poses, &mut cam, None);
    let mid = cam.position;

    let second = bridge.transition_to_camera("b", Some(1800.0));
    assert_eq!(first.outcome(), Some(false));
    assert_eq!(second.outcome(), None);
    assert_ne!(first.id(), second.id());

    // The new transition starts where the old one left the camera.
    bridge.tick(0.0, &poses, &mut cam, None);
    assert_eq!(cam.position, mid);
}

#[test]
fn missing_target_times_out_softly() {
    let poses = Poses::default();
    let mut bridge = CameraBridge::new(TransitionOpts {
        target_wait_timeout_ms: 100.0,
        ..TransitionOpts::default()
    });
    let mut cam = camera();
    let before = cam.clone();
    let mut orbit = OrbitRig::default();

    let handle = bridge.transition_to_camera("ghost", None);
    assert_eq!(bridge.tick(60.0, &poses, &mut cam, Some(&mut orbit)), None);
    assert_eq!(bridge.tick(60.0, &poses, &mut cam, Some(&mut orbit)), Some(false));
    assert_eq!(handle.outcome(), Some(false));
    assert_eq!(cam, before);
    assert!(orbit.enabled);
}

#[test]
fn target_appearing_late_still_runs() {
    let poses = Poses::default();
    let mut bridge = CameraBridge::default();
    let mut cam = camera();
    let handle = bridge.transition_to_camera("late", Some(0.0));
    assert_eq!(bridge.tick(500.0, &poses, &mut cam, None), None);
    poses.put("late", 5.0);
    assert_eq!(bridge.tick(0.0, &poses, &mut cam, None), None);
    assert_eq!(bridge.tick(5000.0, &poses, &mut cam, None), Some(true));
    assert_eq!(handle.outcome(), Some(true));
}

#[test]
fn cancel_freezes_camera_and_unlocks_orbit() {
    let poses = Poses::default();
    poses.put("b", 100.0);
    let mut bridge = CameraBridge::default();
    let mut cam = camera();
    let mut orbit = OrbitRig::default();
    let handle = bridge.transition_to_camera("b", None);
    bridge.tick(200.0, &poses, &mut cam, Some(&mut orbit));
    assert!(!orbit.enabled);

    bridge.cancel(Some(&mut orbit));
    let frozen = cam.clone();
    assert_eq!(handle.outcome(), Some(false));
    assert!(orbit.enabled);
    assert_eq!(bridge.tick(200.0, &poses, &mut cam, Some(&mut orbit)), None);
    assert_eq!(cam, frozen);
}

#[test]
fn overview_looks_at_the_centroid() {
    let projections = vec![
        posed("a", 0, DVec3::new(-10.0, 0.0, 0.0)),
        posed("b", 1, DVec3::new(10.0, 0.0, 0.0)),
        Projection::new("empty", 2),
    ];
    let mut bridge = CameraBridge::default();
    let mut cam = camera();
    let mut orbit = OrbitRig::default();
    let applied = bridge.apply_initial_overview_camera(
        OverviewRequest {
            projections: &projections,
            overview_mode: true,
            active_camera_id: None,
        },
        &mut cam,
        Some(&mut orbit),
    );
    assert!(applied);
    assert_eq!(orbit.target, DVec3::ZERO);
    assert!(cam.position.y > 0.0 && cam.position.z > 0.0);
    let towards = (DVec3::ZERO - cam.position).normalize();
    assert!(cam.forward().dot(towards) > 1.0 - 1e-9);
}

#[test]
fn non_overview_uses_the_active_projection() {
    let projections = vec![
        posed("a", 0, DVec3::new(1.0, 2.0, 3.0)),
        posed("b", 1, DVec3::new(4.0, 5.0, 6.0)),
    ];
    let mut bridge = CameraBridge::default();
    let mut cam = camera();
    let request = |id| OverviewRequest {
        projections: &projections,
        overview_mode: false,
        active_camera_id: id,
    };

    assert!(bridge.apply_initial_overview_camera(request(Some("b")), &mut cam, None));
    assert_eq!(cam.position, DVec3::new(4.0, 5.0, 6.0));
    assert_eq!(cam.fov(), Some(35.0));

    // Unknown ids fall back to the first selectable posed projection.
    assert!(bridge.apply_initial_overview_camera(request(Some("zzz")), &mut cam, None));
    assert_eq!(cam.position, DVec3::new(1.0, 2.0, 3.0));
}

#[test]
fn nothing_posed_means_nothing_applied() {
    let projections = vec![Projection::new("a", 0)];
    let mut bridge = CameraBridge::default();
    let mut cam = camera();
    let before = cam.clone();
    for overview_mode in [true, false] {
        let applied = bridge.apply_initial_overview_camera(
            OverviewRequest {
                projections: &projections,
                overview_mode,
                active_camera_id: Some("a"),
            },
            &mut cam,
            None,
        );
        assert!(!applied);
    }
    assert_eq!(cam, before);
}
