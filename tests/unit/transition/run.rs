use super::*;
use crate::camera::rig::OrbitRig;

fn params(to_x: f64) -> TransitionParams {
    TransitionParams {
        from: CameraPose {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            fov: Some(50.0),
        },
        to: CameraPose {
            position: DVec3::new(to_x, 0.0, 0.0),
            orientation: DQuat::from_rotation_y(1.0),
            fov: Some(30.0),
        },
        orbit_from: Some(DVec3::new(0.0, 0.0, -10.0)),
        orbit_to: Some(DVec3::new(to_x, 0.0, -10.0)),
        requested_duration_ms: 1800.0,
        ease: Ease::InOutCubic,
    }
}

#[test]
fn runs_to_completion_and_lands_on_target() {
    let gate = TransitionGate::new();
    let mut t = Transition::new(params(100.0), gate.begin());
    let mut cam = Camera::perspective(50.0, 1.0, 0.1, 100.0);
    let mut orbit = OrbitRig::default();
    assert_eq!(t.state(), TransitionState::Idle);
    assert_eq!(t.profile().effective_duration_ms, 3063.0);

    let s = t.tick(1000.0, &mut cam, Some(&mut orbit));
    assert_eq!(s, TransitionState::Running { elapsed_ms: 1000.0 });
    assert_eq!(t.outcome(), None);
    assert!(cam.position.x > 0.0 && cam.position.x < 100.0);

    let mut last = s;
    for _ in 0..10 {
        last = t.tick(500.0, &mut cam, Some(&mut orbit));
    }
    assert_eq!(last, TransitionState::Completed);
    assert_eq!(t.outcome(), Some(true));
    assert_eq!(cam.position, DVec3::new(100.0, 0.0, 0.0));
    assert!(cam.orientation.angle_between(DQuat::from_rotation_y(1.0)) < 1e-6);
    assert!((cam.fov().unwrap_or_default() - 30.0).abs() < 1e-9);
    assert!((orbit.target - DVec3::new(100.0, 0.0, -10.0)).length() < 1e-9);
    assert!(orbit.updates() >= 2);
}

#[test]
fn cancelled_transition_stops_writing() {
    let gate = TransitionGate::new();
    let mut t = Transition::new(params(100.0), gate.begin());
    let mut cam = Camera::perspective(50.0, 1.0, 0.1, 100.0);
    t.tick(500.0, &mut cam, None);
    let frozen = cam.clone();

    let _next = gate.begin();
    assert_eq!(t.tick(500.0, &mut cam, None), TransitionState::Cancelled);
    assert_eq!(t.outcome(), Some(false));
    assert_eq!(cam, frozen);

    // Stays cancelled even when ticked far past the end.
    assert_eq!(t.tick(1e6, &mut cam, None), TransitionState::Cancelled);
    assert_eq!(cam, frozen);
}

#[test]
fn newer_tokens_survive_older_cancellations() {
    let gate = TransitionGate::new();
    let first = gate.begin();
    let second = gate.begin();
    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());
    gate.cancel_all();
    assert!(second.is_cancelled());
    assert!(!CancelToken::detached().is_cancelled());
}

#[test]
fn orthographic_camera_keeps_its_lens() {
    let mut t = Transition::new(params(10.0), CancelToken::detached());
    let bounds = crate::foundation::core::Rect::new(-1.0, -1.0, 1.0, 1.0);
    let mut cam = Camera::orthographic(bounds, 0.1, 10.0);
    let before = cam.projection_matrix();
    assert_eq!(t.tick(5000.0, &mut cam, None), TransitionState::Completed);
    assert_eq!(cam.projection_matrix(), before);
    assert_eq!(cam.position, DVec3::new(10.0, 0.0, 0.0));
}

#[test]
fn bad_deltas_do_not_advance() {
    let mut t = Transition::new(params(10.0), CancelToken::detached());
    let mut cam = Camera::perspective(50.0, 1.0, 0.1, 100.0);
    assert_eq!(
        t.tick(f64::NAN, &mut cam, None),
        TransitionState::Running { elapsed_ms: 0.0 }
    );
    assert_eq!(
        t.tick(-50.0, &mut cam, None),
        TransitionState::Running { elapsed_ms: 0.0 }
    );
    assert_eq!(cam.position, DVec3::ZERO);
}
