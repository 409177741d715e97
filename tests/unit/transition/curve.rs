use super::*;

#[test]
fn short_hops_are_straight() {
    let start = DVec3::new(1.0, 2.0, 3.0);
    let c = build_curve(start, start + DVec3::new(40.0, 0.0, 0.0), 30.0);
    assert!(c.is_straight());
    let mid = c.point_at(0.5);
    assert!((mid - DVec3::new(21.0, 2.0, 3.0)).length() < 1e-12);
}

#[test]
fn long_hops_pass_through_raised_control_points() {
    let start = DVec3::ZERO;
    let target = DVec3::new(100.0, 0.0, 0.0);
    let c = build_curve(start, target, 45.0);
    let Curve::Through { points } = c else {
        panic!("expected a curve for a 100 unit hop");
    };
    assert_eq!(points[0], start);
    assert_eq!(points[3], target);
    assert!(points[1].y > 0.0 && points[2].y > points[1].y);
    // Banked sideways, first control one way and the second back the other.
    assert!(points[1].z * points[2].z < 0.0);

    let at_first_control = c.point_at(1.0 / 3.0);
    assert!((at_first_control - points[1]).length() < 1e-9);
}

#[test]
fn endpoints_are_exact() {
    let start = DVec3::new(-12.5, 3.0, 7.25);
    let target = DVec3::new(140.0, -20.0, 33.0);
    for arc in [0.0, 12.0, 140.0] {
        let c = build_curve(start, target, arc);
        assert_eq!(c.point_at(0.0), start);
        assert_eq!(c.point_at(1.0), target);
        assert_eq!(c.point_at(-3.0), start);
        assert_eq!(c.point_at(7.0), target);
        assert_eq!(c.point_at(f64::NAN), start);
    }
}

#[test]
fn curve_is_continuous_near_the_ends() {
    let start = DVec3::ZERO;
    let target = DVec3::new(0.0, 0.0, -200.0);
    let c = build_curve(start, target, 60.0);
    assert!(!c.is_straight());
    assert!((c.point_at(1e-6) - start).length() < 1e-3);
    assert!((c.point_at(1.0 - 1e-6) - target).length() < 1e-3);
    assert!(c.point_at(0.5).y > 0.0);
}

#[test]
fn vertical_hop_falls_back_to_x_bank() {
    let c = build_curve(DVec3::ZERO, DVec3::new(0.0, 80.0, 0.0), 10.0);
    let Curve::Through { points } = c else {
        panic!("expected a curve");
    };
    assert!(points[1].x > 0.0);
    assert!(points[1].z.abs() < 1e-12);
}
