use super::*;

#[test]
fn endpoints_are_exact() {
    for ease in [Ease::Linear, Ease::InOutQuad, Ease::InOutCubic] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(9.0), 1.0);
    }
}

#[test]
fn in_out_cubic_matches_piecewise_formula() {
    assert_eq!(Ease::InOutCubic.apply(0.25), 4.0 * 0.25f64.powi(3));
    assert_eq!(Ease::InOutCubic.apply(0.5), 0.5);
    assert!((Ease::InOutCubic.apply(0.75) - (1.0 - 0.5f64.powi(3) / 2.0)).abs() < 1e-12);
}

#[test]
fn default_is_in_out_cubic() {
    assert_eq!(Ease::default(), Ease::InOutCubic);
}
