use std::f64::consts::{PI, TAU};

/// Wrap an angle in radians into `[-PI, PI]`.
pub fn wrap_angle(rad: f64) -> f64 {
    if !rad.is_finite() {
        return 0.0;
    }
    let wrapped = (rad + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps +PI onto -PI; both are the same direction.
    if wrapped == -PI && rad > 0.0 { PI } else { wrapped }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
