use crate::foundation::core::{DQuat, DVec3};

/// Linear blend between two values of the same type.
pub trait Lerp: Sized {
    /// `a` at `t == 0`, `b` at `t == 1`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for DVec3 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        DVec3::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }
}

/// Spherical, shortest arc.
impl Lerp for DQuat {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.normalize().slerp(b.normalize(), t)
    }
}

/// Interpolates only when both sides are present; otherwise holds `a`.
impl<T: Lerp + Clone> Lerp for Option<T> {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Some(a), Some(b)) => Some(T::lerp(a, b, t)),
            _ => a.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
