use crate::foundation::core::DVec3;

/// Shortest planned transition.
pub const MIN_DURATION_MS: f64 = 700.0;
/// Longest planned transition.
pub const MAX_DURATION_MS: f64 = 4200.0;
/// Highest planned arc above the straight line.
pub const MAX_ARC_HEIGHT: f64 = 140.0;

/// Timing and arc derived from how far a transition travels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionProfile {
    /// Straight-line distance between the endpoints.
    pub distance: f64,
    /// Always within `[MIN_DURATION_MS, MAX_DURATION_MS]`.
    pub effective_duration_ms: f64,
    /// Lift of the curve, `0..=MAX_ARC_HEIGHT`.
    pub arc_height: f64,
}

/// Distance-aware duration and arc height.
///
/// Long hops take longer and arc higher than the requested duration suggests; short hops are
/// shortened. These constants shape authored timing and must not drift.
pub fn plan(start: DVec3, target: DVec3, requested_duration_ms: f64) -> TransitionProfile {
    let requested = if requested_duration_ms.is_finite() {
        requested_duration_ms
    } else {
        0.0
    };
    let distance = start.distance(target);
    let distance = if distance.is_finite() { distance } else { 0.0 };

    let far_factor = ((distance - 24.0) / 90.0).clamp(0.0, 1.0);
    let base_duration = (requested * (0.5 + far_factor * 0.85)).round();
    let duration_from_distance = (650.0 + distance * (14.0 + 12.0 * far_factor)).round();
    let effective_duration_ms =
        base_duration.max(duration_from_distance).clamp(MIN_DURATION_MS, MAX_DURATION_MS);
    let arc_height =
        (distance * (0.05 + 0.3 * far_factor) + 10.0 * far_factor).clamp(0.0, MAX_ARC_HEIGHT);

    TransitionProfile {
        distance,
        effective_duration_ms,
        arc_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/plan.rs"]
mod tests;
