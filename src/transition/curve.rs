use crate::animation::lerp::Lerp;
use crate::foundation::core::{DVec3, UP};

/// Hops up to this distance travel in a straight line.
pub const STRAIGHT_MAX_DISTANCE: f64 = 40.0;

const MIN_APEX_HEIGHT: f64 = 8.0;
const MAX_LATERAL_OFFSET: f64 = 22.0;

/// Spatial path of a transition. Stateless; sample with [`Curve::point_at`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Curve {
    /// Line segment for short hops.
    Straight {
        /// Transition start.
        start: DVec3,
        /// Transition target.
        end: DVec3,
    },
    /// Centripetal Catmull-Rom spline through `start, control, control, end`.
    Through {
        /// Start, two raised controls, target.
        points: [DVec3; 4],
    },
}

/// Straight segment for short hops; otherwise a raised, gently banked curve through two
/// synthetic control points.
pub fn build_curve(start: DVec3, target: DVec3, arc_height: f64) -> Curve {
    let travel = target - start;
    let distance = travel.length();
    if !(distance > STRAIGHT_MAX_DISTANCE) {
        return Curve::Straight { start, end: target };
    }

    let apex = (arc_height + distance * 0.08).max(MIN_APEX_HEIGHT);
    let lateral = (distance * 0.2).min(MAX_LATERAL_OFFSET);
    let ground = DVec3::new(travel.x, 0.0, travel.z);
    let side = if ground.length_squared() > 1e-12 {
        UP.cross(ground).normalize()
    } else {
        DVec3::X
    };

    let c1 = <DVec3 as Lerp>::lerp(&start, &target, 0.45) + UP * (apex * 0.9) + side * lateral;
    let c2 =
        <DVec3 as Lerp>::lerp(&start, &target, 0.5) + UP * apex - side * (lateral * 0.35);
    Curve::Through {
        points: [start, c1, c2, target],
    }
}

impl Curve {
    /// First point of the curve.
    pub fn start(&self) -> DVec3 {
        match self {
            Self::Straight { start, .. } => *start,
            Self::Through { points } => points[0],
        }
    }

    /// Last point of the curve.
    pub fn end(&self) -> DVec3 {
        match self {
            Self::Straight { end, .. } => *end,
            Self::Through { points } => points[3],
        }
    }

    /// Is [`Curve::Straight`].
    pub fn is_straight(&self) -> bool {
        matches!(self, Self::Straight { .. })
    }

    /// Point at parameter `t` (clamped to `[0, 1]`). Both ends are returned exactly.
    pub fn point_at(&self, t: f64) -> DVec3 {
        if t.is_nan() || t <= 0.0 {
            return self.start();
        }
        if t >= 1.0 {
            return self.end();
        }
        match self {
            Self::Straight { start, end } => <DVec3 as Lerp>::lerp(start, end, t),
            Self::Through { points } => catmull_rom(points, t),
        }
    }
}

fn catmull_rom(points: &[DVec3; 4], t: f64) -> DVec3 {
    let last = points.len() - 1;
    let scaled = last as f64 * t;
    let mut seg = (scaled.floor() as usize).min(last);
    let mut weight = scaled - seg as f64;
    if seg == last {
        seg = last - 1;
        weight = 1.0;
    }

    let p1 = points[seg];
    let p2 = points[seg + 1];
    // Missing neighbours at the ends are mirrored across the endpoint.
    let p0 = if seg > 0 {
        points[seg - 1]
    } else {
        points[0] * 2.0 - points[1]
    };
    let p3 = if seg + 2 <= last {
        points[seg + 2]
    } else {
        points[last] * 2.0 - points[last - 1]
    };

    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    // Cubic Hermite between p1 and p2 with tangents t1, t2.
    let c0 = p1;
    let c1 = t1;
    let c2 = p1 * -3.0 + p2 * 3.0 - t1 * 2.0 - t2;
    let c3 = p1 * 2.0 - p2 * 2.0 + t1 + t2;
    let w = weight;
    c0 + c1 * w + c2 * (w * w) + c3 * (w * w * w)
}

#[cfg(test)]
#[path = "../../tests/unit/transition/curve.rs"]
mod tests;
