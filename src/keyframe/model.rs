use std::collections::BTreeSet;

use crate::animation::lerp::Lerp;
use crate::foundation::core::{DVec3, Pose};

/// Gap inserted between keyframes that were authored at the same time.
pub const KEYFRAME_TIME_EPSILON: f64 = 1e-4;

/// Vertical field of view, degrees, when a keyframe leaves it out.
pub const DEFAULT_FOV_DEG: f64 = 50.0;
/// Far plane distance when a keyframe leaves it out.
pub const DEFAULT_FAR: f64 = 10.0;

/// Authored narrative text attached to a keyframe, a projection or a moment.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NarrativeContext {
    /// Heading shown with the moment.
    pub title: Option<String>,
    /// Body text, markdown.
    pub markdown: Option<String>,
}

impl NarrativeContext {
    /// Neither title nor body is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.markdown.is_none()
    }
}

/// Time-stamped snapshot of pose, lens and visibility attributes.
///
/// `time` is local to the owning projection; add the projection offset for global time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Seconds.
    pub time: f64,
    /// World position, if authored.
    pub position: Option<DVec3>,
    /// Euler radians, applied X then Y then Z.
    pub rotation: Option<DVec3>,
    /// Vertical field of view, degrees.
    pub fov: f64,
    /// Far plane distance.
    pub far: f64,
    /// `0` hides the projection.
    pub opacity: f64,
    /// Show the projected image plane.
    pub screen: bool,
    /// Scene layers this projection paints onto.
    pub layers: BTreeSet<String>,
    /// Narrative text anchored at this keyframe.
    pub context: Option<NarrativeContext>,
}

impl Default for Keyframe {
    fn default() -> Self {
        Self {
            time: 0.0,
            position: None,
            rotation: None,
            fov: DEFAULT_FOV_DEG,
            far: DEFAULT_FAR,
            opacity: 1.0,
            screen: true,
            layers: BTreeSet::new(),
            context: None,
        }
    }
}

impl Keyframe {
    /// Both position and rotation are authored.
    pub fn is_posed(&self) -> bool {
        self.position.is_some() && self.rotation.is_some()
    }

    /// The keyframe's pose when it [is posed](Keyframe::is_posed).
    pub fn pose(&self) -> Option<Pose> {
        Some(Pose {
            position: self.position?,
            rotation: self.rotation?,
        })
    }

    /// Carries a non-empty [`NarrativeContext`].
    pub fn has_context(&self) -> bool {
        self.context.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Numeric and vector fields interpolate; `screen`, `layers` and `context` hold `a`.
impl Lerp for Keyframe {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            time: <f64 as Lerp>::lerp(&a.time, &b.time, t),
            position: <Option<DVec3> as Lerp>::lerp(&a.position, &b.position, t),
            rotation: <Option<DVec3> as Lerp>::lerp(&a.rotation, &b.rotation, t),
            fov: <f64 as Lerp>::lerp(&a.fov, &b.fov, t),
            far: <f64 as Lerp>::lerp(&a.far, &b.far, t),
            opacity: <f64 as Lerp>::lerp(&a.opacity, &b.opacity, t),
            screen: a.screen,
            layers: a.layers.clone(),
            context: a.context.clone(),
        }
    }
}

/// Stable-sort by time, then nudge equal (or non-increasing) times forward so every time is
/// unique while authoring order among ties is kept.
pub fn normalize_keyframe_times(keyframes: &mut [Keyframe]) {
    keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    for i in 1..keyframes.len() {
        let prev = keyframes[i - 1].time;
        if keyframes[i].time <= prev {
            keyframes[i].time = (prev + KEYFRAME_TIME_EPSILON).max(prev.next_up());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/keyframe/model.rs"]
mod tests;
