use crate::foundation::core::Pose;
use crate::foundation::math::wrap_angle;
use crate::keyframe::model::NarrativeContext;
use crate::path::synth::CameraPath;
use crate::story::model::{AuthoredMoment, Projection};

/// Anchors closer than this (seconds) to an earlier placed anchor are dropped.
pub const NARRATIVE_TIME_EPSILON: f64 = 1e-3;

/// Weight of summed angular difference (radians) against positional distance.
pub const ROTATION_DISTANCE_WEIGHT: f64 = 20.0;

/// Where a [`NarrativeMoment`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentSource {
    /// An authored moment.
    Authored,
    /// Context on a path keyframe.
    Keyframe,
    /// Another projection's context snapped onto the path.
    Projection,
    /// One per path keyframe, context possibly empty.
    Path,
}

/// A time-anchored piece of narrative content along the camera path.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NarrativeMoment {
    /// Stable identifier.
    pub id: String,
    /// Global time, seconds.
    pub time: f64,
    /// Position within the path range, `0..=1`.
    pub progress: f64,
    /// Text to show at this moment.
    pub context: NarrativeContext,
    /// Origin of the anchor.
    pub source: MomentSource,
}

/// Euclidean position distance plus weighted wrapped angular difference over all three axes.
pub fn pose_distance(a: Pose, b: Pose) -> f64 {
    let angular: f64 = (a.rotation - b.rotation)
        .to_array()
        .iter()
        .map(|d| wrap_angle(*d).abs())
        .sum();
    a.position.distance(b.position) + ROTATION_DISTANCE_WEIGHT * angular
}

/// Build the ordered narrative anchors for `path`.
///
/// Authored moments win outright. Otherwise keyframe contexts on the path are used, then other
/// projections' contexts matched onto the nearest path pose, and finally one (possibly empty)
/// anchor per path keyframe. Whatever the source, the result is sorted by time and anchors
/// within [`NARRATIVE_TIME_EPSILON`] of the previous kept anchor are dropped.
pub fn derive_narrative_moments(
    path: &CameraPath,
    projections: &[Projection],
    authored: &[AuthoredMoment],
) -> Vec<NarrativeMoment> {
    let mut moments = if !authored.is_empty() {
        authored_moments(path, authored)
    } else {
        let from_keyframes = keyframe_moments(path);
        if !from_keyframes.is_empty() {
            from_keyframes
        } else {
            let matched = projection_moments(path, projections);
            if matched.is_empty() {
                path_moments(path)
            } else {
                matched
            }
        }
    };
    moments.sort_by(|a, b| a.time.total_cmp(&b.time));
    moments.dedup_by(|later, kept| {
        let close = (later.time - kept.time).abs() <= NARRATIVE_TIME_EPSILON;
        if close {
            tracing::debug!(
                id = %later.id,
                time = later.time,
                kept = %kept.id,
                "dropping duplicate narrative anchor"
            );
        }
        close
    });
    moments
}

fn authored_moments(path: &CameraPath, authored: &[AuthoredMoment]) -> Vec<NarrativeMoment> {
    let last = authored.len().saturating_sub(1);
    authored
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let spread = if last == 0 {
                0.0
            } else {
                i as f64 / last as f64
            };
            let progress = m.progress.unwrap_or(spread);
            NarrativeMoment {
                id: m.id.clone().unwrap_or_else(|| format!("moment-{i}")),
                time: m.time.unwrap_or_else(|| path.range.time_at(progress)),
                progress,
                context: m.context.clone(),
                source: MomentSource::Authored,
            }
        })
        .collect()
}

fn keyframe_moments(path: &CameraPath) -> Vec<NarrativeMoment> {
    let mut out: Vec<NarrativeMoment> = Vec::new();
    for (i, k) in path.keyframes().iter().enumerate() {
        let Some(context) = k.context.as_ref().filter(|_| k.has_context()) else {
            continue;
        };
        let source = path.keyframe_sources.get(i).map_or("path", String::as_str);
        out.push(NarrativeMoment {
            id: format!("{source}-keyframe-{i}"),
            time: k.time,
            progress: path.range.progress_at(k.time),
            context: context.clone(),
            source: MomentSource::Keyframe,
        });
    }
    out
}

fn projection_moments(path: &CameraPath, projections: &[Projection]) -> Vec<NarrativeMoment> {
    let poses: Vec<(f64, Pose)> = path
        .keyframes()
        .iter()
        .filter_map(|k| Some((k.time, k.pose()?)))
        .collect();
    if poses.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<NarrativeMoment> = Vec::new();
    for p in projections {
        if path.source_id.as_deref() == Some(p.id.as_str()) || !p.has_context() {
            continue;
        }
        let Some(pose) = p.first_posed().and_then(|k| k.pose()) else {
            continue;
        };
        let mut nearest = poses[0];
        let mut best = pose_distance(pose, nearest.1);
        for candidate in &poses[1..] {
            let d = pose_distance(pose, candidate.1);
            if d < best {
                best = d;
                nearest = *candidate;
            }
        }
        let time = nearest.0;
        out.push(NarrativeMoment {
            id: p.id.clone(),
            time,
            progress: path.range.progress_at(time),
            context: p.context.clone().unwrap_or_default(),
            source: MomentSource::Projection,
        });
    }
    out
}

fn path_moments(path: &CameraPath) -> Vec<NarrativeMoment> {
    path.keyframes()
        .iter()
        .enumerate()
        .map(|(i, k)| NarrativeMoment {
            id: format!("path-{i}"),
            time: k.time,
            progress: path.range.progress_at(k.time),
            context: k.context.clone().unwrap_or_default(),
            source: MomentSource::Path,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/path/narrative.rs"]
mod tests;
