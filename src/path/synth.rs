use crate::foundation::core::TimeRange;
use crate::keyframe::model::{KEYFRAME_TIME_EPSILON, Keyframe};
use crate::path::select::{PathOptions, SelectionReason, select_path_source};
use crate::story::model::Projection;

/// Id given to the synthesized path projection.
pub const CAMERA_PATH_ID: &str = "camera-path";

/// How a [`CameraPath`] was built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// Retimed keyframes of a single authored projection.
    Recorded,
    /// One representative pose per camera-selectable projection, indexed `0, 1, 2, ..`.
    Sequence,
}

/// The canonical camera path.
///
/// Derived and read-only: rebuild it with [`derive_path`] whenever the projection set changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPath {
    /// Projection-shaped view of the path. Always hidden: opacity 0, no screen, not selectable.
    pub projection: Projection,
    /// Recorded or sequence.
    pub kind: PathKind,
    /// Recorded paths only: the projection the keyframes came from.
    pub source_id: Option<String>,
    /// Recorded paths only: why the source was chosen.
    pub selection: Option<SelectionReason>,
    /// Originating projection id of each path keyframe, parallel to `projection.keyframes`.
    pub keyframe_sources: Vec<String>,
    /// Global time span of the path keyframes.
    pub range: TimeRange,
}

impl CameraPath {
    /// Path keyframes on the global timeline, strictly increasing in time.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.projection.keyframes
    }
}

/// Select or synthesize the canonical camera path.
///
/// Returns `None` only when no projection has a posed keyframe to contribute.
#[tracing::instrument(skip(projections, opts), fields(count = projections.len()))]
pub fn derive_path(projections: &[Projection], opts: &PathOptions) -> Option<CameraPath> {
    if let Some((source, reason)) = select_path_source(projections, opts) {
        if source.posed_count() >= 2 {
            tracing::debug!(source = %source.id, ?reason, "building recorded camera path");
            return Some(recorded_path(source, reason, opts.max_timeline_time));
        }
        tracing::debug!(
            source = %source.id,
            "path source has fewer than two posed keyframes, synthesizing a sequence"
        );
    }
    sequence_path(projections, opts.max_timeline_time)
}

fn hidden(mut k: Keyframe) -> Keyframe {
    k.opacity = 0.0;
    k.screen = false;
    k
}

fn path_projection(keyframes: Vec<Keyframe>, index: usize) -> Projection {
    Projection {
        camera_selectable: false,
        keyframes,
        ..Projection::new(CAMERA_PATH_ID, index)
    }
}

fn recorded_path(source: &Projection, reason: SelectionReason, max_timeline: f64) -> CameraPath {
    let mut keyframes: Vec<Keyframe> = source
        .posed_keyframes()
        .map(|k| {
            let mut k = hidden(k.clone());
            k.time += source.time;
            k
        })
        .collect();
    repair_increasing_times(&mut keyframes);

    let range = derive_camera_path_range(&keyframes, max_timeline);
    CameraPath {
        keyframe_sources: vec![source.id.clone(); keyframes.len()],
        projection: path_projection(keyframes, source.index),
        kind: PathKind::Recorded,
        source_id: Some(source.id.clone()),
        selection: Some(reason),
        range,
    }
}

// Each projection contributes exactly its first posed keyframe; later poses are dropped.
fn sequence_path(projections: &[Projection], max_timeline: f64) -> Option<CameraPath> {
    let mut candidates: Vec<(usize, &Projection)> = projections
        .iter()
        .enumerate()
        .filter(|(_, p)| p.camera_selectable && p.is_perspective() && p.first_posed().is_some())
        .collect();
    if candidates.is_empty() {
        return None;
    }
    // Ties keep authoring order.
    candidates.sort_by(|(ia, a), (ib, b)| {
        a.start_time.total_cmp(&b.start_time).then(ia.cmp(ib))
    });

    let mut keyframes = Vec::with_capacity(candidates.len());
    let mut keyframe_sources = Vec::with_capacity(candidates.len());
    for (i, (_, p)) in candidates.iter().enumerate() {
        let Some(first) = p.first_posed() else {
            continue;
        };
        let mut k = hidden(first.clone());
        k.time = i as f64;
        keyframes.push(k);
        keyframe_sources.push(p.id.clone());
    }

    let range = derive_camera_path_range(&keyframes, max_timeline);
    Some(CameraPath {
        projection: path_projection(keyframes, projections.len()),
        kind: PathKind::Sequence,
        source_id: None,
        selection: None,
        keyframe_sources,
        range,
    })
}

/// Bump any non-increasing time just past its predecessor, keeping order.
fn repair_increasing_times(keyframes: &mut [Keyframe]) {
    for i in 1..keyframes.len() {
        let prev = keyframes[i - 1].time;
        if keyframes[i].time <= prev {
            keyframes[i].time = (prev + KEYFRAME_TIME_EPSILON).max(prev.next_up());
        }
    }
}

/// Min/max keyframe time; a degenerate (or empty) span is widened to
/// `max(max_timeline_time, 1)` so the duration is always positive.
pub fn derive_camera_path_range(keyframes: &[Keyframe], max_timeline_time: f64) -> TimeRange {
    let times = keyframes.iter().map(|k| k.time).filter(|t| t.is_finite());
    let (min, max) = times.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
        (lo.min(t), hi.max(t))
    });
    let start = if min.is_finite() { min } else { 0.0 };
    let mut end = if max.is_finite() { max } else { start };
    if end - start <= 0.0 {
        let fallback = if max_timeline_time.is_finite() {
            max_timeline_time.max(1.0)
        } else {
            1.0
        };
        end = (start + fallback).max(start.next_up());
    }
    TimeRange {
        start,
        end,
        duration: end - start,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/synth.rs"]
mod tests;
