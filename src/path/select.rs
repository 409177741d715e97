use crate::story::model::Projection;

/// Inputs to camera path derivation that do not live on the projections themselves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathOptions {
    /// Explicitly requested path source.
    pub camera_path_id: Option<String>,
    /// Projection the viewer currently has focused, in addition to authored `focus` flags.
    pub focused_projection_id: Option<String>,
    /// Authored timeline length, used to widen a degenerate path range.
    pub max_timeline_time: f64,
}

/// Why a projection was picked as the path source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// Named by [`PathOptions::camera_path_id`] or the document.
    ExplicitId,
    /// Carries the `cameraPath` flag.
    DesignatedPath,
    /// Focused by the viewer or authored with `focus`.
    Focused,
    /// Has the most posed keyframes.
    MostPosed,
}

/// Pick the projection a recorded path should be built from.
///
/// Priority: explicit id, `cameraPath` flag, focused perspective projection with a posed
/// keyframe, perspective projection with the most posed keyframes (earliest authored on ties).
pub fn select_path_source<'a>(
    projections: &'a [Projection],
    opts: &PathOptions,
) -> Option<(&'a Projection, SelectionReason)> {
    if let Some(id) = opts.camera_path_id.as_deref() {
        match projections.iter().find(|p| p.id == id) {
            Some(p) => return Some((p, SelectionReason::ExplicitId)),
            None => tracing::warn!(id, "requested camera path projection not found"),
        }
    }

    if let Some(p) = projections.iter().find(|p| p.camera_path) {
        return Some((p, SelectionReason::DesignatedPath));
    }

    let focus_candidate = |p: &&Projection| p.is_perspective() && p.first_posed().is_some();
    let focused = opts
        .focused_projection_id
        .as_deref()
        .and_then(|id| projections.iter().find(|p| p.id == id))
        .filter(focus_candidate)
        .or_else(|| projections.iter().filter(|p| p.focus).find(focus_candidate));
    if let Some(p) = focused {
        return Some((p, SelectionReason::Focused));
    }

    let mut best: Option<(&Projection, usize)> = None;
    for p in projections.iter().filter(|p| p.is_perspective()) {
        let count = p.posed_count();
        if count > 0 && best.is_none_or(|(_, c)| count > c) {
            best = Some((p, count));
        }
    }
    best.map(|(p, _)| (p, SelectionReason::MostPosed))
}

#[cfg(test)]
#[path = "../../tests/unit/path/select.rs"]
mod tests;
