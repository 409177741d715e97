use serde_json::Value;

use crate::foundation::core::TimeRange;
use crate::foundation::error::StorycamResult;
use crate::path::narrative::{NarrativeMoment, derive_narrative_moments};
use crate::path::select::PathOptions;
use crate::path::synth::derive_path;
use crate::story::load::{parse_story_json, parse_story_value};
use crate::story::model::{Projection, ProjectionType, StoryDocument, UiOptions};
use crate::story::repository::StoryRepository;

/// A viewpoint the viewer can switch to.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraTrack {
    /// Projection id.
    pub id: String,
    /// Context title when authored, otherwise the id.
    pub label: String,
    /// Lens kind of the projection.
    pub projection_type: ProjectionType,
    /// Projection start time; tracks are sorted by it.
    pub start_time: f64,
    /// All keyframes, posed or not.
    pub keyframe_count: usize,
    /// Has at least one keyframe with both position and rotation.
    pub posed: bool,
}

/// Everything a viewer needs from one story.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStory {
    /// Scene asset to load.
    pub scene_src: Option<String>,
    /// End of the global timeline, seconds.
    pub max_timeline_time: f64,
    /// Normalized projections in authoring order.
    pub projections: Vec<Projection>,
    /// Selectable viewpoints.
    pub camera_tracks: Vec<CameraTrack>,
    /// Hidden projection holding the canonical camera path.
    pub camera_path_projection: Option<Projection>,
    /// Global time covered by the camera path.
    pub camera_path_range: Option<TimeRange>,
    /// Anchors along the path, ordered by time.
    pub narrative_moments: Vec<NarrativeMoment>,
    /// Presentation options.
    pub ui: UiOptions,
}

/// Resolve a raw story value. Fails only when the payload is not an object.
#[tracing::instrument(skip_all)]
pub fn resolve_story_data(input: &Value, opts: &PathOptions) -> StorycamResult<ResolvedStory> {
    let document = parse_story_value(input)?;
    Ok(resolve_document(document, opts))
}

/// Resolve story JSON text.
pub fn resolve_story_json(text: &str, opts: &PathOptions) -> StorycamResult<ResolvedStory> {
    let document = parse_story_json(text)?;
    Ok(resolve_document(document, opts))
}

/// Load `id` from `repository` and resolve it.
pub fn resolve_story_from(
    repository: &dyn StoryRepository,
    id: &str,
    opts: &PathOptions,
) -> StorycamResult<ResolvedStory> {
    let document = repository.load(id)?;
    Ok(resolve_document(document, opts))
}

/// Options given by the caller win over those stored in the document.
pub fn effective_path_options(document: &StoryDocument, opts: &PathOptions) -> PathOptions {
    PathOptions {
        camera_path_id: opts
            .camera_path_id
            .clone()
            .or_else(|| document.camera_path_id.clone()),
        focused_projection_id: opts.focused_projection_id.clone(),
        max_timeline_time: if opts.max_timeline_time > 0.0 {
            opts.max_timeline_time
        } else {
            document.max_timeline_time
        },
    }
}

/// Derive the camera path, narrative moments and tracks of an already loaded document.
pub fn resolve_document(document: StoryDocument, opts: &PathOptions) -> ResolvedStory {
    let opts = effective_path_options(&document, opts);
    let path = derive_path(&document.projections, &opts);
    let narrative_moments = path
        .as_ref()
        .map(|path| derive_narrative_moments(path, &document.projections, &document.narrative))
        .unwrap_or_default();
    let camera_tracks = camera_tracks(&document.projections);
    tracing::debug!(
        projections = document.projections.len(),
        tracks = camera_tracks.len(),
        moments = narrative_moments.len(),
        has_path = path.is_some(),
        "story resolved"
    );

    let (camera_path_projection, camera_path_range) = match path {
        Some(path) => (Some(path.projection), Some(path.range)),
        None => (None, None),
    };
    ResolvedStory {
        scene_src: document.scene_src,
        max_timeline_time: document.max_timeline_time,
        projections: document.projections,
        camera_tracks,
        camera_path_projection,
        camera_path_range,
        narrative_moments,
        ui: document.ui,
    }
}

/// Camera-selectable projections ordered by start time, then authoring order.
pub fn camera_tracks(projections: &[Projection]) -> Vec<CameraTrack> {
    let mut selectable: Vec<(usize, &Projection)> = projections
        .iter()
        .enumerate()
        .filter(|(_, p)| p.camera_selectable)
        .collect();
    selectable.sort_by(|(ia, a), (ib, b)| {
        a.start_time.total_cmp(&b.start_time).then(ia.cmp(ib))
    });
    selectable
        .into_iter()
        .map(|(_, p)| CameraTrack {
            id: p.id.clone(),
            label: p
                .context
                .as_ref()
                .and_then(|c| c.title.clone())
                .unwrap_or_else(|| p.id.clone()),
            projection_type: p.projection_type,
            start_time: p.start_time,
            keyframe_count: p.keyframes.len(),
            posed: p.first_posed().is_some(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/story/resolve.rs"]
mod tests;
