use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::foundation::error::{StorycamError, StorycamResult};
use crate::foundation::parse;
use crate::keyframe::model::{
    DEFAULT_FAR, DEFAULT_FOV_DEG, Keyframe, NarrativeContext, normalize_keyframe_times,
};
use crate::story::model::{
    AuthoredMoment, Projection, ProjectionType, StoryDocument, UiOptions, default_bounds,
};

/// Parse a story document from JSON text.
pub fn parse_story_json(text: &str) -> StorycamResult<StoryDocument> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| StorycamError::parse(format!("story payload is not valid JSON: {e}")))?;
    parse_story_value(&value)
}

/// Build a typed story from a raw JSON value.
///
/// Only a non-object payload is an error. Every field inside is read tolerantly and falls back
/// to its default, and projections/keyframes are normalized here so nothing downstream has to
/// re-check them.
pub fn parse_story_value(value: &Value) -> StorycamResult<StoryDocument> {
    let Value::Object(root) = value else {
        return Err(StorycamError::parse("story payload must be a JSON object"));
    };

    let mut projections = Vec::new();
    let mut seen = HashSet::new();
    if let Some(Value::Array(items)) = root.get("projections") {
        for (index, item) in items.iter().enumerate() {
            let Value::Object(obj) = item else {
                tracing::debug!(index, "skipping non-object projection record");
                continue;
            };
            let mut projection = projection_from_map(obj, index);
            if !seen.insert(projection.id.clone()) {
                projection.id = format!("{}-{index}", projection.id);
                seen.insert(projection.id.clone());
            }
            projections.push(projection);
        }
    }

    let max_timeline_time = parse::f64_opt(root.get("maxTimelineTime"))
        .filter(|t| *t >= 0.0)
        .unwrap_or_else(|| {
            projections
                .iter()
                .map(Projection::end_time)
                .fold(0.0, f64::max)
        });

    let narrative = ["narrative", "narrativeMoments", "moments"]
        .iter()
        .find_map(|key| match root.get(*key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        })
        .map(|items| items.iter().filter_map(moment_from_value).collect())
        .unwrap_or_default();

    Ok(StoryDocument {
        scene_src: parse::string_opt(root.get("sceneSrc")),
        max_timeline_time,
        projections,
        camera_path_id: parse::string_opt(root.get("cameraPathId")),
        narrative,
        ui: ui_from_value(root.get("ui")),
    })
}

pub(crate) fn projection_from_map(obj: &Map<String, Value>, index: usize) -> Projection {
    let id = parse::string_opt(obj.get("id")).unwrap_or_else(|| format!("projection-{index}"));
    let time = parse::f64_or(obj.get("time"), 0.0);

    let mut keyframes: Vec<Keyframe> = match obj.get("keyframes") {
        Some(Value::Array(items)) => items.iter().filter_map(keyframe_from_value).collect(),
        _ => Vec::new(),
    };
    normalize_keyframe_times(&mut keyframes);

    Projection {
        src: parse::string_opt(obj.get("src")),
        projection_type: obj
            .get("projectionType")
            .or_else(|| obj.get("type"))
            .and_then(Value::as_str)
            .map(ProjectionType::parse)
            .unwrap_or_default(),
        time,
        start_time: parse::f64_or(obj.get("startTime"), time),
        camera_selectable: parse::bool_or(obj.get("cameraSelectable"), true),
        camera_path: parse::bool_or(obj.get("cameraPath"), false),
        focus: parse::bool_or(obj.get("focus"), false),
        bounds: parse::bounds_opt(obj.get("bounds")).unwrap_or_else(default_bounds),
        index: parse::f64_opt(obj.get("index"))
            .filter(|i| *i >= 0.0)
            .map_or(index, |i| i as usize),
        keyframes,
        context: context_from_value(obj.get("context")),
        ..Projection::new(id, index)
    }
}

pub(crate) fn keyframe_from_value(value: &Value) -> Option<Keyframe> {
    let Value::Object(obj) = value else {
        return None;
    };
    Some(Keyframe {
        time: parse::f64_or(obj.get("time"), 0.0),
        position: parse::vec3_opt(obj.get("position")),
        rotation: parse::vec3_opt(obj.get("rotation")),
        fov: parse::f64_opt(obj.get("fov"))
            .filter(|f| *f > 0.0)
            .unwrap_or(DEFAULT_FOV_DEG),
        far: parse::f64_opt(obj.get("far"))
            .filter(|f| *f > 0.0)
            .unwrap_or(DEFAULT_FAR),
        opacity: parse::f64_or(obj.get("opacity"), 1.0).clamp(0.0, 1.0),
        screen: parse::bool_or(obj.get("screen"), true),
        layers: parse::layers(obj.get("layers")),
        context: context_from_value(obj.get("context")),
    })
}

/// `{ "title": .., "markdown": .. }`, or a bare string taken as markdown.
pub(crate) fn context_from_value(value: Option<&Value>) -> Option<NarrativeContext> {
    let ctx = match value? {
        Value::String(_) => NarrativeContext {
            title: None,
            markdown: parse::string_opt(value),
        },
        Value::Object(obj) => NarrativeContext {
            title: parse::string_opt(obj.get("title")),
            markdown: parse::string_opt(obj.get("markdown")),
        },
        _ => return None,
    };
    (!ctx.is_empty()).then_some(ctx)
}

fn moment_from_value(value: &Value) -> Option<AuthoredMoment> {
    let Value::Object(obj) = value else {
        return None;
    };
    Some(AuthoredMoment {
        id: parse::string_opt(obj.get("id")),
        time: parse::f64_opt(obj.get("time")),
        progress: parse::f64_opt(obj.get("progress")).map(|p| p.clamp(0.0, 1.0)),
        context: context_from_value(obj.get("context")).unwrap_or_default(),
    })
}

fn ui_from_value(value: Option<&Value>) -> UiOptions {
    let defaults = UiOptions::default();
    let Some(Value::Object(obj)) = value else {
        return defaults;
    };
    UiOptions {
        title: parse::string_opt(obj.get("title")),
        overview_mode: parse::bool_or(obj.get("overviewMode"), defaults.overview_mode),
        show_minimap: parse::bool_or(obj.get("showMinimap"), defaults.show_minimap),
        autoplay: parse::bool_or(obj.get("autoplay"), defaults.autoplay),
        playback_rate: parse::f64_opt(obj.get("playbackRate"))
            .filter(|r| *r > 0.0)
            .unwrap_or(defaults.playback_rate),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/load.rs"]
mod tests;
