use super::*;
use crate::foundation::core::DVec3;
use serde_json::json;

#[test]
fn non_object_payloads_are_hard_errors() {
    assert!(matches!(
        parse_story_json("not json"),
        Err(StorycamError::Parse(_))
    ));
    assert!(matches!(
        parse_story_value(&json!([1, 2])),
        Err(StorycamError::Parse(_))
    ));
}

#[test]
fn empty_object_loads_with_defaults() {
    let story = parse_story_value(&json!({})).unwrap();
    assert!(story.projections.is_empty());
    assert_eq!(story.max_timeline_time, 0.0);
    assert_eq!(story.ui, UiOptions::default());
    assert!(story.scene_src.is_none());
}

#[test]
fn garbled_keyframe_fields_fall_back_to_defaults() {
    let story = parse_story_value(&json!({
        "projections": [{
            "id": "cam",
            "time": "2",
            "keyframes": [
                {"time": "1.5", "position": "1 2 3", "rotation": "0 0 0", "fov": "wide", "far": -4, "opacity": "x"},
                {"time": "oops", "position": "1 2", "screen": "false", "layers": "a b"}
            ]
        }]
    }))
    .unwrap();
    let p = &story.projections[0];
    assert_eq!(p.time, 2.0);
    assert_eq!(p.start_time, 2.0);
    assert_eq!(p.keyframes.len(), 2);

    // "oops" defaults to time 0 and sorts first.
    let k0 = &p.keyframes[0];
    assert_eq!(k0.time, 0.0);
    assert!(k0.position.is_none());
    assert!(!k0.screen);
    assert_eq!(k0.layers.len(), 2);

    let k1 = &p.keyframes[1];
    assert_eq!(k1.time, 1.5);
    assert_eq!(k1.position, Some(DVec3::new(1.0, 2.0, 3.0)));
    assert_eq!(k1.fov, DEFAULT_FOV_DEG);
    assert_eq!(k1.far, DEFAULT_FAR);
    assert_eq!(k1.opacity, 1.0);
}

#[test]
fn duplicate_times_are_made_unique() {
    let story = parse_story_value(&json!({
        "projections": [{"id": "a", "keyframes": [{"time": 1}, {"time": 1}, {"time": 1}]}]
    }))
    .unwrap();
    let kfs = &story.projections[0].keyframes;
    assert!(kfs.windows(2).all(|w| w[0].time < w[1].time));
}

#[test]
fn projection_ids_are_defaulted_and_deduplicated() {
    let story = parse_story_value(&json!({
        "projections": [{"id": "a"}, {}, {"id": "a"}, "junk"]
    }))
    .unwrap();
    let ids: Vec<&str> = story.projections.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "projection-1", "a-2"]);
    assert_eq!(story.projections[1].index, 1);
}

#[test]
fn projection_flags_and_types_parse() {
    let story = parse_story_value(&json!({
        "sceneSrc": "scene.glb",
        "maxTimelineTime": "30",
        "cameraPathId": "path",
        "projections": [
            {"id": "m", "projectionType": "orthographic-map", "cameraSelectable": "false", "bounds": "-5 5 4 -4"},
            {"id": "path", "projectionType": "perspective", "cameraPath": "", "focus": true, "startTime": 3}
        ],
        "ui": {"title": "Harbor", "overviewMode": "false", "playbackRate": "-1"}
    }))
    .unwrap();
    assert_eq!(story.scene_src.as_deref(), Some("scene.glb"));
    assert_eq!(story.max_timeline_time, 30.0);
    assert_eq!(story.camera_path_id.as_deref(), Some("path"));

    let m = story.projection("m").unwrap();
    assert!(m.projection_type.is_map());
    assert!(!m.camera_selectable);
    assert_eq!((m.bounds.x0, m.bounds.x1), (-5.0, 5.0));

    let path = story.projection("path").unwrap();
    assert!(path.camera_path);
    assert!(path.focus);
    assert_eq!(path.start_time, 3.0);

    assert_eq!(story.ui.title.as_deref(), Some("Harbor"));
    assert!(!story.ui.overview_mode);
    assert_eq!(story.ui.playback_rate, 1.0);
}

#[test]
fn max_timeline_time_defaults_to_latest_keyframe() {
    let story = parse_story_value(&json!({
        "projections": [
            {"id": "a", "time": 4, "keyframes": [{"time": 0}, {"time": 6}]},
            {"id": "b", "time": 1, "keyframes": [{"time": 2}]}
        ]
    }))
    .unwrap();
    assert_eq!(story.max_timeline_time, 10.0);
}

#[test]
fn contexts_and_moments_parse() {
    let story = parse_story_value(&json!({
        "projections": [{"id": "a", "context": "Just *markdown*"}],
        "narrative": [
            {"id": "m1", "time": "3", "context": {"title": "Dock"}},
            {"progress": 2},
            7
        ]
    }))
    .unwrap();
    let ctx = story.projections[0].context.as_ref().unwrap();
    assert_eq!(ctx.markdown.as_deref(), Some("Just *markdown*"));
    assert_eq!(story.narrative.len(), 2);
    assert_eq!(story.narrative[0].time, Some(3.0));
    assert_eq!(story.narrative[0].context.title.as_deref(), Some("Dock"));
    assert_eq!(story.narrative[1].progress, Some(1.0));
    assert!(story.narrative[1].context.is_empty());
}
