use super::*;

fn at(time: f64) -> Keyframe {
    Keyframe {
        time,
        ..Keyframe::default()
    }
}

#[test]
fn ties_are_nudged_in_authoring_order() {
    let mut kfs = vec![at(5.0), at(1.0), at(1.0), at(1.0)];
    kfs[1].fov = 10.0;
    kfs[2].fov = 20.0;
    kfs[3].fov = 30.0;
    normalize_keyframe_times(&mut kfs);

    let fovs: Vec<f64> = kfs.iter().map(|k| k.fov).collect();
    assert_eq!(fovs, vec![10.0, 20.0, 30.0, DEFAULT_FOV_DEG]);
    assert!(kfs.windows(2).all(|w| w[0].time < w[1].time));
    assert_eq!(kfs[1].time, 1.0 + KEYFRAME_TIME_EPSILON);
}

#[test]
fn posed_requires_position_and_rotation() {
    let mut k = at(0.0);
    assert!(!k.is_posed());
    k.position = Some(DVec3::ONE);
    assert!(!k.is_posed());
    assert!(k.pose().is_none());
    k.rotation = Some(DVec3::ZERO);
    assert!(k.is_posed());
    assert_eq!(k.pose().unwrap().position, DVec3::ONE);
}

#[test]
fn lerp_holds_non_numeric_fields() {
    let mut a = at(0.0);
    a.screen = false;
    a.layers.insert("terrain".to_owned());
    let mut b = at(10.0);
    b.opacity = 0.0;
    b.layers.insert("labels".to_owned());

    let mid = <Keyframe as Lerp>::lerp(&a, &b, 0.5);
    assert_eq!(mid.opacity, 0.5);
    assert!(!mid.screen);
    assert_eq!(mid.layers, a.layers);
}

#[test]
fn empty_context_does_not_count() {
    let mut k = at(0.0);
    k.context = Some(NarrativeContext::default());
    assert!(!k.has_context());
    k.context = Some(NarrativeContext {
        title: Some("Harbor".to_owned()),
        markdown: None,
    });
    assert!(k.has_context());
}
