//! storycam drives a 3D viewer's camera through an authored story.
//!
//! A story is a set of projections (candidate viewpoints), each with timed keyframes. The crate:
//!
//! - resolves keyframes at any time ([`resolve`])
//! - derives one canonical camera path and its narrative anchors ([`resolve_story_data`])
//! - moves a [`Camera`] between viewpoints with distance-aware, cancellable transitions
//!   ([`CameraBridge`], [`Transition`])
//! - keeps per-projection runtime state and notifies observers ([`ProjectionState`])
//!
//! Everything is single-threaded and tick-driven: the host calls `tick` once per frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod camera;
pub(crate) mod keyframe;
pub(crate) mod path;
pub(crate) mod projection;
pub(crate) mod story;
pub(crate) mod transition;

pub use crate::foundation::core::{
    DMat4, DQuat, DVec3, Pose, Rect, Size, TimeRange, UP, euler_to_quat, look_at_quat,
};
pub use crate::foundation::error::{StorycamError, StorycamResult};
pub use crate::foundation::math::wrap_angle;
pub use crate::foundation::parse::parse_vec3;

pub use crate::animation::ease::Ease;
pub use crate::animation::lerp::Lerp;

pub use crate::keyframe::model::{
    DEFAULT_FAR, DEFAULT_FOV_DEG, KEYFRAME_TIME_EPSILON, Keyframe, NarrativeContext,
    normalize_keyframe_times,
};
pub use crate::keyframe::resolve::{Interpolated, resolve};

pub use crate::story::load::{parse_story_json, parse_story_value};
pub use crate::story::model::{
    AuthoredMoment, Projection, ProjectionType, StoryDocument, UiOptions, default_bounds,
};
pub use crate::story::repository::{FsStoryRepository, InMemoryStoryRepository, StoryRepository};
pub use crate::story::resolve::{
    CameraTrack, ResolvedStory, camera_tracks, effective_path_options, resolve_document,
    resolve_story_data, resolve_story_from, resolve_story_json,
};

pub use crate::path::narrative::{
    MomentSource, NARRATIVE_TIME_EPSILON, NarrativeMoment, ROTATION_DISTANCE_WEIGHT,
    derive_narrative_moments, pose_distance,
};
pub use crate::path::select::{PathOptions, SelectionReason, select_path_source};
pub use crate::path::synth::{
    CAMERA_PATH_ID, CameraPath, PathKind, derive_camera_path_range, derive_path,
};

pub use crate::transition::curve::{Curve, STRAIGHT_MAX_DISTANCE, build_curve};
pub use crate::transition::plan::{
    MAX_ARC_HEIGHT, MAX_DURATION_MS, MIN_DURATION_MS, TransitionProfile, plan,
};
pub use crate::transition::run::{
    CancelToken, Transition, TransitionGate, TransitionParams, TransitionState,
};

pub use crate::camera::bridge::{
    CameraBridge, DEFAULT_ORBIT_DISTANCE, OverviewRequest, TransitionHandle, TransitionOpts,
};
pub use crate::camera::model::{Camera, CameraPose, CameraProjection};
pub use crate::camera::rig::{OrbitController, OrbitRig, PoseProvider};

pub use crate::projection::observer::{Observers, SubscriptionId};
pub use crate::projection::screen::{ScreenPlane, screen_plane};
pub use crate::projection::state::{
    MaterialState, PROJECTION_NEAR, ProjectionEvent, ProjectionState, ProjectionStates,
    ProjectionVisual,
};
