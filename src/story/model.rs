use crate::foundation::core::Rect;
use crate::keyframe::model::{Keyframe, NarrativeContext};

/// How a projection's camera maps the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectionType {
    /// Pinhole camera with a field of view.
    #[default]
    Perspective,
    /// Top-down orthographic map view.
    OrthographicMap,
    /// Orthographic camera framed by `bounds`.
    Orthographic,
}

impl ProjectionType {
    /// Unknown names fall back to perspective.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "orthographic-map" | "orthographic_map" | "map" => Self::OrthographicMap,
            "orthographic" | "ortho" => Self::Orthographic,
            _ => Self::Perspective,
        }
    }

    /// Is [`ProjectionType::OrthographicMap`].
    pub fn is_map(self) -> bool {
        matches!(self, Self::OrthographicMap)
    }
}

/// Default orthographic frustum: left -1, right 1, top 1, bottom -1.
pub fn default_bounds() -> Rect {
    Rect::new(-1.0, -1.0, 1.0, 1.0)
}

/// A named candidate viewpoint with its own timeline offset and keyframes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Unique within the story.
    pub id: String,
    /// Image or video projected from this viewpoint.
    pub src: Option<String>,
    /// Lens kind.
    pub projection_type: ProjectionType,
    /// Offset added to every keyframe time to place it on the global timeline.
    pub time: f64,
    /// When the projection becomes relevant; orders camera tracks.
    pub start_time: f64,
    /// Offered to the viewer as a camera.
    pub camera_selectable: bool,
    /// Designated as the recorded camera path.
    pub camera_path: bool,
    /// Highlighted by the viewer.
    pub focus: bool,
    /// Orthographic frustum, `x0 = left`, `x1 = right`, `y0 = bottom`, `y1 = top`.
    pub bounds: Rect,
    /// Render order. Defaults to the position in the authored list; ties in ordering use that
    /// list position, never this field.
    pub index: usize,
    /// Sorted by time with unique times.
    pub keyframes: Vec<Keyframe>,
    /// Narrative text for the whole projection.
    pub context: Option<NarrativeContext>,
}

impl Projection {
    /// An empty, camera-selectable perspective projection with default bounds.
    pub fn new(id: impl Into<String>, index: usize) -> Self {
        Self {
            id: id.into(),
            src: None,
            projection_type: ProjectionType::Perspective,
            time: 0.0,
            start_time: 0.0,
            camera_selectable: true,
            camera_path: false,
            focus: false,
            bounds: default_bounds(),
            index,
            keyframes: Vec::new(),
            context: None,
        }
    }

    /// Keyframes with both position and rotation, in time order.
    pub fn posed_keyframes(&self) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.iter().filter(|k| k.is_posed())
    }

    /// Number of [posed keyframes](Projection::posed_keyframes).
    pub fn posed_count(&self) -> usize {
        self.posed_keyframes().count()
    }

    /// Earliest posed keyframe.
    pub fn first_posed(&self) -> Option<&Keyframe> {
        self.posed_keyframes().next()
    }

    /// Is [`ProjectionType::Perspective`].
    pub fn is_perspective(&self) -> bool {
        self.projection_type == ProjectionType::Perspective
    }

    /// Global time of the last keyframe, or the offset when there are none.
    pub fn end_time(&self) -> f64 {
        self.keyframes
            .last()
            .map_or(self.time, |k| self.time + k.time)
    }

    /// Carries non-empty narrative context.
    pub fn has_context(&self) -> bool {
        self.context.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Narrative moment as authored; missing fields are filled in during resolution.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuthoredMoment {
    /// Generated as `moment-<i>` when missing.
    pub id: Option<String>,
    /// Global time; derived from `progress` when missing.
    pub time: Option<f64>,
    /// Position along the path; spread evenly by index when missing.
    pub progress: Option<f64>,
    /// Narrative text.
    pub context: NarrativeContext,
}

/// Viewer presentation options carried by the story.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiOptions {
    /// Story title.
    pub title: Option<String>,
    /// Open on the overview camera instead of a projection.
    pub overview_mode: bool,
    /// Show the map inset.
    pub show_minimap: bool,
    /// Start playback on load.
    pub autoplay: bool,
    /// Timeline seconds per wall-clock second.
    pub playback_rate: f64,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            title: None,
            overview_mode: true,
            show_minimap: true,
            autoplay: false,
            playback_rate: 1.0,
        }
    }
}

/// Typed story document after tolerant loading and normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct StoryDocument {
    /// Scene asset to load.
    pub scene_src: Option<String>,
    /// End of the global timeline, seconds.
    pub max_timeline_time: f64,
    /// In authoring order, ids unique.
    pub projections: Vec<Projection>,
    /// Projection the story names as its camera path.
    pub camera_path_id: Option<String>,
    /// Explicit narrative moments.
    pub narrative: Vec<AuthoredMoment>,
    /// Presentation options.
    pub ui: UiOptions,
}

impl StoryDocument {
    /// Look up a projection by id.
    pub fn projection(&self, id: &str) -> Option<&Projection> {
        self.projections.iter().find(|p| p.id == id)
    }
}
