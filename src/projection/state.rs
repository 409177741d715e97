use std::collections::BTreeSet;

use crate::camera::model::{Camera, CameraPose};
use crate::camera::rig::PoseProvider;
use crate::foundation::core::{DQuat, DVec3, Rect, euler_to_quat};
use crate::keyframe::model::{DEFAULT_FAR, DEFAULT_FOV_DEG};
use crate::keyframe::resolve::{Interpolated, resolve};
use crate::projection::observer::{Observers, SubscriptionId};
use crate::projection::screen::{ScreenPlane, screen_plane};
use crate::story::model::Projection;

/// Near clip distance of every projection camera.
pub const PROJECTION_NEAR: f64 = 0.01;

/// Visibility of one rendered material.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct MaterialState {
    /// Drawn at all.
    pub visible: bool,
    /// Blend factor, `0..=1`.
    pub opacity: f64,
}

/// Everything a renderer needs to draw one projection.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionVisual {
    /// Resolved opacity is above zero.
    pub visible: bool,
    /// Resolved opacity.
    pub opacity: f64,
    /// Whether the image quad is shown at all.
    pub screen: bool,
    /// Scene layers the image paints onto.
    pub layers: BTreeSet<String>,
    /// Image or video source currently assigned.
    pub texture: Option<String>,
    /// Placement of the image quad.
    pub screen_plane: ScreenPlane,
    /// Wireframe frustum helper.
    pub frustum_material: MaterialState,
    /// Image quad.
    pub screen_material: MaterialState,
}

/// Emitted after a setter or a tick changed the observable state.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectionEvent {
    /// Camera moved or turned.
    Pose {
        /// New camera position.
        position: DVec3,
        /// New camera orientation.
        orientation: DQuat,
    },
    /// Lens parameters changed.
    Lens {
        /// Field of view in degrees, perspective only.
        fov: Option<f64>,
        /// Far plane distance.
        far: f64,
        /// Frustum bounds, orthographic only.
        bounds: Option<Rect>,
    },
    /// Visibility or opacity changed.
    Visibility {
        /// Drawn at all.
        visible: bool,
        /// Resolved opacity.
        opacity: f64,
    },
    /// Image quad toggled or moved.
    Screen {
        /// Quad shown.
        enabled: bool,
        /// Quad placement.
        plane: ScreenPlane,
    },
    /// Image source replaced.
    Texture(Option<String>),
    /// Layer membership changed.
    Layers(BTreeSet<String>),
    /// Focus flag changed.
    Focus(bool),
    /// Render order changed.
    Index(usize),
}

#[derive(Clone, PartialEq)]
struct Observed {
    position: DVec3,
    orientation: DQuat,
    fov: Option<f64>,
    far: f64,
    bounds: Option<Rect>,
    visible: bool,
    opacity: f64,
    screen: bool,
    plane: ScreenPlane,
    texture: Option<String>,
    layers: BTreeSet<String>,
    focus: bool,
    index: usize,
}

/// Runtime state of one projection: its camera, what it resolves to on the timeline, and how
/// it is drawn.
#[derive(Debug)]
pub struct ProjectionState {
    projection: Projection,
    camera: Camera,
    visual: ProjectionVisual,
    current: Option<Interpolated>,
    has_position: bool,
    has_rotation: bool,
    observers: Observers<ProjectionEvent>,
}

impl ProjectionState {
    /// Hidden until the first tick resolves a keyframe.
    pub fn new(projection: Projection, aspect: f64) -> Self {
        let camera = if projection.is_perspective() {
            Camera::perspective(DEFAULT_FOV_DEG, aspect, PROJECTION_NEAR, DEFAULT_FAR)
        } else {
            Camera::orthographic(projection.bounds, PROJECTION_NEAR, DEFAULT_FAR)
        };
        let mut state = Self {
            projection,
            camera,
            visual: ProjectionVisual {
                screen: true,
                ..ProjectionVisual::default()
            },
            current: None,
            has_position: false,
            has_rotation: false,
            observers: Observers::default(),
        };
        state.rederive();
        state
    }

    /// Projection id.
    pub fn id(&self) -> &str {
        &self.projection.id
    }

    /// Projection as last mutated by the setters.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The projection's own camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Derived draw state.
    pub fn visual(&self) -> &ProjectionVisual {
        &self.visual
    }

    /// Keyframe resolution from the last tick; `None` while hidden.
    pub fn current(&self) -> Option<&Interpolated> {
        self.current.as_ref()
    }

    /// Current camera pose, once both a position and a rotation have been applied.
    pub fn pose(&self) -> Option<CameraPose> {
        (self.has_position && self.has_rotation).then(|| self.camera.pose())
    }

    /// Receive a [`ProjectionEvent`] for every observable change.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&ProjectionEvent) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Move the projection camera.
    pub fn set_position(&mut self, position: DVec3) {
        self.update(|s| {
            s.camera.position = position;
            s.has_position = true;
        });
    }

    /// Euler radians, intrinsic X, Y, Z.
    pub fn set_rotation(&mut self, rotation: DVec3) {
        self.update(|s| {
            s.camera.orientation = euler_to_quat(rotation);
            s.has_rotation = true;
        });
    }

    /// Ignored by orthographic projections.
    pub fn set_fov(&mut self, fov: f64) {
        self.update(|s| s.camera.set_fov(fov));
    }

    /// Far plane; also moves a perspective screen plane.
    pub fn set_far(&mut self, far: f64) {
        self.update(|s| s.camera.set_far(far));
    }

    /// Assign the projected image source.
    pub fn set_texture(&mut self, texture: Option<String>) {
        self.update(|s| s.visual.texture = texture);
    }

    /// Clamped to `0..=1`; zero hides the projection.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.update(|s| s.apply_opacity(opacity));
    }

    /// Orthographic frustum bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.update(|s| {
            s.projection.bounds = bounds;
            s.camera.set_bounds(bounds);
        });
    }

    /// Mark the projection as focused.
    pub fn set_focus(&mut self, focus: bool) {
        self.update(|s| s.projection.focus = focus);
    }

    /// Show or hide the image quad.
    pub fn set_screen(&mut self, screen: bool) {
        self.update(|s| s.visual.screen = screen);
    }

    /// Replace layer membership.
    pub fn set_layers(&mut self, layers: BTreeSet<String>) {
        self.update(|s| s.visual.layers = layers);
    }

    /// Change render order.
    pub fn set_index(&mut self, index: usize) {
        self.update(|s| s.projection.index = index);
    }

    /// Re-evaluate at global time `time`.
    ///
    /// Before the projection's offset, or without keyframes, the projection is hidden. Map
    /// projections keep their lens; everything else takes `fov` and `far` from the keyframes.
    pub fn tick(&mut self, time: f64) {
        self.update(|s| {
            let offset = s.projection.time;
            let resolved = if time >= offset {
                resolve(&s.projection.keyframes, time - offset)
            } else {
                None
            };
            let Some(resolved) = resolved else {
                s.current = None;
                s.visual.visible = false;
                s.visual.opacity = 0.0;
                return;
            };

            let attrs = &resolved.attributes;
            if let Some(position) = attrs.position {
                s.camera.position = position;
                s.has_position = true;
            }
            if let Some(rotation) = attrs.rotation {
                s.camera.orientation = euler_to_quat(rotation);
                s.has_rotation = true;
            }
            if !s.projection.projection_type.is_map() {
                s.camera.set_fov(attrs.fov);
                s.camera.set_far(attrs.far);
            }
            s.apply_opacity(attrs.opacity);
            s.visual.screen = attrs.screen;
            s.visual.layers = attrs.layers.clone();
            s.current = Some(resolved);
        });
    }

    fn apply_opacity(&mut self, opacity: f64) {
        let opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.visual.opacity = opacity;
        self.visual.visible = opacity > 0.0;
    }

    fn update(&mut self, mutate: impl FnOnce(&mut Self)) {
        let before = self.observed();
        mutate(self);
        self.rederive();
        self.emit_changes(&before);
    }

    fn rederive(&mut self) {
        let visual = &mut self.visual;
        visual.screen_plane = screen_plane(&self.camera, self.projection.projection_type);
        visual.frustum_material = MaterialState {
            visible: visual.visible,
            opacity: visual.opacity,
        };
        visual.screen_material = MaterialState {
            visible: visual.visible && visual.screen,
            opacity: visual.opacity,
        };
    }

    fn observed(&self) -> Observed {
        Observed {
            position: self.camera.position,
            orientation: self.camera.orientation,
            fov: self.camera.fov(),
            far: self.camera.far(),
            bounds: self.camera.bounds(),
            visible: self.visual.visible,
            opacity: self.visual.opacity,
            screen: self.visual.screen,
            plane: self.visual.screen_plane,
            texture: self.visual.texture.clone(),
            layers: self.visual.layers.clone(),
            focus: self.projection.focus,
            index: self.projection.index,
        }
    }

    fn emit_changes(&mut self, before: &Observed) {
        if self.observers.is_empty() {
            return;
        }
        let now = self.observed();
        if now == *before {
            return;
        }
        let mut events = Vec::new();
        if (now.position, now.orientation) != (before.position, before.orientation) {
            events.push(ProjectionEvent::Pose {
                position: now.position,
                orientation: now.orientation,
            });
        }
        if (now.fov, now.far, now.bounds) != (before.fov, before.far, before.bounds) {
            events.push(ProjectionEvent::Lens {
                fov: now.fov,
                far: now.far,
                bounds: now.bounds,
            });
        }
        if (now.visible, now.opacity) != (before.visible, before.opacity) {
            events.push(ProjectionEvent::Visibility {
                visible: now.visible,
                opacity: now.opacity,
            });
        }
        if (now.screen, now.plane) != (before.screen, before.plane) {
            events.push(ProjectionEvent::Screen {
                enabled: now.screen,
                plane: now.plane,
            });
        }
        if now.texture != before.texture {
            events.push(ProjectionEvent::Texture(now.texture));
        }
        if now.layers != before.layers {
            events.push(ProjectionEvent::Layers(now.layers));
        }
        if now.focus != before.focus {
            events.push(ProjectionEvent::Focus(now.focus));
        }
        if now.index != before.index {
            events.push(ProjectionEvent::Index(now.index));
        }
        for event in &events {
            self.observers.notify(event);
        }
    }
}

/// All projection states of a story, in authoring order.
#[derive(Debug, Default)]
pub struct ProjectionStates {
    states: Vec<ProjectionState>,
}

impl ProjectionStates {
    /// One hidden state per projection.
    pub fn new(projections: &[Projection], aspect: f64) -> Self {
        Self {
            states: projections
                .iter()
                .map(|p| ProjectionState::new(p.clone(), aspect))
                .collect(),
        }
    }

    /// State of projection `id`.
    pub fn get(&self, id: &str) -> Option<&ProjectionState> {
        self.states.iter().find(|s| s.id() == id)
    }

    /// Mutable state of projection `id`.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ProjectionState> {
        self.states.iter_mut().find(|s| s.id() == id)
    }

    /// States in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectionState> {
        self.states.iter()
    }

    /// Number of projections.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// No projections.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Tick every projection at global time `time`.
    pub fn tick(&mut self, time: f64) {
        for state in &mut self.states {
            state.tick(time);
        }
    }
}

impl PoseProvider for ProjectionStates {
    fn pose_of(&self, projection_id: &str) -> Option<CameraPose> {
        self.get(projection_id).and_then(ProjectionState::pose)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/state.rs"]
mod tests;
