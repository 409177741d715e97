use std::cell::Cell;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::camera::model::Camera;
use crate::camera::rig::{OrbitController, PoseProvider};
use crate::foundation::core::{DVec3, look_at_quat};
use crate::story::model::Projection;
use crate::transition::run::{
    CancelToken, Transition, TransitionGate, TransitionParams, TransitionState,
};

/// Distance in front of a camera where the orbit target is placed when nothing better is known.
pub const DEFAULT_ORBIT_DISTANCE: f64 = 10.0;

/// Tuning shared by every transition a [`CameraBridge`] starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionOpts {
    /// Easing applied to transition progress.
    pub ease: Ease,
    /// How long a transition waits for its target pose before giving up.
    pub target_wait_timeout_ms: f64,
    /// Requested duration when the caller gives none.
    pub default_duration_ms: f64,
}

impl Default for TransitionOpts {
    fn default() -> Self {
        Self {
            ease: Ease::InOutCubic,
            target_wait_timeout_ms: 2000.0,
            default_duration_ms: 1800.0,
        }
    }
}

/// Caller's view of a requested transition.
#[derive(Clone, Debug)]
pub struct TransitionHandle {
    id: u64,
    camera_id: String,
    outcome: Rc<Cell<Option<bool>>>,
}

impl TransitionHandle {
    /// Increases with every request on the same bridge.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Projection the transition heads to.
    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }

    /// `None` while pending; `Some(true)` on arrival, `Some(false)` when superseded, cancelled
    /// or the target never appeared.
    pub fn outcome(&self) -> Option<bool> {
        self.outcome.get()
    }
}

/// Inputs to [`CameraBridge::apply_initial_overview_camera`].
pub struct OverviewRequest<'a> {
    /// Projections whose first poses frame the overview.
    pub projections: &'a [Projection],
    /// Frame the whole scene instead of one projection.
    pub overview_mode: bool,
    /// Projection to start at when not in overview mode.
    pub active_camera_id: Option<&'a str>,
}

#[derive(Debug)]
enum Phase {
    WaitingForTarget { waited_ms: f64 },
    Running(Transition),
}

#[derive(Debug)]
struct ActiveTransition {
    id: u64,
    camera_id: String,
    requested_duration_ms: f64,
    token: CancelToken,
    outcome: Rc<Cell<Option<bool>>>,
    phase: Phase,
}

/// Drives the host's rendering camera between projection viewpoints.
///
/// At most one transition is in flight; starting another supersedes it. While a transition
/// runs the orbit controller is disabled, and its previous state is restored afterwards.
#[derive(Debug, Default)]
pub struct CameraBridge {
    opts: TransitionOpts,
    gate: TransitionGate,
    active: Option<ActiveTransition>,
    next_id: u64,
    orbit_was_enabled: Option<bool>,
}

fn reborrow<'a>(
    orbit: &'a mut Option<&mut dyn OrbitController>,
) -> Option<&'a mut dyn OrbitController> {
    match orbit {
        Some(orbit) => Some(&mut **orbit as &mut dyn OrbitController),
        None => None,
    }
}

impl CameraBridge {
    /// An idle bridge.
    pub fn new(opts: TransitionOpts) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    /// Options this bridge was built with.
    pub fn opts(&self) -> TransitionOpts {
        self.opts
    }

    /// True while a transition owns the camera; per-frame pose sync must not write then.
    pub fn is_driving(&self) -> bool {
        self.active.is_some()
    }

    /// Place the camera before any transition: above the scene in overview mode, otherwise at
    /// the active projection's first pose. Returns `false` when there is nothing to look at.
    pub fn apply_initial_overview_camera(
        &mut self,
        request: OverviewRequest<'_>,
        camera: &mut Camera,
        orbit: Option<&mut dyn OrbitController>,
    ) -> bool {
        if request.overview_mode {
            let anchors: Vec<DVec3> = request
                .projections
                .iter()
                .filter_map(|p| p.first_posed().and_then(|k| k.position))
                .collect();
            if anchors.is_empty() {
                return false;
            }
            let centroid = anchors.iter().copied().sum::<DVec3>() / anchors.len() as f64;
            let radius = anchors
                .iter()
                .map(|a| a.distance(centroid))
                .fold(1.0_f64, f64::max);
            camera.position = centroid + DVec3::new(0.0, radius * 1.2 + 4.0, radius * 1.8 + 6.0);
            camera.orientation = look_at_quat(camera.position, centroid);
            if let Some(orbit) = orbit {
                orbit.set_target(centroid);
                orbit.update();
            }
            tracing::debug!(anchors = anchors.len(), radius, "overview camera applied");
            return true;
        }

        let active = request
            .active_camera_id
            .and_then(|id| request.projections.iter().find(|p| p.id == id))
            .filter(|p| p.first_posed().is_some())
            .or_else(|| {
                request
                    .projections
                    .iter()
                    .find(|p| p.camera_selectable && p.first_posed().is_some())
            });
        let Some(projection) = active else {
            return false;
        };
        let Some((keyframe, pose)) = projection
            .first_posed()
            .and_then(|k| k.pose().map(|pose| (k, pose)))
        else {
            return false;
        };
        camera.position = pose.position;
        camera.orientation = pose.orientation();
        if projection.is_perspective() {
            camera.set_fov(keyframe.fov);
        }
        if let Some(orbit) = orbit {
            orbit.set_target(camera.position + camera.forward() * DEFAULT_ORBIT_DISTANCE);
            orbit.update();
        }
        tracing::debug!(projection = %projection.id, "initial camera applied");
        true
    }

    /// Start moving towards `camera_id`. A previous transition is cancelled and its handle
    /// resolves `false`.
    pub fn transition_to_camera(
        &mut self,
        camera_id: &str,
        duration_ms: Option<f64>,
    ) -> TransitionHandle {
        self.supersede();
        let token = self.gate.begin();
        let outcome = Rc::new(Cell::new(None));
        self.next_id += 1;
        let id = self.next_id;
        self.active = Some(ActiveTransition {
            id,
            camera_id: camera_id.to_owned(),
            requested_duration_ms: duration_ms.unwrap_or(self.opts.default_duration_ms),
            token,
            outcome: Rc::clone(&outcome),
            phase: Phase::WaitingForTarget { waited_ms: 0.0 },
        });
        tracing::debug!(id, camera_id, "transition requested");
        TransitionHandle {
            id,
            camera_id: camera_id.to_owned(),
            outcome,
        }
    }

    /// Cancel the in-flight transition, if any. The camera stays where it is.
    pub fn cancel(&mut self, orbit: Option<&mut dyn OrbitController>) {
        self.gate.cancel_all();
        if let Some(active) = self.active.take() {
            active.outcome.set(Some(false));
        }
        self.release_orbit(orbit);
    }

    /// Advance the in-flight transition. Returns its outcome on the tick it settles.
    pub fn tick(
        &mut self,
        delta_ms: f64,
        poses: &dyn PoseProvider,
        camera: &mut Camera,
        mut orbit: Option<&mut dyn OrbitController>,
    ) -> Option<bool> {
        let opts = self.opts;
        let active = self.active.as_mut()?;
        let settled = if active.token.is_cancelled() {
            Some(false)
        } else if let Phase::WaitingForTarget { waited_ms } = active.phase {
            match poses.pose_of(&active.camera_id) {
                Some(target) => {
                    let orbit_from = reborrow(&mut orbit).map(|o| o.target());
                    let orbit_to = orbit_from.map(|from| {
                        let reach = from.distance(camera.position);
                        let reach = if reach > f64::EPSILON {
                            reach
                        } else {
                            DEFAULT_ORBIT_DISTANCE
                        };
                        target.position + target.orientation * DVec3::NEG_Z * reach
                    });
                    let params = TransitionParams {
                        from: camera.pose(),
                        to: target,
                        orbit_from,
                        orbit_to,
                        requested_duration_ms: active.requested_duration_ms,
                        ease: opts.ease,
                    };
                    let transition = Transition::new(params, active.token.clone());
                    tracing::debug!(
                        id = active.id,
                        duration_ms = transition.profile().effective_duration_ms,
                        straight = transition.curve().is_straight(),
                        "transition started"
                    );
                    active.phase = Phase::Running(transition);
                    None
                }
                None => {
                    let step = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
                    let waited_ms = waited_ms + step;
                    active.phase = Phase::WaitingForTarget { waited_ms };
                    if waited_ms >= opts.target_wait_timeout_ms {
                        tracing::warn!(
                            camera_id = %active.camera_id,
                            waited_ms,
                            "transition target never became available"
                        );
                        Some(false)
                    } else {
                        None
                    }
                }
            }
        } else {
            None
        };

        let settled = match settled {
            Some(done) => Some(done),
            None => self.drive(delta_ms, camera, &mut orbit),
        };
        if let Some(done) = settled {
            if let Some(active) = self.active.take() {
                active.outcome.set(Some(done));
            }
            self.release_orbit(orbit);
        }
        settled
    }

    fn drive(
        &mut self,
        delta_ms: f64,
        camera: &mut Camera,
        orbit: &mut Option<&mut dyn OrbitController>,
    ) -> Option<bool> {
        let Some(ActiveTransition {
            phase: Phase::Running(transition),
            ..
        }) = self.active.as_mut()
        else {
            return None;
        };
        // Lock before the first pose write.
        if self.orbit_was_enabled.is_none()
            && let Some(orbit) = reborrow(orbit)
        {
            self.orbit_was_enabled = Some(orbit.enabled());
            orbit.set_enabled(false);
        }
        match transition.tick(delta_ms, camera, reborrow(orbit)) {
            TransitionState::Completed => Some(true),
            TransitionState::Cancelled => Some(false),
            TransitionState::Idle | TransitionState::Running { .. } => None,
        }
    }

    fn release_orbit(&mut self, orbit: Option<&mut dyn OrbitController>) {
        if let Some(orbit) = orbit
            && let Some(enabled) = self.orbit_was_enabled.take()
        {
            orbit.set_enabled(enabled);
            orbit.update();
        }
    }

    fn supersede(&mut self) {
        if let Some(previous) = self.active.take() {
            tracing::debug!(id = previous.id, "transition superseded");
            previous.outcome.set(Some(false));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/bridge.rs"]
mod tests;
