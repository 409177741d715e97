use std::cell::Cell;
use std::rc::Rc;

use crate::animation::ease::Ease;
use crate::animation::lerp::Lerp;
use crate::camera::model::{Camera, CameraPose};
use crate::camera::rig::OrbitController;
use crate::foundation::core::{DQuat, DVec3};
use crate::transition::curve::{Curve, build_curve};
use crate::transition::plan::{TransitionProfile, plan};

/// Shared generation counter. Starting a transition bumps it, which cancels every token handed
/// out before.
#[derive(Clone, Debug, Default)]
pub struct TransitionGate {
    generation: Rc<Cell<u64>>,
}

impl TransitionGate {
    /// A gate at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped by every `begin` and `cancel_all`.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Cancel everything in flight and issue a token for the next transition.
    pub fn begin(&self) -> CancelToken {
        self.cancel_all();
        CancelToken {
            generation: Rc::clone(&self.generation),
            issued: self.generation.get(),
        }
    }

    /// Cancel every token issued so far.
    pub fn cancel_all(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

/// Cancelled once its [`TransitionGate`] moves past the generation it was issued at.
#[derive(Clone, Debug)]
pub struct CancelToken {
    generation: Rc<Cell<u64>>,
    issued: u64,
}

impl CancelToken {
    /// A token nobody else can cancel.
    pub fn detached() -> Self {
        TransitionGate::new().begin()
    }

    /// A newer transition began or the gate was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.generation.get() != self.issued
    }
}

/// Endpoints and timing of one [`Transition`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionParams {
    /// Camera pose at the start.
    pub from: CameraPose,
    /// Camera pose to arrive at.
    pub to: CameraPose,
    /// Orbit look target at the start; the target is only animated when both ends are set.
    pub orbit_from: Option<DVec3>,
    /// Orbit look target on arrival.
    pub orbit_to: Option<DVec3>,
    /// Duration before distance-aware planning.
    pub requested_duration_ms: f64,
    /// Easing of progress along the curve.
    pub ease: Ease,
}

/// Lifecycle of a [`Transition`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionState {
    /// Not ticked yet.
    Idle,
    /// Moving.
    Running {
        /// Ticked time so far.
        elapsed_ms: f64,
    },
    /// Arrived at the target pose.
    Completed,
    /// Stopped by its cancel token.
    Cancelled,
}

impl TransitionState {
    /// Completed or cancelled.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// One camera move, advanced by the host through [`Transition::tick`].
#[derive(Debug)]
pub struct Transition {
    params: TransitionParams,
    profile: TransitionProfile,
    curve: Curve,
    token: CancelToken,
    state: TransitionState,
}

impl Transition {
    /// Plan the move; nothing changes until the first tick.
    pub fn new(params: TransitionParams, token: CancelToken) -> Self {
        let profile = plan(
            params.from.position,
            params.to.position,
            params.requested_duration_ms,
        );
        let curve = build_curve(params.from.position, params.to.position, profile.arc_height);
        Self {
            params,
            profile,
            curve,
            token,
            state: TransitionState::Idle,
        }
    }

    /// Planned duration and arc.
    pub fn profile(&self) -> TransitionProfile {
        self.profile
    }

    /// Spatial path the camera follows.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// `Some(true)` once completed, `Some(false)` once cancelled.
    pub fn outcome(&self) -> Option<bool> {
        match self.state {
            TransitionState::Completed => Some(true),
            TransitionState::Cancelled => Some(false),
            TransitionState::Idle | TransitionState::Running { .. } => None,
        }
    }

    /// Advance by `delta_ms` and write the interpolated pose into `camera`.
    ///
    /// A cancelled transition writes nothing. Finished transitions ignore further ticks.
    pub fn tick(
        &mut self,
        delta_ms: f64,
        camera: &mut Camera,
        orbit: Option<&mut dyn OrbitController>,
    ) -> TransitionState {
        if self.state.is_finished() {
            return self.state;
        }
        if self.token.is_cancelled() {
            self.state = TransitionState::Cancelled;
            return self.state;
        }

        let previous = match self.state {
            TransitionState::Running { elapsed_ms } => elapsed_ms,
            _ => 0.0,
        };
        let step = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        let elapsed_ms = previous + step;
        let progress = (elapsed_ms / self.profile.effective_duration_ms).clamp(0.0, 1.0);
        let eased = self.params.ease.apply(progress);

        camera.position = self.curve.point_at(eased);
        camera.orientation =
            <DQuat as Lerp>::lerp(&self.params.from.orientation, &self.params.to.orientation, eased);
        if let (Some(a), Some(b)) = (self.params.from.fov, self.params.to.fov) {
            camera.set_fov(<f64 as Lerp>::lerp(&a, &b, eased));
        }
        if let (Some(orbit), Some(a), Some(b)) =
            (orbit, self.params.orbit_from, self.params.orbit_to)
        {
            orbit.set_target(<DVec3 as Lerp>::lerp(&a, &b, eased));
            orbit.update();
        }

        self.state = if progress >= 1.0 {
            TransitionState::Completed
        } else {
            TransitionState::Running { elapsed_ms }
        };
        self.state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/run.rs"]
mod tests;
