//! Progress-driven turn animation.
//!
//! A turn interpolates from progress 0 to 1 over a fixed duration with
//! quadratic ease-out. Each tick converts the progress delta since the last
//! tick into an incremental angle and applies it to every slice of the move,
//! so the sum of all deltas is always exactly one quarter turn. Forcing a
//! turn to finish applies whatever delta remains and runs the same snap as
//! natural completion; a cube never ends a turn partway.

use std::f64::consts::FRAC_PI_2;
use std::time::{Duration, Instant};

use crate::cube::Cube;
use crate::moves::MoveDefinition;

pub(crate) const TURN_DURATION: Duration = Duration::from_millis(250);

fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TickResult {
    Running,
    Finished,
}

/// Explicit per-cube animation state. At most one turn runs per cube.
#[derive(Clone, Debug, Default)]
pub(crate) enum TurnState {
    #[default]
    Idle,
    Running(TurnAnimation),
}

/// A single in-flight turn.
#[derive(Clone, Debug)]
pub(crate) struct TurnAnimation {
    definition: MoveDefinition,
    started: Instant,
    last_progress: f64,
}

impl TurnAnimation {
    pub(crate) fn new(definition: MoveDefinition, now: Instant) -> Self {
        Self {
            definition,
            started: now,
            last_progress: 0.0,
        }
    }

    /// Advances the animation to `now`, rotating the cube by the delta since
    /// the previous tick. Returns [`TickResult::Finished`] once progress
    /// reaches 1, after snapping the lattice.
    pub(crate) fn tick(&mut self, cube: &mut Cube, now: Instant) -> TickResult {
        let elapsed = now.saturating_duration_since(self.started);
        let t = (elapsed.as_secs_f64() / TURN_DURATION.as_secs_f64()).min(1.0);
        self.apply_progress(cube, ease_out_quad(t));
        if t >= 1.0 {
            cube.finalize_turn();
            TickResult::Finished
        } else {
            TickResult::Running
        }
    }

    /// Jumps straight to the end state. Used when a new turn preempts this
    /// one; the cube ends up exactly where natural completion would leave it.
    pub(crate) fn force_finish(&mut self, cube: &mut Cube) {
        self.apply_progress(cube, 1.0);
        cube.finalize_turn();
    }

    fn apply_progress(&mut self, cube: &mut Cube, progress: f64) {
        let delta = progress - self.last_progress;
        self.last_progress = progress;
        let angle = self.definition.direction * delta * FRAC_PI_2;
        for &slice in self.definition.slices {
            cube.rotate_slice(self.definition.axis, slice, angle);
        }
    }
}
