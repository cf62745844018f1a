//! Momentum continuation driven by animation frames.
//!
//! The host calls [`MomentumAnimation::on_frame`] from its frame callback.
//! Cancelling only stops further frames from producing motion, so it is
//! safe to call at any time, including when nothing is running.

use crate::decay_spec::{DecaySpec, ExponentialDecaySpec};
use gestura_core::Millis;
use gestura_geometry::Point;

/// Release speed, in pixels per second, below which no momentum starts.
pub const MIN_MOMENTUM_SPEED: f32 = 50.0;

/// Motion produced by one animation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumFrame {
    /// Movement since the previous frame.
    pub delta: Point,
    /// Movement since the release.
    pub offset: Point,
    /// Pixels per millisecond.
    pub velocity: Point,
    /// No further frames follow.
    pub finished: bool,
}

#[derive(Clone, Copy, Debug)]
struct MomentumState {
    start: Millis,
    direction: Point,
    /// Release speed in pixels per second.
    speed: f32,
    duration: Millis,
    last_value: f32,
}

#[derive(Clone, Debug)]
pub struct MomentumAnimation<S = ExponentialDecaySpec> {
    spec: S,
    state: Option<MomentumState>,
}

impl Default for MomentumAnimation {
    fn default() -> Self {
        Self::new(ExponentialDecaySpec::default())
    }
}

impl<S: DecaySpec> MomentumAnimation<S> {
    pub fn new(spec: S) -> Self {
        Self { spec, state: None }
    }

    pub fn spec(&self) -> &S {
        &self.spec
    }

    /// Starts coasting from a release `velocity` given in pixels per
    /// millisecond. Any running continuation is replaced. Returns `false`
    /// when the release is too slow to coast.
    pub fn start(&mut self, now: Millis, velocity: Point) -> bool {
        self.cancel();
        let length = velocity.length();
        let speed = length * 1000.0;
        if !speed.is_finite()
            || speed < MIN_MOMENTUM_SPEED.max(self.spec.abs_velocity_threshold())
        {
            return false;
        }
        let duration = self.spec.duration(0.0, speed);
        log::trace!("momentum started at {speed:.0}px/s for {duration}ms");
        self.state = Some(MomentumState {
            start: now,
            direction: velocity / length,
            speed,
            duration,
            last_value: 0.0,
        });
        true
    }

    /// Advances to `now`. Returns `None` when nothing is running.
    pub fn on_frame(&mut self, now: Millis) -> Option<MomentumFrame> {
        let state = self.state.as_mut()?;
        let play_time = now.saturating_sub(state.start);
        let value = self.spec.value_at(play_time, 0.0, state.speed);
        let velocity = self.spec.velocity_at(play_time, 0.0, state.speed);
        let delta = value - state.last_value;
        state.last_value = value;

        let finished = play_time >= state.duration
            || velocity.abs() < self.spec.abs_velocity_threshold();
        let frame = MomentumFrame {
            delta: state.direction * delta,
            offset: state.direction * value,
            velocity: state.direction * (velocity / 1000.0),
            finished,
        };
        if finished {
            log::trace!("momentum settled after {play_time}ms");
            self.state = None;
        }
        Some(frame)
    }

    /// Stops the continuation. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        self.state.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(test)]
#[path = "tests/momentum_tests.rs"]
mod tests;
