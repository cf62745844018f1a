//! Decay specifications.
//!
//! A decay has no target. It starts with a velocity and slows down until the
//! velocity drops under a threshold; where it stops follows from the initial
//! velocity. Velocities are in units per second, play time in milliseconds.

use gestura_core::Millis;

/// Friction scale shared by the exponential decay family.
const FRICTION: f32 = -4.2;

pub trait DecaySpec {
    /// Velocity magnitude under which the decay counts as settled.
    fn abs_velocity_threshold(&self) -> f32;

    fn value_at(&self, play_time: Millis, initial_value: f32, initial_velocity: f32) -> f32;

    fn velocity_at(&self, play_time: Millis, initial_value: f32, initial_velocity: f32) -> f32;

    fn duration(&self, initial_value: f32, initial_velocity: f32) -> Millis;

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Velocity decays as `v0 * e^(friction * t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialDecaySpec {
    /// Per-second friction, always negative.
    friction: f32,
    abs_velocity_threshold: f32,
}

impl ExponentialDecaySpec {
    /// Stops at 10 units per second.
    pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 10.0;

    /// `friction_multiplier` scales how quickly motion dies out; 1.0 is the
    /// standard feel.
    pub fn new(friction_multiplier: f32, abs_velocity_threshold: f32) -> Self {
        Self {
            friction: FRICTION * friction_multiplier.max(f32::EPSILON),
            abs_velocity_threshold: abs_velocity_threshold.max(f32::EPSILON),
        }
    }

    /// Equivalent of multiplying the velocity by `1 - damping` once per
    /// frame at `frame_rate` frames per second.
    pub fn from_frame_damping(damping: f32, frame_rate: f32) -> Self {
        let retained = (1.0 - damping).clamp(f32::EPSILON, 1.0 - f32::EPSILON);
        Self {
            friction: retained.ln() * frame_rate.max(1.0),
            abs_velocity_threshold: Self::DEFAULT_VELOCITY_THRESHOLD,
        }
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }
}

impl Default for ExponentialDecaySpec {
    /// 5% damping per frame at 60 fps.
    fn default() -> Self {
        Self::from_frame_damping(0.05, 60.0)
    }
}

impl DecaySpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.abs_velocity_threshold
    }

    fn value_at(&self, play_time: Millis, initial_value: f32, initial_velocity: f32) -> f32 {
        let t = play_time.min(self.duration(initial_value, initial_velocity)) as f32 / 1000.0;
        initial_value - initial_velocity / self.friction
            + initial_velocity / self.friction * (self.friction * t).exp()
    }

    fn velocity_at(&self, play_time: Millis, initial_value: f32, initial_velocity: f32) -> f32 {
        let t = play_time.min(self.duration(initial_value, initial_velocity)) as f32 / 1000.0;
        initial_velocity * (self.friction * t).exp()
    }

    fn duration(&self, _initial_value: f32, initial_velocity: f32) -> Millis {
        let speed = initial_velocity.abs();
        if speed <= self.abs_velocity_threshold {
            return 0;
        }
        (1000.0 * (self.abs_velocity_threshold / speed).ln() / self.friction).ceil() as Millis
    }

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value - initial_velocity / self.friction
    }
}
