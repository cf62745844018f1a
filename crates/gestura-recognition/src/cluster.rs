//! Per-cluster state machine.
//!
//! A cluster starts out tentative and accumulates kinematics. The first
//! continuous threshold it crosses commits it, and from then on every sample
//! re-emits that gesture until the cluster ends. A committed cluster is never
//! reclassified; arity changes are handled by the engine, which replaces the
//! cluster instead.

use crate::criteria::ClusterSummary;
use gestura_core::Millis;
use gestura_foundation::{ClusterKey, GestureConfig, GestureData, GestureState, Tilt, Touches};
use gestura_geometry::{normalize_degrees, Point};
use smallvec::SmallVec;

/// Where a cluster stands in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClusterPhase {
    Tentative,
    Pan,
    /// Two-contact pinch/rotate, committed on the first emitted change.
    Transform,
    MultiSwipe,
    PressureHold,
}

impl ClusterPhase {
    pub fn is_committed(self) -> bool {
        self != ClusterPhase::Tentative
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One input frame reduced to what the state machine consumes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ClusterSample {
    pub timestamp: Millis,
    pub position: Point,
    /// Already mapped through the pressure curve.
    pub pressure: f32,
    /// First two contacts of a touch cluster.
    pub pair: Option<(Point, Point)>,
    pub tilt: Tilt,
    /// The frame lifts contacts. It updates position but never emits.
    pub lifting: bool,
}

#[derive(Clone, Copy, Debug)]
struct TransformTrack {
    start_distance: f32,
    start_angle: f32,
    last_scale: f32,
    last_scale_time: Millis,
    last_rotation: f32,
    last_rotation_time: Millis,
}

impl TransformTrack {
    fn new(a: Point, b: Point, timestamp: Millis) -> Self {
        Self {
            start_distance: a.distance_to(b).max(1.0),
            start_angle: a.angle_to(b),
            last_scale: 1.0,
            last_scale_time: timestamp,
            last_rotation: 0.0,
            last_rotation_time: timestamp,
        }
    }
}

pub(crate) type Emitted = SmallVec<[GestureData; 2]>;

#[derive(Clone, Debug)]
pub(crate) struct Cluster {
    pub key: ClusterKey,
    pub state: GestureState,
    pub phase: ClusterPhase,
    pub origin: Point,
    pub position: Point,
    pub max_travel: f32,
    pub peak_pressure: f32,
    lock: Option<Axis>,
    transform: Option<TransformTrack>,
    last_pressure: f32,
    tilt: Tilt,
}

impl Cluster {
    pub fn begin(key: ClusterKey, sample: &ClusterSample) -> Self {
        let transform = match (key, sample.pair) {
            (ClusterKey::TwoFinger, Some((a, b))) => {
                Some(TransformTrack::new(a, b, sample.timestamp))
            }
            _ => None,
        };
        Self {
            key,
            state: GestureState::begin(sample.timestamp, sample.pressure),
            phase: ClusterPhase::Tentative,
            origin: sample.position,
            position: sample.position,
            max_travel: 0.0,
            peak_pressure: sample.pressure,
            lock: None,
            transform,
            last_pressure: sample.pressure,
            tilt: sample.tilt,
        }
    }

    /// Folds `sample` into the cluster and returns the continuous gestures
    /// it produced.
    pub fn advance(
        &mut self,
        sample: &ClusterSample,
        touches: &Touches,
        config: &GestureConfig,
    ) -> Emitted {
        let displacement = sample.position - self.position;
        let motion = if sample.lifting && displacement == Point::ZERO {
            None
        } else {
            Some(displacement)
        };
        self.state
            .record_sample(sample.timestamp, motion, sample.pressure);
        self.position = sample.position;
        self.max_travel = self
            .max_travel
            .max(self.origin.distance_to(sample.position));
        self.peak_pressure = self.peak_pressure.max(sample.pressure);
        self.tilt = sample.tilt;

        let mut emitted = Emitted::new();
        if sample.lifting {
            return emitted;
        }
        match self.key {
            ClusterKey::Single(_) | ClusterKey::Mouse | ClusterKey::Stylus(_) => {
                self.advance_pointer(sample, touches, config, &mut emitted);
            }
            ClusterKey::TwoFinger => self.advance_transform(sample, touches, config, &mut emitted),
            ClusterKey::Multi(count) => {
                if self.phase == ClusterPhase::Tentative
                    && self.state.duration > config.multi_touch.settle_time
                {
                    log::trace!("{} settled after {}ms", self.key, self.state.duration);
                    self.phase = ClusterPhase::MultiSwipe;
                }
                if self.phase == ClusterPhase::MultiSwipe {
                    emitted.push(GestureData::MultiFingerSwipe {
                        center: self.position,
                        translation: self.position - self.origin,
                        velocity: self.state.velocity,
                        touches: touches.clone(),
                        touch_count: count as usize,
                    });
                }
            }
            ClusterKey::WheelZoom => {}
        }
        emitted
    }

    fn advance_pointer(
        &mut self,
        sample: &ClusterSample,
        touches: &Touches,
        config: &GestureConfig,
        emitted: &mut Emitted,
    ) {
        if self.phase == ClusterPhase::Tentative {
            // A fast flick inside tap tolerance is still a tap.
            let past_slop = self.max_travel > config.tap.max_movement;
            if self.max_travel > config.pan.min_distance
                || (past_slop && self.state.speed() > config.pan.min_velocity)
            {
                self.phase = ClusterPhase::Pan;
                if config.pan.directional_lock {
                    let offset = self.position - self.origin;
                    self.lock = Some(if offset.x.abs() >= offset.y.abs() {
                        Axis::Horizontal
                    } else {
                        Axis::Vertical
                    });
                }
                log::trace!("{} committed to pan", self.key);
            } else if matches!(self.key, ClusterKey::Stylus(_))
                && config.pressure.enabled
                && sample.pressure >= config.long_press.activation_pressure
                && self.max_travel <= config.tap.max_movement
            {
                self.phase = ClusterPhase::PressureHold;
                log::trace!("{} committed to pressure hold", self.key);
            }
        }

        match self.phase {
            ClusterPhase::Pan => emitted.push(GestureData::Pan {
                center: self.position,
                translation: self.locked(self.position - self.origin),
                velocity: self.locked(self.state.velocity),
                touches: touches.clone(),
            }),
            ClusterPhase::PressureHold => {
                let pressure_delta = sample.pressure - self.last_pressure;
                self.last_pressure = sample.pressure;
                emitted.push(GestureData::PressureHold {
                    center: self.position,
                    pressure: sample.pressure,
                    pressure_delta,
                    tilt: self.tilt,
                });
            }
            _ => {}
        }
    }

    fn advance_transform(
        &mut self,
        sample: &ClusterSample,
        touches: &Touches,
        config: &GestureConfig,
        emitted: &mut Emitted,
    ) {
        let (Some((a, b)), Some(track)) = (sample.pair, self.transform.as_mut()) else {
            return;
        };
        let now = sample.timestamp;

        let pinch = &config.pinch;
        let mut scale = (a.distance_to(b) / track.start_distance).clamp(pinch.min_scale, pinch.max_scale);
        if pinch.snap_to_grid && pinch.min_scale_change > 0.0 {
            scale = (scale / pinch.min_scale_change).round() * pinch.min_scale_change;
        }
        let scale_delta = scale - track.last_scale;
        if scale_delta.abs() > pinch.min_scale_change {
            let elapsed_secs = now.saturating_sub(track.last_scale_time) as f32 / 1000.0;
            let scale_velocity = if elapsed_secs > 0.0 {
                (scale_delta / elapsed_secs)
                    .clamp(-pinch.max_scale_velocity, pinch.max_scale_velocity)
            } else {
                0.0
            };
            track.last_scale = scale;
            track.last_scale_time = now;
            emitted.push(GestureData::Pinch {
                center: sample.position,
                scale,
                scale_delta,
                scale_velocity,
                touches: touches.clone(),
                touch_count: 2,
            });
        }

        let rotate = &config.rotate;
        let rotation = normalize_degrees(a.angle_to(b) - track.start_angle);
        let step = normalize_degrees(rotation - track.last_rotation);
        if step.abs() > rotate.min_angle_change {
            // Degrees per millisecond bound; faster steps are contact swaps.
            let elapsed = now.saturating_sub(track.last_rotation_time).max(1) as f32;
            let limit = rotate.max_angular_velocity * elapsed;
            let rotation_delta = step.clamp(-limit, limit);
            track.last_rotation = normalize_degrees(track.last_rotation + rotation_delta);
            track.last_rotation_time = now;
            emitted.push(GestureData::Rotate {
                center: sample.position,
                rotation: track.last_rotation,
                rotation_delta,
                touches: touches.clone(),
                touch_count: 2,
            });
        }

        if !emitted.is_empty() {
            self.phase = ClusterPhase::Transform;
        }
    }

    fn locked(&self, v: Point) -> Point {
        match self.lock {
            Some(Axis::Horizontal) => Point::new(v.x, 0.0),
            Some(Axis::Vertical) => Point::new(0.0, v.y),
            None => v,
        }
    }

    /// Single-pointer clusters that never committed to anything but a pan
    /// are the only ones classified at the end.
    pub fn classifiable(&self) -> bool {
        matches!(
            self.key,
            ClusterKey::Single(_) | ClusterKey::Mouse | ClusterKey::Stylus(_)
        ) && matches!(self.phase, ClusterPhase::Tentative | ClusterPhase::Pan)
    }

    pub fn summary(&self) -> ClusterSummary {
        ClusterSummary {
            duration: self.state.duration,
            max_travel: self.max_travel,
            displacement: self.position - self.origin,
            velocity: self.state.velocity,
            peak_pressure: self.peak_pressure,
        }
    }

    pub fn idle_for(&self, now: Millis) -> Millis {
        now.saturating_sub(self.state.current_time)
    }
}
