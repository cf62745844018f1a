use crate::context::GestureContext;
use crate::input::{PointerId, Tilt, TouchPoint, Touches};
use gestura_core::Millis;
use gestura_geometry::Point;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GestureType {
    Tap,
    DoubleTap,
    LongPress,
    Pan,
    Pinch,
    Rotate,
    Swipe,
    MultiFingerSwipe,
    PressureHold,
    Hover,
}

impl GestureType {
    pub const ALL: [GestureType; 10] = [
        GestureType::Tap,
        GestureType::DoubleTap,
        GestureType::LongPress,
        GestureType::Pan,
        GestureType::Pinch,
        GestureType::Rotate,
        GestureType::Swipe,
        GestureType::MultiFingerSwipe,
        GestureType::PressureHold,
        GestureType::Hover,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GestureType::Tap => "tap",
            GestureType::DoubleTap => "double-tap",
            GestureType::LongPress => "long-press",
            GestureType::Pan => "pan",
            GestureType::Pinch => "pinch",
            GestureType::Rotate => "rotate",
            GestureType::Swipe => "swipe",
            GestureType::MultiFingerSwipe => "multi-finger-swipe",
            GestureType::PressureHold => "pressure-hold",
            GestureType::Hover => "hover",
        }
    }

    /// Classified once, at cluster end.
    pub fn is_discrete(self) -> bool {
        matches!(
            self,
            GestureType::Tap | GestureType::DoubleTap | GestureType::LongPress | GestureType::Swipe
        )
    }

    /// Types that keep draining while the renderer is over its frame budget.
    pub fn is_high_priority(self) -> bool {
        matches!(
            self,
            GestureType::Pan | GestureType::Pinch | GestureType::Rotate
        )
    }
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Dominant axis wins; the sign of that axis picks the direction.
    /// Screen coordinates grow downwards.
    pub fn from_velocity(velocity: Point) -> Self {
        if velocity.x.abs() > velocity.y.abs() {
            if velocity.x > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if velocity.y > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }
}

/// Logical input cluster a contact belongs to.
///
/// Touch contacts form at most one cluster at a time whose key follows the
/// current arity; mouse and stylus pointers are tracked separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClusterKey {
    Single(PointerId),
    TwoFinger,
    Multi(u8),
    Mouse,
    Stylus(PointerId),
    WheelZoom,
}

/// Slot class a cluster lives in. At most one cluster per class is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClusterClass {
    Touch = 0,
    Mouse = 1,
    Stylus = 2,
}

impl ClusterClass {
    pub const COUNT: usize = 3;
}

impl ClusterKey {
    /// Builds the touch key for `arity` simultaneous contacts.
    pub fn for_touch_arity(arity: usize, first: PointerId) -> Option<ClusterKey> {
        match arity {
            0 => None,
            1 => Some(ClusterKey::Single(first)),
            2 => Some(ClusterKey::TwoFinger),
            n => Some(ClusterKey::Multi(n.min(u8::MAX as usize) as u8)),
        }
    }

    /// `None` for wheel zoom, which never holds state between samples.
    pub fn class(self) -> Option<ClusterClass> {
        match self {
            ClusterKey::Single(_) | ClusterKey::TwoFinger | ClusterKey::Multi(_) => {
                Some(ClusterClass::Touch)
            }
            ClusterKey::Mouse => Some(ClusterClass::Mouse),
            ClusterKey::Stylus(_) => Some(ClusterClass::Stylus),
            ClusterKey::WheelZoom => None,
        }
    }

    pub fn arity(self) -> usize {
        match self {
            ClusterKey::Single(_) | ClusterKey::Mouse | ClusterKey::Stylus(_) => 1,
            ClusterKey::TwoFinger => 2,
            ClusterKey::Multi(n) => n as usize,
            ClusterKey::WheelZoom => 0,
        }
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterKey::Single(id) => write!(f, "single-{id}"),
            ClusterKey::TwoFinger => f.write_str("two-finger"),
            ClusterKey::Multi(n) => write!(f, "multi-{n}"),
            ClusterKey::Mouse => f.write_str("mouse"),
            ClusterKey::Stylus(id) => write!(f, "stylus-{id}"),
            ClusterKey::WheelZoom => f.write_str("wheel-zoom"),
        }
    }
}

/// Kinematic state of one active cluster.
///
/// `duration == current_time - start_time` holds after every update, and
/// `current_time` never moves backwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    pub is_active: bool,
    pub start_time: Millis,
    pub current_time: Millis,
    pub duration: Millis,
    /// Pixels per millisecond.
    pub velocity: Point,
    /// Pixels per millisecond squared.
    pub acceleration: Point,
    pub pressure: f32,
}

impl GestureState {
    pub fn begin(timestamp: Millis, pressure: f32) -> Self {
        Self {
            is_active: true,
            start_time: timestamp,
            current_time: timestamp,
            duration: 0,
            velocity: Point::ZERO,
            acceleration: Point::ZERO,
            pressure,
        }
    }

    /// Folds one sample into the state.
    ///
    /// `displacement` is the positional change since the previous sample, or
    /// `None` when the sample carries no motion. Velocity and acceleration are
    /// only recomputed when time moved forward; returns whether they were.
    pub fn record_sample(
        &mut self,
        timestamp: Millis,
        displacement: Option<Point>,
        pressure: f32,
    ) -> bool {
        let mut recomputed = false;
        if timestamp > self.current_time {
            let dt = (timestamp - self.current_time) as f32;
            if let Some(delta) = displacement {
                let velocity = delta / dt;
                self.acceleration = (velocity - self.velocity) / dt;
                self.velocity = velocity;
                recomputed = true;
            }
            self.current_time = timestamp;
        }
        self.duration = self.current_time - self.start_time;
        self.pressure = pressure;
        recomputed
    }

    /// Marks the terminating frame. Duration is frozen from here on.
    pub fn finish(&mut self, timestamp: Millis) {
        if timestamp > self.current_time {
            self.current_time = timestamp;
        }
        self.duration = self.current_time - self.start_time;
        self.is_active = false;
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Payload of a [`GestureEvent`], one variant per gesture type.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureData {
    Tap {
        center: Point,
        touches: Touches,
    },
    DoubleTap {
        center: Point,
        /// Time between the two taps.
        interval: Millis,
        touches: Touches,
    },
    LongPress {
        center: Point,
        pressure: f32,
        touches: Touches,
    },
    Pan {
        center: Point,
        translation: Point,
        velocity: Point,
        touches: Touches,
    },
    Pinch {
        center: Point,
        /// Cumulative scale relative to the cluster's starting distance.
        scale: f32,
        /// Change since the previous pinch emission.
        scale_delta: f32,
        /// Scale units per second.
        scale_velocity: f32,
        touches: Touches,
        touch_count: usize,
    },
    Rotate {
        center: Point,
        /// Cumulative rotation in degrees.
        rotation: f32,
        rotation_delta: f32,
        touches: Touches,
        touch_count: usize,
    },
    Swipe {
        center: Point,
        direction: SwipeDirection,
        swipe_velocity: f32,
        velocity: Point,
        translation: Point,
        touches: Touches,
    },
    MultiFingerSwipe {
        center: Point,
        translation: Point,
        velocity: Point,
        touches: Touches,
        touch_count: usize,
    },
    PressureHold {
        center: Point,
        pressure: f32,
        pressure_delta: f32,
        tilt: Tilt,
    },
    Hover {
        point: Point,
        hover_duration: Millis,
    },
}

impl GestureData {
    pub fn gesture_type(&self) -> GestureType {
        match self {
            GestureData::Tap { .. } => GestureType::Tap,
            GestureData::DoubleTap { .. } => GestureType::DoubleTap,
            GestureData::LongPress { .. } => GestureType::LongPress,
            GestureData::Pan { .. } => GestureType::Pan,
            GestureData::Pinch { .. } => GestureType::Pinch,
            GestureData::Rotate { .. } => GestureType::Rotate,
            GestureData::Swipe { .. } => GestureType::Swipe,
            GestureData::MultiFingerSwipe { .. } => GestureType::MultiFingerSwipe,
            GestureData::PressureHold { .. } => GestureType::PressureHold,
            GestureData::Hover { .. } => GestureType::Hover,
        }
    }

    pub fn center(&self) -> Point {
        match self {
            GestureData::Tap { center, .. }
            | GestureData::DoubleTap { center, .. }
            | GestureData::LongPress { center, .. }
            | GestureData::Pan { center, .. }
            | GestureData::Pinch { center, .. }
            | GestureData::Rotate { center, .. }
            | GestureData::Swipe { center, .. }
            | GestureData::MultiFingerSwipe { center, .. }
            | GestureData::PressureHold { center, .. } => *center,
            GestureData::Hover { point, .. } => *point,
        }
    }

    pub fn translation(&self) -> Option<Point> {
        match self {
            GestureData::Pan { translation, .. }
            | GestureData::Swipe { translation, .. }
            | GestureData::MultiFingerSwipe { translation, .. } => Some(*translation),
            _ => None,
        }
    }

    pub fn velocity(&self) -> Option<Point> {
        match self {
            GestureData::Pan { velocity, .. }
            | GestureData::Swipe { velocity, .. }
            | GestureData::MultiFingerSwipe { velocity, .. } => Some(*velocity),
            _ => None,
        }
    }

    pub fn pressure(&self) -> Option<f32> {
        match self {
            GestureData::LongPress { pressure, .. } | GestureData::PressureHold { pressure, .. } => {
                Some(*pressure)
            }
            _ => None,
        }
    }

    pub fn touch_count(&self) -> Option<usize> {
        match self {
            GestureData::Pinch { touch_count, .. }
            | GestureData::Rotate { touch_count, .. }
            | GestureData::MultiFingerSwipe { touch_count, .. } => Some(*touch_count),
            GestureData::Tap { touches, .. }
            | GestureData::DoubleTap { touches, .. }
            | GestureData::LongPress { touches, .. }
            | GestureData::Pan { touches, .. }
            | GestureData::Swipe { touches, .. } => Some(touches.len()),
            GestureData::PressureHold { .. } | GestureData::Hover { .. } => None,
        }
    }

    pub fn touches(&self) -> &[TouchPoint] {
        match self {
            GestureData::Tap { touches, .. }
            | GestureData::DoubleTap { touches, .. }
            | GestureData::LongPress { touches, .. }
            | GestureData::Pan { touches, .. }
            | GestureData::Pinch { touches, .. }
            | GestureData::Rotate { touches, .. }
            | GestureData::Swipe { touches, .. }
            | GestureData::MultiFingerSwipe { touches, .. } => touches,
            GestureData::PressureHold { .. } | GestureData::Hover { .. } => &[],
        }
    }
}

/// A recognized transition, delivered to consumers by shared reference.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEvent {
    pub data: GestureData,
    /// Snapshot taken when the event was emitted.
    pub state: GestureState,
    pub context: Rc<GestureContext>,
    pub cluster: ClusterKey,
    pub timestamp: Millis,
}

impl GestureEvent {
    pub fn gesture_type(&self) -> GestureType {
        self.data.gesture_type()
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
