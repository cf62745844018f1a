//! Hand-built events for exercising code downstream of recognition.

use gestura_core::Millis;
use gestura_foundation::{
    ClusterKey, GestureContext, GestureData, GestureEvent, GestureState, GestureType,
    SwipeDirection, Tilt, Touches,
};
use gestura_geometry::Point;
use std::rc::Rc;

/// A representative event of `gesture_type` at `timestamp`.
///
/// Continuous types come out active, discrete ones finished. Positions sit
/// at the origin and kinematics are zero unless the type needs them.
pub fn sample_event(gesture_type: GestureType, timestamp: Millis) -> GestureEvent {
    let center = Point::ZERO;
    let touches = Touches::new();
    let data = match gesture_type {
        GestureType::Tap => GestureData::Tap { center, touches },
        GestureType::DoubleTap => GestureData::DoubleTap {
            center,
            interval: 200,
            touches,
        },
        GestureType::LongPress => GestureData::LongPress {
            center,
            pressure: 1.0,
            touches,
        },
        GestureType::Pan => GestureData::Pan {
            center,
            translation: Point::ZERO,
            velocity: Point::ZERO,
            touches,
        },
        GestureType::Pinch => GestureData::Pinch {
            center,
            scale: 1.0,
            scale_delta: 0.0,
            scale_velocity: 0.0,
            touches,
            touch_count: 2,
        },
        GestureType::Rotate => GestureData::Rotate {
            center,
            rotation: 0.0,
            rotation_delta: 0.0,
            touches,
            touch_count: 2,
        },
        GestureType::Swipe => GestureData::Swipe {
            center,
            direction: SwipeDirection::Right,
            swipe_velocity: 1.5,
            velocity: Point::new(1.5, 0.0),
            translation: Point::new(300.0, 0.0),
            touches,
        },
        GestureType::MultiFingerSwipe => GestureData::MultiFingerSwipe {
            center,
            translation: Point::ZERO,
            velocity: Point::ZERO,
            touches,
            touch_count: 3,
        },
        GestureType::PressureHold => GestureData::PressureHold {
            center,
            pressure: 0.8,
            pressure_delta: 0.0,
            tilt: Tilt::default(),
        },
        GestureType::Hover => GestureData::Hover {
            point: center,
            hover_duration: 0,
        },
    };
    event_with(data, timestamp)
}

/// Wraps `data` in an event stamped `timestamp`, on a cluster that fits the
/// payload.
pub fn event_with(data: GestureData, timestamp: Millis) -> GestureEvent {
    let gesture_type = data.gesture_type();
    let cluster = match gesture_type {
        GestureType::Pinch | GestureType::Rotate => ClusterKey::TwoFinger,
        GestureType::MultiFingerSwipe => ClusterKey::Multi(3),
        GestureType::PressureHold => ClusterKey::Stylus(1),
        GestureType::Hover => ClusterKey::Mouse,
        _ => ClusterKey::Single(1),
    };
    let mut state = GestureState::begin(timestamp, data.pressure().unwrap_or(1.0));
    if gesture_type.is_discrete() {
        state.finish(timestamp);
    }
    GestureEvent {
        data,
        state,
        context: Rc::new(GestureContext::default()),
        cluster,
        timestamp,
    }
}
