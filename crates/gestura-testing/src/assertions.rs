//! Assertion helpers for gesture tests.

use gestura_foundation::{GestureEvent, GestureType};
use gestura_geometry::Point;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_point_near(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert!(
        actual.distance_to(expected) <= tolerance,
        "{}: expected {:?} (±{}), got {:?}",
        msg,
        expected,
        tolerance,
        actual
    );
}

/// Assert that exactly one event of `gesture_type` is present and return it.
pub fn expect_single<'a>(
    events: &'a [GestureEvent],
    gesture_type: GestureType,
) -> &'a GestureEvent {
    let matching: Vec<_> = events
        .iter()
        .filter(|event| event.gesture_type() == gesture_type)
        .collect();
    assert_eq!(
        matching.len(),
        1,
        "expected exactly one {} event, got {:?}",
        gesture_type,
        crate::gesture_types(events)
    );
    matching[0]
}

pub fn assert_none_of(events: &[GestureEvent], gesture_type: GestureType) {
    assert!(
        events.iter().all(|event| event.gesture_type() != gesture_type),
        "unexpected {} event in {:?}",
        gesture_type,
        crate::gesture_types(events)
    );
}

/// At most one discrete gesture per cluster.
pub fn assert_discrete_exclusive(events: &[GestureEvent]) {
    let mut seen = Vec::new();
    for event in events.iter().filter(|e| e.gesture_type().is_discrete()) {
        assert!(
            !seen.contains(&(event.cluster, event.state.start_time)),
            "cluster {} produced more than one discrete gesture: {:?}",
            event.cluster,
            crate::gesture_types(events)
        );
        seen.push((event.cluster, event.state.start_time));
    }
}
