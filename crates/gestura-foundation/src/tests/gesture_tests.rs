use super::*;

#[test]
fn duplicate_timestamp_keeps_velocity_and_duration() {
    let mut state = GestureState::begin(100, 0.5);
    assert!(state.record_sample(110, Some(Point::new(10.0, 0.0)), 0.5));
    assert_eq!(state.velocity, Point::new(1.0, 0.0));

    assert!(!state.record_sample(110, Some(Point::new(50.0, 0.0)), 0.6));
    assert_eq!(state.velocity, Point::new(1.0, 0.0));
    assert_eq!(state.duration, 10);
    assert_eq!(state.pressure, 0.6);
}

#[test]
fn out_of_order_sample_never_shrinks_duration() {
    let mut state = GestureState::begin(100, 1.0);
    state.record_sample(150, Some(Point::new(5.0, 0.0)), 1.0);
    state.record_sample(120, Some(Point::new(5.0, 0.0)), 1.0);
    assert_eq!(state.current_time, 150);
    assert_eq!(state.duration, 50);
}

#[test]
fn acceleration_is_velocity_change_over_time() {
    let mut state = GestureState::begin(0, 1.0);
    state.record_sample(10, Some(Point::new(10.0, 0.0)), 1.0);
    state.record_sample(20, Some(Point::new(30.0, 0.0)), 1.0);
    assert_eq!(state.velocity, Point::new(3.0, 0.0));
    assert_eq!(state.acceleration, Point::new(0.2, 0.0));
}

#[test]
fn finish_freezes_duration() {
    let mut state = GestureState::begin(0, 1.0);
    state.record_sample(40, None, 1.0);
    state.finish(60);
    assert!(!state.is_active);
    assert_eq!(state.duration, 60);
}

#[test]
fn swipe_direction_follows_dominant_axis() {
    assert_eq!(
        SwipeDirection::from_velocity(Point::new(1.5, 0.2)),
        SwipeDirection::Right
    );
    assert_eq!(
        SwipeDirection::from_velocity(Point::new(-1.5, 0.2)),
        SwipeDirection::Left
    );
    assert_eq!(
        SwipeDirection::from_velocity(Point::new(0.1, -2.0)),
        SwipeDirection::Up
    );
    assert_eq!(
        SwipeDirection::from_velocity(Point::new(0.1, 2.0)),
        SwipeDirection::Down
    );
}

#[test]
fn cluster_keys_format_like_their_arity() {
    assert_eq!(ClusterKey::Single(3).to_string(), "single-3");
    assert_eq!(ClusterKey::TwoFinger.to_string(), "two-finger");
    assert_eq!(ClusterKey::Multi(4).to_string(), "multi-4");
    assert_eq!(ClusterKey::Stylus(9).to_string(), "stylus-9");
    assert_eq!(ClusterKey::WheelZoom.to_string(), "wheel-zoom");
    assert_eq!(ClusterKey::for_touch_arity(3, 1), Some(ClusterKey::Multi(3)));
    assert_eq!(ClusterKey::WheelZoom.class(), None);
}

#[test]
fn payload_exposes_only_its_own_fields() {
    let data = GestureData::Tap {
        center: Point::new(1.0, 2.0),
        touches: Touches::new(),
    };
    assert_eq!(data.gesture_type(), GestureType::Tap);
    assert_eq!(data.translation(), None);
    assert_eq!(data.velocity(), None);
    assert_eq!(data.pressure(), None);

    let hold = GestureData::PressureHold {
        center: Point::ZERO,
        pressure: 0.9,
        pressure_delta: 0.1,
        tilt: Tilt::default(),
    };
    assert_eq!(hold.pressure(), Some(0.9));
    assert_eq!(hold.touch_count(), None);
}
