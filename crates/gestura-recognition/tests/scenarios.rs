use gestura_foundation::{
    ClusterKey, GestureConfig, GestureContext, GestureData, GestureEvent, GestureType, PointerPhase,
    RawInput, SwipeDirection,
};
use gestura_geometry::Point;
use gestura_recognition::GestureRecognizer;
use gestura_testing::{
    assert_approx_eq, assert_discrete_exclusive, assert_none_of, assert_point_near, contexts,
    expect_single, gesture_types, InputScript,
};
use std::rc::Rc;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn recognize(context: Rc<GestureContext>, inputs: &[RawInput]) -> Vec<GestureEvent> {
    recognize_with(GestureConfig::default(), context, inputs)
}

fn recognize_with(
    config: GestureConfig,
    context: Rc<GestureContext>,
    inputs: &[RawInput],
) -> Vec<GestureEvent> {
    init_logger();
    let mut recognizer = GestureRecognizer::new(config, context);
    inputs
        .iter()
        .flat_map(|input| recognizer.process(input))
        .collect()
}

#[test]
fn short_still_contact_taps_at_its_position() {
    let inputs = InputScript::new()
        .touch_down(1, 100.0, 100.0)
        .wait(50)
        .touch_move(1, 102.0, 101.0)
        .wait(50)
        .touch_move(1, 103.0, 99.0)
        .wait(50)
        .touch_up(1, 101.0, 100.0)
        .build();
    let events = recognize(contexts::touch_phone(), &inputs);

    assert_eq!(gesture_types(&events), vec![GestureType::Tap]);
    assert_point_near(
        events[0].data.center(),
        Point::new(100.0, 100.0),
        5.0,
        "tap center",
    );
}

#[test]
fn firm_still_hold_is_one_long_press() {
    let inputs = InputScript::new()
        .hold(1, (200.0, 200.0), 0.8, 1_200, 100)
        .build();
    let events = recognize(contexts::pressure_touch(), &inputs);

    assert_eq!(gesture_types(&events), vec![GestureType::LongPress]);
    assert_none_of(&events, GestureType::Pan);
    assert_eq!(events[0].state.duration, 1_200);
}

#[test]
fn quick_jitter_inside_tap_tolerance_still_taps() {
    let inputs = InputScript::new()
        .touch_down(1, 100.0, 100.0)
        .wait(8)
        .touch_move(1, 104.0, 103.0)
        .wait(142)
        .touch_up(1, 104.0, 103.0)
        .build();
    let events = recognize(contexts::touch_phone(), &inputs);

    assert_eq!(gesture_types(&events), vec![GestureType::Tap]);
    assert_none_of(&events, GestureType::Pan);
    assert_point_near(
        events[0].data.center(),
        Point::new(104.0, 103.0),
        0.5,
        "tap center",
    );
}

#[test]
fn firm_hold_with_early_shift_is_one_long_press() {
    let mut script = InputScript::new()
        .touch_frame(PointerPhase::Start, &[(1, 200.0, 200.0, 0.8)])
        .wait(16)
        .touch_frame(PointerPhase::Move, &[(1, 206.0, 200.0, 0.8)]);
    for _ in 0..11 {
        script = script
            .wait(100)
            .touch_frame(PointerPhase::Move, &[(1, 206.0, 200.0, 0.8)]);
    }
    let inputs = script
        .wait(84)
        .touch_frame(PointerPhase::End, &[(1, 206.0, 200.0, 0.8)])
        .build();
    let events = recognize(contexts::pressure_touch(), &inputs);

    assert_eq!(gesture_types(&events), vec![GestureType::LongPress]);
    assert_eq!(events[0].state.duration, 1_200);
}

#[test]
fn soft_hold_on_pressure_hardware_is_not_a_long_press() {
    let inputs = InputScript::new()
        .hold(1, (200.0, 200.0), 0.4, 1_200, 100)
        .build();
    let events = recognize(contexts::pressure_touch(), &inputs);

    assert!(events.is_empty(), "got {:?}", gesture_types(&events));
}

#[test]
fn fast_horizontal_drag_swipes_right() {
    let inputs = InputScript::new()
        .drag(1, (0.0, 0.0), (300.0, 0.0), 200, 10)
        .build();
    let events = recognize(contexts::touch_phone(), &inputs);

    let swipe = expect_single(&events, GestureType::Swipe);
    match &swipe.data {
        GestureData::Swipe {
            direction,
            translation,
            ..
        } => {
            assert_eq!(*direction, SwipeDirection::Right);
            assert_eq!(*translation, Point::new(300.0, 0.0));
        }
        other => panic!("expected swipe, got {other:?}"),
    }
    assert_discrete_exclusive(&events);
}

#[test]
fn spreading_two_fingers_pinches_towards_double_scale() {
    let inputs = InputScript::new()
        .spread((200.0, 200.0), 100.0, 200.0, 300, 10)
        .build();
    let events = recognize(contexts::touch_phone(), &inputs);

    let scales: Vec<f32> = events
        .iter()
        .filter_map(|event| match event.data {
            GestureData::Pinch { scale, .. } => Some(scale),
            _ => None,
        })
        .collect();
    assert!(!scales.is_empty());
    assert!(scales.windows(2).all(|w| w[0] < w[1]), "{scales:?}");
    assert_approx_eq(*scales.last().unwrap_or(&0.0), 2.0, 0.05, "final scale");
    assert_none_of(&events, GestureType::Rotate);
    assert!(events.iter().all(|e| e.cluster == ClusterKey::TwoFinger));
}

#[test]
fn wheel_down_zooms_out_immediately() {
    let inputs = InputScript::new().wheel(120.0, 400.0, 300.0).build();
    let events = recognize(contexts::desktop_mouse(), &inputs);

    assert_eq!(gesture_types(&events), vec![GestureType::Pinch]);
    let event = &events[0];
    match &event.data {
        GestureData::Pinch {
            scale,
            center,
            scale_delta,
            scale_velocity,
            ..
        } => {
            assert_eq!(*scale, 0.9);
            assert_eq!(*center, Point::new(400.0, 300.0));
            assert_approx_eq(*scale_delta, -0.1, 1e-6, "scale delta");
            assert_approx_eq(*scale_velocity, 7.5, 1e-6, "scale velocity");
        }
        other => panic!("expected pinch, got {other:?}"),
    }
    assert_eq!(event.cluster, ClusterKey::WheelZoom);
    assert_eq!(event.state.duration, 0);
}

#[test]
fn wheel_up_zooms_in() {
    let inputs = InputScript::new().wheel(-3.0, 10.0, 10.0).build();
    let events = recognize(contexts::desktop_mouse(), &inputs);

    assert!(matches!(
        events[0].data,
        GestureData::Pinch { scale, .. } if scale == 1.1
    ));
}

#[test]
fn mixed_session_never_double_classifies_a_cluster() {
    let mut script = InputScript::new();
    for round in 0..6u64 {
        let x = 50.0 * round as f32;
        script = script
            .tap(round * 10 + 1, x, 100.0, 40 + round * 30)
            .wait(350)
            .drag(round * 10 + 2, (x, 0.0), (x + 40.0 * round as f32, 200.0), 150 + round * 60, 8)
            .wait(350)
            .hold(round * 10 + 3, (x, 300.0), 0.9, 300 + round * 250, 50)
            .wait(350);
    }
    let events = recognize(contexts::touch_phone(), &script.build());

    assert_discrete_exclusive(&events);
}

#[test]
fn overlapping_thresholds_prefer_long_press() {
    let mut config = GestureConfig::default();
    config.tap.max_duration = 5_000;
    config.long_press.min_duration = 100;
    let inputs = InputScript::new().tap(1, 0.0, 0.0, 500).build();
    let events = recognize_with(config, contexts::touch_phone(), &inputs);

    assert_eq!(gesture_types(&events), vec![GestureType::LongPress]);
}

#[test]
fn second_contact_ends_single_cluster_without_discrete() {
    let inputs = InputScript::new()
        .touch_down(1, 100.0, 100.0)
        .wait(80)
        .touch_down(2, 180.0, 100.0)
        .wait(80)
        .touch_frame(
            PointerPhase::End,
            &[(1, 100.0, 100.0, 1.0), (2, 180.0, 100.0, 1.0)],
        )
        .build();
    let events = recognize(contexts::touch_phone(), &inputs);

    assert!(events.is_empty(), "got {:?}", gesture_types(&events));
}

#[test]
fn active_durations_never_decrease() {
    let inputs = InputScript::new()
        .drag(1, (0.0, 0.0), (0.0, 400.0), 800, 40)
        .build();
    let events = recognize(contexts::touch_phone(), &inputs);

    let active: Vec<_> = events.iter().filter(|e| e.state.is_active).collect();
    assert!(!active.is_empty());
    assert!(active
        .windows(2)
        .all(|w| w[0].state.duration <= w[1].state.duration));
}

#[test]
fn pinch_stops_once_distance_holds_still() {
    let mut script = InputScript::new()
        .touch_frame(
            PointerPhase::Start,
            &[(1, 150.0, 200.0, 1.0), (2, 250.0, 200.0, 1.0)],
        )
        .wait(16)
        .touch_frame(
            PointerPhase::Move,
            &[(1, 125.0, 200.0, 1.0), (2, 275.0, 200.0, 1.0)],
        );
    for step in 1..=10 {
        let dy = step as f32;
        script = script.wait(16).touch_frame(
            PointerPhase::Move,
            &[(1, 125.0, 200.0 + dy, 1.0), (2, 275.0, 200.0 + dy, 1.0)],
        );
    }
    let events = recognize(contexts::touch_phone(), &script.build());

    let pinches = events
        .iter()
        .filter(|e| e.gesture_type() == GestureType::Pinch)
        .count();
    assert_eq!(pinches, 1, "got {:?}", gesture_types(&events));
    assert_none_of(&events, GestureType::Rotate);
}
