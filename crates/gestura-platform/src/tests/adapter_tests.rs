use super::*;
use gestura_foundation::{PointerButton, PointerButtons, WheelSample};
use gestura_geometry::Point;

fn mobile_env() -> Environment {
    Environment {
        user_agent: "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari".into(),
        max_touch_points: 5,
        touch_events: true,
        pixel_ratio: 2.0,
        ..Default::default()
    }
}

fn stylus_env() -> Environment {
    Environment {
        user_agent: "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)".into(),
        max_touch_points: 5,
        pen_primary: true,
        pressure_input: true,
        ..Default::default()
    }
}

#[test]
fn mobile_strategy_overrides_only_named_thresholds() {
    let adapter = PlatformAdapter::new(&mobile_env());
    assert_eq!(
        adapter.strategy().map(|s| s.name),
        Some("touch-mobile")
    );
    let base = GestureConfig::default();
    let adapted = adapter.adapt(&base);
    assert_eq!(adapted.tap.max_duration, 300);
    assert_eq!(adapted.tap.max_movement, 20.0);
    assert_eq!(adapted.swipe.min_velocity, 0.8);
    assert_eq!(adapted.swipe.max_duration, base.swipe.max_duration);
    assert_eq!(adapted.rotate, base.rotate);
    assert_eq!(adapted.long_press, base.long_press);
}

#[test]
fn hybrid_laptop_has_no_strategy_and_keeps_base() {
    let env = Environment {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".into(),
        max_touch_points: 10,
        ..Default::default()
    };
    let adapter = PlatformAdapter::new(&env);
    assert!(adapter.strategy().is_none());
    let base = GestureConfig::default();
    assert_eq!(adapter.adapt(&base), base);
}

#[test]
fn optimizations_apply_once() {
    let mut adapter = PlatformAdapter::new(&mobile_env());
    assert_eq!(adapter.apply_platform_optimizations(), 4);
    assert_eq!(adapter.apply_platform_optimizations(), 0);
    assert!(!adapter.apply_optimization(Optimization::IncreaseTouchTolerance));

    let effects = adapter.take_effects();
    assert_eq!(
        effects,
        vec![
            PlatformEffect::SuppressTapHighlight,
            PlatformEffect::MinimumHitTarget(44.0),
            PlatformEffect::LockViewportScale,
        ]
    );
    assert!(adapter.take_effects().is_empty());
    assert_eq!(adapter.applied_count(), 4);
}

#[test]
fn simplified_gestures_cap_multi_touch() {
    let mut adapter = PlatformAdapter::new(&mobile_env());
    adapter.apply_optimization(Optimization::EnableSimplifiedGestures);
    assert_eq!(adapter.adapt(&GestureConfig::default()).multi_touch.max_touches, 2);
}

#[test]
fn named_optimization_errors_on_unknown_name() {
    let mut adapter = PlatformAdapter::new(&Environment::default());
    assert_eq!(adapter.apply_optimization_named("enable-wheel-zoom"), Ok(true));
    assert_eq!(adapter.apply_optimization_named("enable-wheel-zoom"), Ok(false));
    assert_eq!(
        adapter.apply_optimization_named("turbo"),
        Err(PlatformError::UnknownOptimization("turbo".into()))
    );
}

#[test]
fn supports_answers_capability_queries() {
    let adapter = PlatformAdapter::new(&mobile_env());
    assert!(adapter.supports("multi-touch"));
    assert!(!adapter.supports("pressure"));
    assert!(adapter.supports("wheel-zoom"));
    assert!(!adapter.supports("teleport"));
}

#[test]
fn mobile_touch_positions_scale_by_pixel_ratio() {
    let mut adapter = PlatformAdapter::new(&mobile_env());
    let frame = TouchFrame::new(PointerPhase::Start, 0).with_touch(1, Point::new(10.0, 20.0), 0.0);
    let Some(RawInput::Touch(frame)) = adapter.normalize(RawInput::Touch(frame)) else {
        panic!("touch frame dropped");
    };
    assert_eq!(frame.touches[0].point, Point::new(20.0, 40.0));
    assert_eq!(frame.touches[0].pressure, 1.0);
}

#[test]
fn mouse_pressure_follows_buttons() {
    let mut adapter = PlatformAdapter::new(&Environment::default());
    let primary = MouseSample::new(PointerPhase::Start, Point::ZERO, 0)
        .with_buttons(PointerButtons::NONE.with(PointerButton::Primary));
    let secondary = MouseSample::new(PointerPhase::Start, Point::ZERO, 0)
        .with_buttons(PointerButtons::NONE.with(PointerButton::Secondary));
    let hover = MouseSample::new(PointerPhase::Move, Point::ZERO, 0);

    let pressure = |raw: Option<RawInput>| match raw {
        Some(RawInput::Mouse(sample)) => sample.pressure,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(pressure(adapter.normalize(primary.into())), 0.7);
    assert_eq!(pressure(adapter.normalize(secondary.into())), 0.9);
    assert_eq!(pressure(adapter.normalize(hover.into())), 0.5);
}

#[test]
fn palm_rejection_drops_touches_while_pen_is_down() {
    let mut adapter = PlatformAdapter::new(&stylus_env());
    adapter.apply_platform_optimizations();
    assert!(adapter.settings().palm_rejection);

    let pen_down = StylusSample::new(7, PointerPhase::Start, Point::ZERO, 0).with_pressure(0.4);
    assert!(adapter.normalize(pen_down.into()).is_some());

    let palm = TouchFrame::new(PointerPhase::Start, 5).with_touch(1, Point::new(300.0, 300.0), 0.3);
    assert!(adapter.normalize(palm.clone().into()).is_none());

    let pen_up = StylusSample::new(7, PointerPhase::End, Point::ZERO, 10);
    assert!(adapter.normalize(pen_up.into()).is_some());
    assert!(adapter.normalize(palm.into()).is_some());
}

#[test]
fn pointer_samples_route_by_type() {
    let mut adapter = PlatformAdapter::new(&Environment::default());
    let pen = PointerSample {
        id: 3,
        pointer_type: PointerType::Pen,
        phase: PointerPhase::Move,
        position: Point::new(1.0, 1.0),
        pressure: None,
        tilt: Tilt { x: 120.0, y: -10.0 },
        buttons: PointerButtons::NONE,
        timestamp: 42,
    };
    match adapter.normalize_pointer(&pen) {
        Some(RawInput::Stylus(sample)) => {
            assert_eq!(sample.pressure, 0.5);
            assert_eq!(sample.tilt.x, 90.0);
        }
        other => panic!("unexpected {other:?}"),
    }

    let touch = PointerSample {
        pointer_type: PointerType::Touch,
        ..pen
    };
    assert!(matches!(
        adapter.normalize_pointer(&touch),
        Some(RawInput::Touch(frame)) if frame.touches.len() == 1
    ));
}

#[test]
fn wheel_is_dropped_without_wheel_support() {
    let env = Environment {
        wheel_events: false,
        ..Default::default()
    };
    let mut adapter = PlatformAdapter::new(&env);
    let wheel = WheelSample {
        delta_y: 120.0,
        position: Point::new(400.0, 300.0),
        timestamp: 0,
    };
    assert!(adapter.normalize(wheel.into()).is_none());
    adapter.apply_optimization(Optimization::EnableWheelZoom);
    assert!(adapter.normalize(wheel.into()).is_some());
}
