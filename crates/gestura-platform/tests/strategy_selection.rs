use gestura_foundation::{DeviceType, GestureConfig, Platform};
use gestura_platform::{AdaptationStrategy, Optimization};

#[test]
fn every_strategy_keeps_unmentioned_sections_at_base() {
    let pairs = [
        (DeviceType::Touch, Platform::Mobile, "touch-mobile"),
        (DeviceType::Touch, Platform::Tablet, "touch-tablet"),
        (DeviceType::Mouse, Platform::Desktop, "mouse-desktop"),
        (DeviceType::Stylus, Platform::Tablet, "stylus"),
        (DeviceType::Trackpad, Platform::Desktop, "trackpad-macos"),
    ];
    let base = GestureConfig::default();
    for (device, platform, name) in pairs {
        let strategy = AdaptationStrategy::for_context(device, platform)
            .unwrap_or_else(|| panic!("missing strategy {name}"));
        assert_eq!(strategy.name, name);
        let adapted = base.merged(&strategy.gesture_config);
        assert_eq!(adapted.long_press, base.long_press, "{name}");
        assert_eq!(adapted.multi_touch, base.multi_touch, "{name}");
        assert_eq!(adapted.double_tap, base.double_tap, "{name}");
    }
}

#[test]
fn trackpad_pan_override_keeps_pinch_floor_independent() {
    let strategy = AdaptationStrategy::for_context(DeviceType::Trackpad, Platform::Desktop)
        .expect("trackpad strategy");
    let adapted = GestureConfig::default().merged(&strategy.gesture_config);
    assert_eq!(adapted.pan.min_distance, 10.0);
    assert!(adapted.pan.momentum);
    assert!(adapted.pinch.snap_to_grid);
    assert_eq!(adapted.pinch.max_scale, 5.0);
    assert_eq!(adapted.rotate.min_angle_change, 1.0);
}

#[test]
fn unknown_pairs_have_no_strategy() {
    assert!(AdaptationStrategy::for_context(DeviceType::Mouse, Platform::Mobile).is_none());
    assert!(AdaptationStrategy::for_context(DeviceType::Trackpad, Platform::Tablet).is_none());
}

#[test]
fn optimization_names_round_trip() {
    for opt in Optimization::ALL {
        assert_eq!(opt.as_str().parse::<Optimization>(), Ok(opt));
    }
}
