use super::*;
use gestura_geometry::Size;

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 14; SM-X710) AppleWebKit/537.36";
const WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15";

#[test]
fn touch_phone_is_touch_on_mobile() {
    let env = Environment {
        user_agent: IPHONE.into(),
        max_touch_points: 5,
        touch_events: true,
        pixel_ratio: 3.0,
        screen_size: Size::new(390.0, 844.0),
        ..Default::default()
    };
    let context = ContextDetector::detect(&env);
    assert_eq!(context.device_type, DeviceType::Touch);
    assert_eq!(context.input_type, InputType::Finger);
    assert_eq!(context.platform, Platform::Mobile);
    assert_eq!(context.pixel_ratio, 3.0);
}

#[test]
fn android_without_mobi_is_a_tablet() {
    let env = Environment {
        user_agent: ANDROID_TABLET.into(),
        max_touch_points: 10,
        ..Default::default()
    };
    assert_eq!(ContextDetector::detect(&env).platform, Platform::Tablet);
}

#[test]
fn hybrid_laptop_keeps_desktop_platform() {
    let env = Environment {
        user_agent: WINDOWS.into(),
        max_touch_points: 10,
        ..Default::default()
    };
    let context = ContextDetector::detect(&env);
    assert_eq!(context.platform, Platform::Desktop);
    assert_eq!(context.device_type, DeviceType::Touch);
}

#[test]
fn pen_probe_wins_over_touch_points() {
    let env = Environment {
        user_agent: ANDROID_TABLET.into(),
        max_touch_points: 10,
        pen_primary: true,
        pressure_input: true,
        ..Default::default()
    };
    let context = ContextDetector::detect(&env);
    assert_eq!(context.device_type, DeviceType::Stylus);
    assert_eq!(context.input_type, InputType::Pen);
    assert!(context.supports_pressure);
}

#[test]
fn mac_without_touch_is_trackpad_with_momentum() {
    let env = Environment {
        user_agent: MAC.into(),
        ..Default::default()
    };
    let context = ContextDetector::detect(&env);
    assert_eq!(context.device_type, DeviceType::Trackpad);
    assert_eq!(context.platform, Platform::Desktop);
    assert!(ContextDetector::capabilities(&env).momentum_scroll);
}

#[test]
fn plain_desktop_is_mouse() {
    let context = ContextDetector::detect(&Environment::default());
    assert_eq!(context.device_type, DeviceType::Mouse);
    assert_eq!(context.platform, Platform::Desktop);
    assert!(!context.supports_multi_touch());
}

#[test]
fn invalid_pixel_ratio_falls_back_to_one() {
    let env = Environment {
        pixel_ratio: 0.0,
        ..Default::default()
    };
    assert_eq!(ContextDetector::detect(&env).pixel_ratio, 1.0);
}

#[test]
fn tier_uses_cores_and_memory() {
    let low_phone = Environment {
        user_agent: IPHONE.into(),
        hardware_concurrency: Some(2),
        device_memory_gb: Some(2.0),
        ..Default::default()
    };
    assert_eq!(ContextDetector::tier(&low_phone), DeviceTier::MobileLowEnd);

    let workstation = Environment {
        user_agent: WINDOWS.into(),
        hardware_concurrency: Some(16),
        device_memory_gb: Some(8.0),
        ..Default::default()
    };
    assert_eq!(ContextDetector::tier(&workstation), DeviceTier::DesktopHighEnd);
    assert_eq!(
        ContextDetector::tier(&Environment::default()),
        DeviceTier::DesktopHighEnd
    );
}
