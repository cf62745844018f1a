//! Device classification from an [`Environment`] report.
//!
//! Device type is decided in priority order: explicit pen/pressure probes,
//! then touch-point availability, then user-agent heuristics. Platform is
//! decided from the user agent alone, so a touch laptop stays on desktop.

use crate::environment::Environment;
use gestura_foundation::{DeviceType, GestureContext, InputType, Platform};

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Assumed when the host cannot report them.
const DEFAULT_CORES: u32 = 4;
const DEFAULT_MEMORY_GB: f32 = 4.0;

/// Coarse hardware class used to pick a performance preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceTier {
    MobileLowEnd,
    MobileHighEnd,
    DesktopLowEnd,
    DesktopHighEnd,
}

impl DeviceTier {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceTier::MobileLowEnd => "mobile-low-end",
            DeviceTier::MobileHighEnd => "mobile-high-end",
            DeviceTier::DesktopLowEnd => "desktop-low-end",
            DeviceTier::DesktopHighEnd => "desktop-high-end",
        }
    }
}

/// Capability answers backing [`PlatformAdapter::supports`](crate::PlatformAdapter::supports).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceCapabilities {
    pub max_touch_points: u32,
    pub pressure: bool,
    pub pointer_events: bool,
    pub wheel: bool,
    pub momentum_scroll: bool,
    pub hardware_concurrency: u32,
    pub device_memory_gb: f32,
}

pub struct ContextDetector;

impl ContextDetector {
    pub fn detect(env: &Environment) -> GestureContext {
        let ua = env.user_agent_lower();
        let platform = Self::platform(&ua);
        let (device_type, input_type) = if env.pen_primary {
            (DeviceType::Stylus, InputType::Pen)
        } else if env.is_touch_capable() {
            (DeviceType::Touch, InputType::Finger)
        } else if ua.contains("mac os") {
            (DeviceType::Trackpad, InputType::Trackpad)
        } else {
            (DeviceType::Mouse, InputType::Mouse)
        };

        let context = GestureContext {
            device_type,
            input_type,
            platform,
            screen_size: env.screen_size,
            pixel_ratio: if env.pixel_ratio > 0.0 && env.pixel_ratio.is_finite() {
                env.pixel_ratio
            } else {
                1.0
            },
            supports_pressure: env.pressure_input,
            max_touch_points: env.max_touch_points,
        };
        log::debug!(
            "detected {} device on {} platform ({} touch points, pressure: {})",
            context.device_type.as_str(),
            context.platform.as_str(),
            context.max_touch_points,
            context.supports_pressure
        );
        context
    }

    pub fn capabilities(env: &Environment) -> DeviceCapabilities {
        let ua = env.user_agent_lower();
        DeviceCapabilities {
            max_touch_points: env.max_touch_points,
            pressure: env.pressure_input,
            pointer_events: env.pointer_events,
            wheel: env.wheel_events,
            momentum_scroll: ua.contains("mac os") && !env.is_touch_capable(),
            hardware_concurrency: env.hardware_concurrency.unwrap_or(DEFAULT_CORES),
            device_memory_gb: env.device_memory_gb.unwrap_or(DEFAULT_MEMORY_GB),
        }
    }

    pub fn tier(env: &Environment) -> DeviceTier {
        let caps = Self::capabilities(env);
        let high_end = caps.hardware_concurrency >= DEFAULT_CORES
            && caps.device_memory_gb >= DEFAULT_MEMORY_GB;
        match (Self::platform(&env.user_agent_lower()), high_end) {
            (Platform::Desktop, true) => DeviceTier::DesktopHighEnd,
            (Platform::Desktop, false) => DeviceTier::DesktopLowEnd,
            (_, true) => DeviceTier::MobileHighEnd,
            (_, false) => DeviceTier::MobileLowEnd,
        }
    }

    fn platform(ua: &str) -> Platform {
        let tablet = ua.contains("ipad") || (ua.contains("android") && !ua.contains("mobi"));
        if tablet {
            Platform::Tablet
        } else if MOBILE_MARKERS.iter().any(|marker| ua.contains(marker)) {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }
}

#[cfg(test)]
#[path = "tests/detector_tests.rs"]
mod tests;
