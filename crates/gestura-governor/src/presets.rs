//! Device presets and coarse processing-rate levels.

use gestura_foundation::{PerformanceConfig, PerformanceConfigPatch, QualityTier};
use gestura_platform::DeviceTier;

/// Settings applied by
/// [`PerformanceGovernor::apply_device_preset`](crate::PerformanceGovernor::apply_device_preset).
///
/// Fields not mentioned (overflow policy, memory limit, sweep window) keep
/// whatever the caller configured.
pub fn device_preset(tier: DeviceTier) -> PerformanceConfigPatch {
    let (throttle, debounce, queue, fps, quality, adaptive, history, cleanup) = match tier {
        DeviceTier::MobileLowEnd => (50, 100, 5, 30, QualityTier::Low, true, 10, 10_000),
        DeviceTier::MobileHighEnd => (16, 50, 15, 60, QualityTier::High, true, 30, 5_000),
        DeviceTier::DesktopLowEnd => (32, 75, 10, 30, QualityTier::Medium, false, 20, 8_000),
        DeviceTier::DesktopHighEnd => (8, 25, 25, 60, QualityTier::Ultra, false, 50, 3_000),
    };
    PerformanceConfigPatch {
        throttle_ms: Some(throttle),
        debounce_ms: Some(debounce),
        max_queue_size: Some(queue),
        frame_rate: Some(fps),
        quality: Some(quality),
        adaptive_quality: Some(adaptive),
        max_gesture_history: Some(history),
        cleanup_interval_ms: Some(cleanup),
        ..PerformanceConfigPatch::default()
    }
}

/// How much processing headroom the host reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PerformanceLevel {
    Low,
    Medium,
    High,
}

impl PerformanceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceLevel::Low => "low",
            PerformanceLevel::Medium => "medium",
            PerformanceLevel::High => "high",
        }
    }

    /// Retunes the drain interval and debounce window for this level.
    pub fn retune(self, config: &mut PerformanceConfig) {
        match self {
            PerformanceLevel::Low => {
                config.throttle_ms = config.throttle_ms.max(50);
                config.debounce_ms = config.debounce_ms.max(100);
            }
            PerformanceLevel::Medium => {
                config.throttle_ms = 32;
                config.debounce_ms = 75;
            }
            PerformanceLevel::High => {
                config.throttle_ms = config.throttle_ms.min(16);
                config.debounce_ms = config.debounce_ms.min(50);
            }
        }
    }
}
