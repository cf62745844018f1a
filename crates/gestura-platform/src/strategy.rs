use crate::adapter::PlatformError;
use gestura_foundation::{
    DeviceType, GestureConfigPatch, PanPatch, PinchPatch, Platform, PressurePatch, RotatePatch,
    SwipePatch, TapPatch,
};
use std::str::FromStr;

/// Named platform tweak. Applying one is tracked by the adapter so side
/// effects happen at most once per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Optimization {
    ReduceGestureThresholds,
    IncreaseTouchTolerance,
    EnableSimplifiedGestures,
    OptimizeForSmallScreens,
    StandardGestureThresholds,
    EnableMultiTouch,
    OptimizeForPrecision,
    PreciseGestureDetection,
    EnableWheelZoom,
    SupportRightClickPan,
    HighPrecisionMode,
    PressureSensitiveControls,
    TiltAwareRotation,
    PalmRejection,
    MomentumScroll,
    ForceTouch,
    GestureContinuity,
    SmoothScrolling,
}

impl Optimization {
    pub const ALL: [Optimization; 18] = [
        Optimization::ReduceGestureThresholds,
        Optimization::IncreaseTouchTolerance,
        Optimization::EnableSimplifiedGestures,
        Optimization::OptimizeForSmallScreens,
        Optimization::StandardGestureThresholds,
        Optimization::EnableMultiTouch,
        Optimization::OptimizeForPrecision,
        Optimization::PreciseGestureDetection,
        Optimization::EnableWheelZoom,
        Optimization::SupportRightClickPan,
        Optimization::HighPrecisionMode,
        Optimization::PressureSensitiveControls,
        Optimization::TiltAwareRotation,
        Optimization::PalmRejection,
        Optimization::MomentumScroll,
        Optimization::ForceTouch,
        Optimization::GestureContinuity,
        Optimization::SmoothScrolling,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Optimization::ReduceGestureThresholds => "reduce-gesture-thresholds",
            Optimization::IncreaseTouchTolerance => "increase-touch-tolerance",
            Optimization::EnableSimplifiedGestures => "enable-simplified-gestures",
            Optimization::OptimizeForSmallScreens => "optimize-for-small-screens",
            Optimization::StandardGestureThresholds => "standard-gesture-thresholds",
            Optimization::EnableMultiTouch => "enable-multi-touch",
            Optimization::OptimizeForPrecision => "optimize-for-precision",
            Optimization::PreciseGestureDetection => "precise-gesture-detection",
            Optimization::EnableWheelZoom => "enable-wheel-zoom",
            Optimization::SupportRightClickPan => "support-right-click-pan",
            Optimization::HighPrecisionMode => "high-precision-mode",
            Optimization::PressureSensitiveControls => "pressure-sensitive-controls",
            Optimization::TiltAwareRotation => "tilt-aware-rotation",
            Optimization::PalmRejection => "palm-rejection",
            Optimization::MomentumScroll => "momentum-scroll",
            Optimization::ForceTouch => "force-touch",
            Optimization::GestureContinuity => "gesture-continuity",
            Optimization::SmoothScrolling => "smooth-scrolling",
        }
    }
}

impl FromStr for Optimization {
    type Err = PlatformError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Optimization::ALL
            .iter()
            .copied()
            .find(|opt| opt.as_str() == name)
            .ok_or_else(|| PlatformError::UnknownOptimization(name.to_owned()))
    }
}

/// Threshold overrides and optimizations for one device/platform pairing.
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptationStrategy {
    pub name: &'static str,
    pub platform: Platform,
    pub optimizations: &'static [Optimization],
    pub gesture_config: GestureConfigPatch,
}

impl AdaptationStrategy {
    /// Looks up the strategy for a device/platform pair.
    ///
    /// Pairs without a dedicated strategy (a touch laptop, for instance) get
    /// `None` and keep the caller's base thresholds.
    pub fn for_context(device: DeviceType, platform: Platform) -> Option<AdaptationStrategy> {
        match (device, platform) {
            (DeviceType::Touch, Platform::Mobile) => Some(touch_mobile()),
            (DeviceType::Touch, Platform::Tablet) => Some(touch_tablet()),
            (DeviceType::Mouse, Platform::Desktop) => Some(mouse_desktop()),
            (DeviceType::Stylus, _) => Some(stylus()),
            (DeviceType::Trackpad, Platform::Desktop) => Some(trackpad_macos()),
            _ => None,
        }
    }
}

fn tap(max_duration: u64, max_movement: f32) -> TapPatch {
    TapPatch {
        max_duration: Some(max_duration),
        max_movement: Some(max_movement),
    }
}

fn pan(min_distance: f32, min_velocity: f32) -> PanPatch {
    PanPatch {
        min_distance: Some(min_distance),
        min_velocity: Some(min_velocity),
        ..Default::default()
    }
}

fn pinch(min_scale_change: f32) -> PinchPatch {
    PinchPatch {
        min_scale_change: Some(min_scale_change),
        ..Default::default()
    }
}

fn swipe(min_velocity: f32, min_distance: f32) -> SwipePatch {
    SwipePatch {
        min_velocity: Some(min_velocity),
        min_distance: Some(min_distance),
        ..Default::default()
    }
}

fn touch_mobile() -> AdaptationStrategy {
    AdaptationStrategy {
        name: "touch-mobile",
        platform: Platform::Mobile,
        optimizations: &[
            Optimization::ReduceGestureThresholds,
            Optimization::IncreaseTouchTolerance,
            Optimization::EnableSimplifiedGestures,
            Optimization::OptimizeForSmallScreens,
        ],
        gesture_config: GestureConfigPatch {
            tap: tap(300, 20.0),
            pan: pan(15.0, 0.3),
            pinch: pinch(0.05),
            swipe: swipe(0.8, 100.0),
            ..Default::default()
        },
    }
}

fn touch_tablet() -> AdaptationStrategy {
    AdaptationStrategy {
        name: "touch-tablet",
        platform: Platform::Tablet,
        optimizations: &[
            Optimization::StandardGestureThresholds,
            Optimization::EnableMultiTouch,
            Optimization::OptimizeForPrecision,
        ],
        gesture_config: GestureConfigPatch {
            tap: tap(250, 15.0),
            pan: pan(20.0, 0.5),
            pinch: pinch(0.03),
            swipe: swipe(1.0, 150.0),
            ..Default::default()
        },
    }
}

fn mouse_desktop() -> AdaptationStrategy {
    AdaptationStrategy {
        name: "mouse-desktop",
        platform: Platform::Desktop,
        optimizations: &[
            Optimization::PreciseGestureDetection,
            Optimization::EnableWheelZoom,
            Optimization::SupportRightClickPan,
            Optimization::HighPrecisionMode,
        ],
        gesture_config: GestureConfigPatch {
            tap: tap(200, 5.0),
            pan: pan(5.0, 0.1),
            pinch: pinch(0.01),
            swipe: swipe(2.0, 200.0),
            ..Default::default()
        },
    }
}

fn stylus() -> AdaptationStrategy {
    AdaptationStrategy {
        name: "stylus",
        platform: Platform::Desktop,
        optimizations: &[
            Optimization::PressureSensitiveControls,
            Optimization::HighPrecisionMode,
            Optimization::TiltAwareRotation,
            Optimization::PalmRejection,
        ],
        gesture_config: GestureConfigPatch {
            tap: tap(150, 2.0),
            pan: pan(2.0, 0.05),
            pressure: PressurePatch {
                sensitivity: Some(0.8),
                deadzone: Some(0.1),
                ..Default::default()
            },
            ..Default::default()
        },
    }
}

fn trackpad_macos() -> AdaptationStrategy {
    AdaptationStrategy {
        name: "trackpad-macos",
        platform: Platform::Desktop,
        optimizations: &[
            Optimization::MomentumScroll,
            Optimization::ForceTouch,
            Optimization::GestureContinuity,
            Optimization::SmoothScrolling,
        ],
        gesture_config: GestureConfigPatch {
            pan: PanPatch {
                momentum: Some(true),
                ..pan(10.0, 0.2)
            },
            pinch: PinchPatch {
                snap_to_grid: Some(true),
                ..pinch(0.02)
            },
            rotate: RotatePatch {
                min_angle_change: Some(1.0),
                max_angular_velocity: Some(5.0),
            },
            ..Default::default()
        },
    }
}
