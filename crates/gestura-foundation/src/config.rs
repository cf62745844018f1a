//! Threshold and performance configuration.
//!
//! Every section comes with a patch type whose fields are all optional.
//! Applying a patch overwrites only the fields it sets, so platform strategies
//! and runtime updates can never reset thresholds they do not mention.

use crate::gesture::SwipeDirection;
use crate::gesture_constants::*;
use gestura_core::Millis;
use std::fmt;

macro_rules! config_section {
    (
        $(#[$meta:meta])*
        $name:ident / $patch:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty = $default:expr ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                }
            }
        }

        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $patch {
            $( pub $field: Option<$ty>, )*
        }

        impl $name {
            pub fn apply(&mut self, patch: &$patch) {
                $(
                    if let Some(value) = &patch.$field {
                        self.$field = value.clone();
                    }
                )*
            }
        }

        impl $patch {
            /// Layers `other` on top of `self`; fields set in `other` win.
            pub fn merge(&mut self, other: &$patch) {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )*
            }

            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }
        }
    };
}

config_section! {
    TapConfig / TapPatch {
        max_duration: Millis = TAP_MAX_DURATION,
        max_movement: f32 = TAP_MAX_MOVEMENT,
    }
}

config_section! {
    DoubleTapConfig / DoubleTapPatch {
        max_interval: Millis = DOUBLE_TAP_MAX_INTERVAL,
        max_distance: f32 = DOUBLE_TAP_MAX_DISTANCE,
    }
}

config_section! {
    LongPressConfig / LongPressPatch {
        min_duration: Millis = LONG_PRESS_MIN_DURATION,
        max_movement: f32 = LONG_PRESS_MAX_MOVEMENT,
        activation_pressure: f32 = LONG_PRESS_ACTIVATION_PRESSURE,
    }
}

config_section! {
    PanConfig / PanPatch {
        min_distance: f32 = PAN_MIN_DISTANCE,
        min_velocity: f32 = PAN_MIN_VELOCITY,
        /// Continue with a decaying momentum after release.
        momentum: bool = true,
        /// Lock translation to the dominant axis once the pan commits.
        directional_lock: bool = false,
    }
}

config_section! {
    PinchConfig / PinchPatch {
        min_scale_change: f32 = PINCH_MIN_SCALE_CHANGE,
        max_scale_velocity: f32 = PINCH_MAX_SCALE_VELOCITY,
        /// Round emitted scales to multiples of `min_scale_change`.
        snap_to_grid: bool = false,
        min_scale: f32 = PINCH_MIN_SCALE,
        max_scale: f32 = PINCH_MAX_SCALE,
    }
}

config_section! {
    RotateConfig / RotatePatch {
        min_angle_change: f32 = ROTATE_MIN_ANGLE_CHANGE,
        max_angular_velocity: f32 = ROTATE_MAX_ANGULAR_VELOCITY,
    }
}

config_section! {
    SwipeConfig / SwipePatch {
        min_velocity: f32 = SWIPE_MIN_VELOCITY,
        max_duration: Millis = SWIPE_MAX_DURATION,
        min_distance: f32 = SWIPE_MIN_DISTANCE,
        directions: Vec<SwipeDirection> = vec![
            SwipeDirection::Up,
            SwipeDirection::Down,
            SwipeDirection::Left,
            SwipeDirection::Right,
        ],
    }
}

impl SwipeConfig {
    pub fn allows(&self, direction: SwipeDirection) -> bool {
        self.directions.contains(&direction)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressureCurve {
    Linear,
    Exponential,
    Logarithmic,
}

config_section! {
    PressureConfig / PressurePatch {
        enabled: bool = true,
        sensitivity: f32 = PRESSURE_SENSITIVITY,
        deadzone: f32 = PRESSURE_DEADZONE,
        curve: PressureCurve = PressureCurve::Linear,
    }
}

impl PressureConfig {
    /// Maps a raw `[0, 1]` reading through deadzone, curve and sensitivity.
    ///
    /// With pressure disabled the clamped raw value passes through. The
    /// default sensitivity leaves the curve output unscaled.
    pub fn map(&self, raw: f32) -> f32 {
        let raw = if raw.is_finite() {
            raw.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !self.enabled {
            return raw;
        }
        if raw <= self.deadzone {
            return 0.0;
        }
        let span = (1.0 - self.deadzone).max(f32::EPSILON);
        let x = (raw - self.deadzone) / span;
        let shaped = match self.curve {
            PressureCurve::Linear => x,
            PressureCurve::Exponential => x * x,
            PressureCurve::Logarithmic => (1.0 + x * (std::f32::consts::E - 1.0)).ln(),
        };
        (shaped * self.sensitivity / PRESSURE_SENSITIVITY).clamp(0.0, 1.0)
    }
}

config_section! {
    MultiTouchConfig / MultiTouchPatch {
        max_touches: usize = MULTI_TOUCH_MAX_TOUCHES,
        settle_time: Millis = MULTI_TOUCH_SETTLE_TIME,
    }
}

/// Per-gesture thresholds consumed by the recognition engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureConfig {
    pub tap: TapConfig,
    pub double_tap: DoubleTapConfig,
    pub long_press: LongPressConfig,
    pub pan: PanConfig,
    pub pinch: PinchConfig,
    pub rotate: RotateConfig,
    pub swipe: SwipeConfig,
    pub pressure: PressureConfig,
    pub multi_touch: MultiTouchConfig,
}

/// Partial [`GestureConfig`]. Untouched sections stay at their defaults,
/// which are all `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureConfigPatch {
    pub tap: TapPatch,
    pub double_tap: DoubleTapPatch,
    pub long_press: LongPressPatch,
    pub pan: PanPatch,
    pub pinch: PinchPatch,
    pub rotate: RotatePatch,
    pub swipe: SwipePatch,
    pub pressure: PressurePatch,
    pub multi_touch: MultiTouchPatch,
}

impl GestureConfigPatch {
    pub fn merge(&mut self, other: &GestureConfigPatch) {
        self.tap.merge(&other.tap);
        self.double_tap.merge(&other.double_tap);
        self.long_press.merge(&other.long_press);
        self.pan.merge(&other.pan);
        self.pinch.merge(&other.pinch);
        self.rotate.merge(&other.rotate);
        self.swipe.merge(&other.swipe);
        self.pressure.merge(&other.pressure);
        self.multi_touch.merge(&other.multi_touch);
    }

    pub fn is_empty(&self) -> bool {
        self.tap.is_empty()
            && self.double_tap.is_empty()
            && self.long_press.is_empty()
            && self.pan.is_empty()
            && self.pinch.is_empty()
            && self.rotate.is_empty()
            && self.swipe.is_empty()
            && self.pressure.is_empty()
            && self.multi_touch.is_empty()
    }
}

impl GestureConfig {
    pub fn apply(&mut self, patch: &GestureConfigPatch) {
        self.tap.apply(&patch.tap);
        self.double_tap.apply(&patch.double_tap);
        self.long_press.apply(&patch.long_press);
        self.pan.apply(&patch.pan);
        self.pinch.apply(&patch.pinch);
        self.rotate.apply(&patch.rotate);
        self.swipe.apply(&patch.swipe);
        self.pressure.apply(&patch.pressure);
        self.multi_touch.apply(&patch.multi_touch);
    }

    pub fn merged(&self, patch: &GestureConfigPatch) -> GestureConfig {
        let mut config = self.clone();
        config.apply(patch);
        config
    }

    /// Applies `patch` only if the result validates.
    pub fn try_apply(&mut self, patch: &GestureConfigPatch) -> Result<(), ConfigError> {
        let candidate = self.merged(patch);
        if let Err(err) = candidate.validate() {
            log::warn!("rejected gesture config patch: {err}");
            return Err(err);
        }
        *self = candidate;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("tap.max_movement", self.tap.max_movement)?;
        non_negative("double_tap.max_distance", self.double_tap.max_distance)?;
        non_negative("long_press.max_movement", self.long_press.max_movement)?;
        unit_range(
            "long_press.activation_pressure",
            self.long_press.activation_pressure,
        )?;
        non_negative("pan.min_distance", self.pan.min_distance)?;
        non_negative("pan.min_velocity", self.pan.min_velocity)?;
        non_negative("pinch.min_scale_change", self.pinch.min_scale_change)?;
        non_negative("pinch.max_scale_velocity", self.pinch.max_scale_velocity)?;
        non_negative("pinch.min_scale", self.pinch.min_scale)?;
        non_negative("pinch.max_scale", self.pinch.max_scale)?;
        if self.pinch.min_scale > self.pinch.max_scale {
            return Err(ConfigError::InvertedRange {
                min: "pinch.min_scale",
                max: "pinch.max_scale",
            });
        }
        non_negative("rotate.min_angle_change", self.rotate.min_angle_change)?;
        non_negative(
            "rotate.max_angular_velocity",
            self.rotate.max_angular_velocity,
        )?;
        non_negative("swipe.min_velocity", self.swipe.min_velocity)?;
        non_negative("swipe.min_distance", self.swipe.min_distance)?;
        non_negative("pressure.sensitivity", self.pressure.sensitivity)?;
        unit_range("pressure.deadzone", self.pressure.deadzone)?;
        if self.multi_touch.max_touches == 0 {
            return Err(ConfigError::Zero {
                field: "multi_touch.max_touches",
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    Low,
    Medium,
    High,
    Ultra,
}

impl QualityTier {
    pub fn lower(self) -> QualityTier {
        match self {
            QualityTier::Ultra => QualityTier::High,
            QualityTier::High => QualityTier::Medium,
            QualityTier::Medium | QualityTier::Low => QualityTier::Low,
        }
    }

    pub fn higher(self) -> QualityTier {
        match self {
            QualityTier::Low => QualityTier::Medium,
            QualityTier::Medium => QualityTier::High,
            QualityTier::High | QualityTier::Ultra => QualityTier::Ultra,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
            QualityTier::Ultra => "ultra",
        }
    }
}

/// What the governor does with an event that arrives at a full queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Refuse the incoming event.
    RejectNewest,
    /// Evict the oldest queued event to make room.
    DropOldest,
}

config_section! {
    /// Governor and housekeeping settings.
    PerformanceConfig / PerformanceConfigPatch {
        debounce_ms: Millis = DEBOUNCE_MS,
        /// Interval of the drain tick.
        throttle_ms: Millis = THROTTLE_MS,
        max_queue_size: usize = MAX_QUEUE_SIZE,
        overflow: OverflowPolicy = OverflowPolicy::RejectNewest,
        frame_rate: u32 = TARGET_FRAME_RATE,
        quality: QualityTier = QualityTier::High,
        adaptive_quality: bool = true,
        /// Routed events kept for sequence matching and statistics.
        max_gesture_history: usize = MAX_GESTURE_HISTORY,
        /// Idle age after which an active cluster is swept.
        history_window_ms: Millis = HISTORY_WINDOW_MS,
        cleanup_interval_ms: Millis = CLEANUP_INTERVAL_MS,
        memory_limit_bytes: u64 = MEMORY_LIMIT_BYTES,
    }
}

impl PerformanceConfig {
    /// Frame time budget in milliseconds at the target frame rate.
    pub fn frame_budget_ms(&self) -> f32 {
        1000.0 / self.frame_rate.max(1) as f32
    }

    pub fn merged(&self, patch: &PerformanceConfigPatch) -> PerformanceConfig {
        let mut config = self.clone();
        config.apply(patch);
        config
    }

    pub fn try_apply(&mut self, patch: &PerformanceConfigPatch) -> Result<(), ConfigError> {
        let candidate = self.merged(patch);
        if let Err(err) = candidate.validate() {
            log::warn!("rejected performance config patch: {err}");
            return Err(err);
        }
        *self = candidate;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_queue_size == 0 {
            return Err(ConfigError::Zero {
                field: "max_queue_size",
            });
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Zero {
                field: "frame_rate",
            });
        }
        if self.throttle_ms == 0 {
            return Err(ConfigError::Zero {
                field: "throttle_ms",
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NonFinite { field: &'static str },
    Negative { field: &'static str },
    OutOfUnitRange { field: &'static str },
    InvertedRange { min: &'static str, max: &'static str },
    Zero { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field } => write!(f, "{field} is not a finite number"),
            ConfigError::Negative { field } => write!(f, "{field} must not be negative"),
            ConfigError::OutOfUnitRange { field } => write!(f, "{field} must lie within [0, 1]"),
            ConfigError::InvertedRange { min, max } => {
                write!(f, "{min} must not exceed {max}")
            }
            ConfigError::Zero { field } => write!(f, "{field} must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field });
    }
    Ok(())
}

fn unit_range(field: &'static str, value: f32) -> Result<(), ConfigError> {
    non_negative(field, value)?;
    if value > 1.0 {
        return Err(ConfigError::OutOfUnitRange { field });
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
