//! Default gesture thresholds.
//!
//! Distances are in logical pixels, durations in milliseconds and velocities
//! in pixels per millisecond. Platform strategies override a subset of these;
//! anything they leave alone keeps the value below.

use gestura_core::Millis;

/// Longest contact that still counts as a tap.
pub const TAP_MAX_DURATION: Millis = 250;

/// Tap slop. Moving further than this from the press position rules a tap out.
pub const TAP_MAX_MOVEMENT: f32 = 10.0;

/// Two taps closer than this in time form a double tap.
pub const DOUBLE_TAP_MAX_INTERVAL: Millis = 300;

pub const DOUBLE_TAP_MAX_DISTANCE: f32 = 30.0;

pub const LONG_PRESS_MIN_DURATION: Millis = 1000;

pub const LONG_PRESS_MAX_MOVEMENT: f32 = 20.0;

/// Pressure a long press must reach on hardware that reports pressure.
pub const LONG_PRESS_ACTIVATION_PRESSURE: f32 = 0.7;

pub const PAN_MIN_DISTANCE: f32 = 15.0;

pub const PAN_MIN_VELOCITY: f32 = 0.3;

pub const PINCH_MIN_SCALE_CHANGE: f32 = 0.05;

pub const PINCH_MAX_SCALE_VELOCITY: f32 = 5.0;

pub const PINCH_MIN_SCALE: f32 = 0.1;

pub const PINCH_MAX_SCALE: f32 = 5.0;

/// Degrees.
pub const ROTATE_MIN_ANGLE_CHANGE: f32 = 5.0;

pub const ROTATE_MAX_ANGULAR_VELOCITY: f32 = 10.0;

pub const SWIPE_MIN_VELOCITY: f32 = 1.0;

pub const SWIPE_MAX_DURATION: Millis = 500;

pub const SWIPE_MIN_DISTANCE: f32 = 100.0;

pub const PRESSURE_SENSITIVITY: f32 = 0.7;

pub const PRESSURE_DEADZONE: f32 = 0.1;

pub const MULTI_TOUCH_MAX_TOUCHES: usize = 5;

/// Three or more contacts must stay down this long before a multi-finger
/// gesture commits. Fingers rarely land in the same frame.
pub const MULTI_TOUCH_SETTLE_TIME: Millis = 200;

/// Wheel-down zooms out by this factor, wheel-up zooms in by its counterpart.
pub const WHEEL_ZOOM_OUT_SCALE: f32 = 0.9;

pub const WHEEL_ZOOM_IN_SCALE: f32 = 1.1;

/// Assumed spacing of wheel notches, used to turn a delta into a scale
/// velocity.
pub const WHEEL_NOTCH_MILLIS: f32 = 16.0;

pub const DEBOUNCE_MS: Millis = 50;

pub const THROTTLE_MS: Millis = 16;

pub const MAX_QUEUE_SIZE: usize = 20;

pub const TARGET_FRAME_RATE: u32 = 60;

pub const MAX_GESTURE_HISTORY: usize = 30;

/// Idle time after which an active cluster is considered abandoned.
pub const HISTORY_WINDOW_MS: Millis = 5000;

pub const CLEANUP_INTERVAL_MS: Millis = 5000;

pub const MEMORY_LIMIT_BYTES: u64 = 100 * 1024 * 1024;
