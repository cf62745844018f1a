//! End-of-cluster classification.
//!
//! Checked in a fixed order: long-press, then tap, then swipe. The first
//! match wins, so at most one discrete gesture comes out of a cluster even
//! when thresholds are configured to overlap.

use gestura_core::Millis;
use gestura_foundation::{GestureConfig, SwipeDirection};
use gestura_geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscreteGesture {
    LongPress,
    Tap,
    Swipe(SwipeDirection),
}

/// What a cluster accumulated by the time it ended.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ClusterSummary {
    pub duration: Millis,
    /// Farthest distance from the starting position at any point.
    pub max_travel: f32,
    /// Final position relative to the starting position.
    pub displacement: Point,
    pub velocity: Point,
    pub peak_pressure: f32,
}

pub(crate) fn classify(
    summary: &ClusterSummary,
    config: &GestureConfig,
    supports_pressure: bool,
) -> Option<DiscreteGesture> {
    if is_long_press(summary, config, supports_pressure) {
        return Some(DiscreteGesture::LongPress);
    }
    if is_tap(summary, config) {
        return Some(DiscreteGesture::Tap);
    }
    swipe_direction(summary, config).map(DiscreteGesture::Swipe)
}

fn is_long_press(summary: &ClusterSummary, config: &GestureConfig, supports_pressure: bool) -> bool {
    let long_press = &config.long_press;
    summary.duration >= long_press.min_duration
        && summary.max_travel <= long_press.max_movement
        && (!supports_pressure || summary.peak_pressure >= long_press.activation_pressure)
}

fn is_tap(summary: &ClusterSummary, config: &GestureConfig) -> bool {
    summary.duration <= config.tap.max_duration && summary.max_travel <= config.tap.max_movement
}

fn swipe_direction(summary: &ClusterSummary, config: &GestureConfig) -> Option<SwipeDirection> {
    let swipe = &config.swipe;
    let qualifies = summary.velocity.length() >= swipe.min_velocity
        && summary.duration <= swipe.max_duration
        && summary.displacement.length() >= swipe.min_distance;
    if !qualifies {
        return None;
    }
    let direction = SwipeDirection::from_velocity(summary.velocity);
    swipe.allows(direction).then_some(direction)
}
