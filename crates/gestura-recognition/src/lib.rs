//! Gesture recognition engine.
//!
//! [`GestureRecognizer`] consumes normalized raw input and keeps one state
//! machine per logical input cluster (the current touch cluster, the mouse,
//! the stylus). Continuous gestures (pan, pinch, rotate, pressure-hold,
//! multi-finger swipe) are emitted while a cluster is live; discrete ones
//! (tap, double-tap, long-press, swipe) only when it ends.

mod cluster;
mod contacts;
mod criteria;
mod engine;

pub use criteria::DiscreteGesture;
pub use engine::*;
