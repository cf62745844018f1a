//! Host environment detection and per-platform adaptation.
//!
//! [`ContextDetector`] turns an [`Environment`] report into a
//! [`GestureContext`](gestura_foundation::GestureContext).
//! [`PlatformAdapter`] picks the matching [`AdaptationStrategy`], layers its
//! threshold overrides onto a base configuration and normalizes raw input
//! before it reaches the recognizer.

mod adapter;
mod detector;
mod environment;
mod strategy;

pub use adapter::*;
pub use detector::*;
pub use environment::*;
pub use strategy::*;

pub mod prelude {
    pub use crate::adapter::{Feature, PlatformAdapter, PlatformEffect};
    pub use crate::detector::{ContextDetector, DeviceTier};
    pub use crate::environment::Environment;
    pub use crate::strategy::{AdaptationStrategy, Optimization};
}
