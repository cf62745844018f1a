//! Performance governor for the gesture layer.
//!
//! Recognized events are queued, debounced and drained on a throttle
//! interval. While the renderer runs over its frame budget only pan, pinch
//! and rotate are delivered. Frame and memory samples reported by the host
//! drive quality signals, cleanup passes and [`PerformanceStats`].

mod governor;
mod presets;
mod queue;
mod stats;
mod window;

pub use governor::*;
pub use presets::*;
pub use queue::*;
pub use stats::*;

pub mod prelude {
    pub use crate::governor::{Drain, GovernorSignal, PerformanceGovernor, QualityDirection};
    pub use crate::presets::PerformanceLevel;
    pub use crate::queue::QueueOutcome;
    pub use crate::stats::{PerformanceStats, Recommendation};
}
