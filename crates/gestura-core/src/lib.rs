//! Runtime primitives for the gesture layer.
//!
//! Everything here is host-agnostic: time is read through [`Clock`] so that
//! sweeps, drains and momentum can be driven deterministically in tests.

pub mod collections;
mod platform;
mod schedule;

pub use platform::*;
pub use schedule::*;

/// Milliseconds on the host's monotonic input timeline.
pub type Millis = u64;

pub mod prelude {
    pub use crate::platform::{Clock, ManualClock, SystemClock};
    pub use crate::schedule::IntervalSchedule;
    pub use crate::Millis;
}
