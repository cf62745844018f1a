//! Shared vocabulary of the gesture layer.
//!
//! Raw input samples flow in, [`GestureEvent`]s flow out, and
//! [`GestureConfig`]/[`PerformanceConfig`] carry the thresholds in between.

mod config;
mod context;
mod gesture;
pub mod gesture_constants;
mod input;

pub use config::*;
pub use context::*;
pub use gesture::*;
pub use input::*;

pub mod prelude {
    pub use crate::config::{GestureConfig, GestureConfigPatch, PerformanceConfig, QualityTier};
    pub use crate::context::{DeviceType, GestureContext, InputType, Platform};
    pub use crate::gesture::{
        ClusterKey, GestureData, GestureEvent, GestureState, GestureType, SwipeDirection,
    };
    pub use crate::input::{
        PointerButton, PointerButtons, PointerId, PointerPhase, RawInput, TouchFrame, TouchPoint,
    };
    pub use gestura_geometry::{Point, Size};
}
