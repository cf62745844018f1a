//! Testing utilities and harness for Gestura

pub mod assertions;
pub mod fixtures;
pub mod recording;
pub mod script;

pub use assertions::*;
pub use fixtures::*;
pub use gestura_core::ManualClock;
pub use recording::*;
pub use script::*;

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::fixtures::{event_with, sample_event};
    pub use crate::recording::{gesture_types, RecordingConsumer};
    pub use crate::script::{contexts, InputScript};
    pub use gestura_core::ManualClock;
}
