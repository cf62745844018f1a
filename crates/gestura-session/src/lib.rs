//! Session orchestration for the gesture layer.
//!
//! A [`GestureSession`] owns one platform adapter, recognizer, governor and
//! momentum continuation, and routes delivered events to consumers it
//! registered itself. Sessions share nothing, so two canvases with their
//! own sessions never see each other's events.

mod consumer;
mod proficiency;
mod sequence;
mod session;
mod signal;
mod state;

pub use consumer::{ConsumerRole, GestureConsumer, ListenerId};
pub use proficiency::*;
pub use sequence::*;
pub use session::*;
pub use signal::*;
pub use state::*;

pub mod prelude {
    pub use crate::consumer::{ConsumerRole, GestureConsumer, ListenerId};
    pub use crate::proficiency::ProficiencyLevel;
    pub use crate::sequence::{Comparison, ConditionKind, GestureSequence, SequenceStep};
    pub use crate::session::{GestureSession, SessionError};
    pub use crate::signal::SessionSignal;
}
