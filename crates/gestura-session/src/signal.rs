use crate::proficiency::ProficiencyLevel;
use crate::sequence::SequenceUpdate;
use gestura_animation::MomentumFrame;
use gestura_foundation::{GestureContext, GestureType};
use gestura_governor::GovernorSignal;
use gestura_platform::{DeviceTier, PlatformEffect};
use std::rc::Rc;

/// Notification queued on a session's outbox until the host drains it with
/// [`GestureSession::take_signals`](crate::GestureSession::take_signals).
#[derive(Clone, Debug, PartialEq)]
pub enum SessionSignal {
    Initialized {
        tier: DeviceTier,
    },
    /// The environment changed and future events carry this context.
    ContextChanged(Rc<GestureContext>),
    Platform(PlatformEffect),
    Governor(GovernorSignal),
    Momentum(MomentumFrame),
    Sequence(SequenceUpdate),
    Proficiency {
        gesture_type: GestureType,
        proficiency: f32,
        level: ProficiencyLevel,
    },
    /// Abandoned clusters and orphaned touch contacts reclaimed by the
    /// cleanup sweep.
    ClustersEvicted(usize),
}

impl SessionSignal {
    pub fn name(&self) -> &'static str {
        match self {
            SessionSignal::Initialized { .. } => "initialized",
            SessionSignal::ContextChanged(_) => "context-changed",
            SessionSignal::Platform(_) => "platform",
            SessionSignal::Governor(_) => "governor",
            SessionSignal::Momentum(_) => "momentum",
            SessionSignal::Sequence(_) => "sequence",
            SessionSignal::Proficiency { .. } => "proficiency",
            SessionSignal::ClustersEvicted(_) => "clusters-evicted",
        }
    }
}
