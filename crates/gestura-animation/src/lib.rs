//! Decay curves and the momentum continuation that follows a pan.

mod decay_spec;
mod momentum;

pub use decay_spec::*;
pub use momentum::*;

pub mod prelude {
    pub use crate::decay_spec::{DecaySpec, ExponentialDecaySpec};
    pub use crate::momentum::{MomentumAnimation, MomentumFrame};
}
