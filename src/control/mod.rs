//! Control side of the pipeline: the wall-following law, the safety
//! governor, the optional visual target override, and the behavior state.

mod law;
mod safety;
mod state;
mod tracker;

pub use law::ControlLaw;
pub use safety::SafetyGovernor;
pub use state::BehaviorState;
pub use tracker::{TargetObservation, TargetOverride, TargetTracker};
