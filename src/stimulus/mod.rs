//! Attack stimulus for the event driver.

mod attack;
mod source;

pub use attack::{AttackEvent, AttackKind};
pub use source::{RandomStimulus, ScriptedStimulus, StimulusSource};
