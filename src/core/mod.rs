//! Core automaton types.
//!
//! This module contains the pure part of the posture automaton:
//! - State definitions via the `State` trait and `PostureState`
//! - Transition rules and the static transition table
//! - Bounded history of accepted transitions
//!
//! Nothing here mutates shared state. The driver module owns the
//! session and decides when to apply a result.

mod history;
mod state;
mod table;
mod transition;

pub use history::{TransitionHistory, TransitionRecord};
pub use state::{DiagramStyle, PostureState, State};
pub use table::TransitionTable;
pub use transition::{InvalidTransition, TransitionKind, TransitionRule};
