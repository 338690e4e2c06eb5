//! Session ownership and stimulus handling.
//!
//! This is the mutable shell around the pure core: the driver owns the
//! `AutomatonSession`, validates every request against the table and
//! notifies listeners so rendering stays decoupled from state changes.

mod machine;
mod outcome;
mod session;

pub use machine::{severity_target, EventDriver, Listener};
pub use outcome::{DriverEvent, TransitionEvent, TransitionOutcome};
pub use session::AutomatonSession;
