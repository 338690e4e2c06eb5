//! Posture: a security posture automaton with a simulated attack driver
//!
//! The monitored system is always in one of five escalation levels,
//! Normal through Blocked. A static transition table decides which moves
//! are legal; an event driver owns the mutable session and turns severity
//! reports or direct requests into validated transitions.
//!
//! # Core Concepts
//!
//! - **State**: `PostureState` and the generic `State` trait
//! - **Transition table**: explicit (from, to) pairs with trigger labels
//! - **Event driver**: owns the session, notifies listeners on change
//! - **Stimulus**: injectable attack source, random or scripted
//!
//! Rejected moves are ordinary values, never panics or errors to
//! propagate.
//!
//! # Example
//!
//! ```rust
//! use posture::core::PostureState;
//! use posture::driver::{EventDriver, TransitionOutcome};
//!
//! let mut driver = EventDriver::posture();
//! driver.subscribe(|event| println!("{event:?}"));
//!
//! // Severity 1 escalates Normal to Suspicious
//! assert!(driver.report_severity(1).is_accepted());
//!
//! // Suspicious cannot jump straight to Blocked
//! assert_eq!(
//!     driver.report_severity(4),
//!     TransitionOutcome::Rejected {
//!         from: PostureState::Suspicious,
//!         requested: PostureState::Blocked,
//!     }
//! );
//!
//! driver.reset();
//! assert_eq!(driver.current_state(), PostureState::Normal);
//! assert_eq!(driver.transition_count(), 0);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod driver;
pub mod simulation;
pub mod snapshot;
pub mod stimulus;

// Re-export commonly used types
pub use crate::core::{PostureState, State, TransitionRule, TransitionTable};
pub use crate::driver::{DriverEvent, EventDriver, TransitionOutcome};
