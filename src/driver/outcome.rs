//! Outcomes and events produced by the event driver.

use crate::core::{InvalidTransition, PostureState, State};
use serde::Serialize;

/// Result of asking the driver to move.
///
/// Rejection is an ordinary value: the session is left untouched and the
/// caller decides whether to surface it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(bound = "", tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome<S: State = PostureState> {
    /// The table allowed the move and the session was updated.
    Accepted { from: S, to: S, critical: bool },

    /// No direct path from `from` to `requested`.
    Rejected { from: S, requested: S },
}

impl<S: State> TransitionOutcome<S> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The state entered, if the move was accepted.
    pub fn new_state(&self) -> Option<S> {
        match self {
            Self::Accepted { to, .. } => Some(*to),
            Self::Rejected { .. } => None,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Accepted { critical: true, .. })
    }
}

impl<S: State> From<InvalidTransition<S>> for TransitionOutcome<S> {
    fn from(err: InvalidTransition<S>) -> Self {
        Self::Rejected {
            from: err.from,
            requested: err.to,
        }
    }
}

/// Payload of an accepted transition notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(bound = "")]
pub struct TransitionEvent<S: State = PostureState> {
    pub from: S,
    pub to: S,
    pub critical: bool,
    /// Session transition count after this move
    pub count: u64,
}

/// Notifications delivered to driver listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(bound = "", tag = "event", rename_all = "snake_case")]
pub enum DriverEvent<S: State = PostureState> {
    /// Fired on every accepted transition.
    Transitioned(TransitionEvent<S>),

    /// Fired when an administrative reset returns the session to its start.
    Reset { from: S },
}
