//! Transition rules and the rejection value.

use super::state::State;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a rule relative to state rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Moves to a higher-ranked state.
    Escalation,
    /// Moves to a lower- or equal-ranked state, e.g. "Admin unlock".
    DeEscalation,
}

impl TransitionKind {
    /// Classify a move by comparing ranks.
    pub fn between<S: State>(from: &S, to: &S) -> Self {
        if to.rank() > from.rank() {
            Self::Escalation
        } else {
            Self::DeEscalation
        }
    }
}

/// A legal move between two states with the trigger that causes it.
///
/// # Example
///
/// ```rust
/// use posture::core::{PostureState, TransitionKind, TransitionRule};
///
/// let rule = TransitionRule::new(PostureState::Blocked, PostureState::Normal, "Admin unlock");
/// assert_eq!(rule.kind, TransitionKind::DeEscalation);
/// assert!(rule.matches(&PostureState::Blocked, &PostureState::Normal));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRule<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Human readable trigger, e.g. "3 failed logins"
    pub trigger: String,
    /// Escalation or de-escalation
    pub kind: TransitionKind,
}

impl<S: State> TransitionRule<S> {
    pub fn new(from: S, to: S, trigger: impl Into<String>) -> Self {
        Self {
            from,
            to,
            trigger: trigger.into(),
            kind: TransitionKind::between(&from, &to),
        }
    }

    /// Exact (from, to) match. No wildcards.
    pub fn matches(&self, from: &S, to: &S) -> bool {
        self.from == *from && self.to == *to
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// A requested move that has no entry in the transition table.
///
/// This is an expected outcome, not a fault: the driver turns it into a
/// rejected `TransitionOutcome` and leaves the session untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("No direct transition from '{}' to '{}'", .from.name(), .to.name())]
pub struct InvalidTransition<S: State> {
    pub from: S,
    pub to: S,
}
