//! Mutable automaton session.

use crate::core::{PostureState, State};
use serde::{Deserialize, Serialize};

/// Current state plus the count of accepted transitions.
///
/// The count only grows by one per accepted transition and only returns
/// to zero through [`AutomatonSession::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct AutomatonSession<S: State = PostureState> {
    initial: S,
    current: S,
    transition_count: u64,
}

impl<S: State> AutomatonSession<S> {
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            current: initial,
            transition_count: 0,
        }
    }

    pub fn current_state(&self) -> S {
        self.current
    }

    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    pub fn initial_state(&self) -> S {
        self.initial
    }

    /// Persist an accepted transition. Returns the new count.
    pub(crate) fn advance(&mut self, to: S) -> u64 {
        self.current = to;
        self.transition_count += 1;
        self.transition_count
    }

    /// Return to the initial state with a zero count, bypassing the table.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.transition_count = 0;
    }
}

impl Default for AutomatonSession<PostureState> {
    fn default() -> Self {
        Self::new(PostureState::Normal)
    }
}
