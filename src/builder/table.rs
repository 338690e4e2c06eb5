//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::builder::validation::validate_table;
use crate::core::{State, TransitionRule, TransitionTable};
use stillwater::validation::Validation;

/// Builder for constructing validated transition tables with a fluent API.
///
/// # Example
///
/// ```rust
/// use posture::builder::TransitionTableBuilder;
/// use posture::core::PostureState::*;
///
/// let table = TransitionTableBuilder::new()
///     .states([Normal, Suspicious])
///     .rule(Normal, Suspicious, "1 failed login")
///     .rule(Suspicious, Normal, "Successful login")
///     .build()
///     .unwrap();
///
/// assert!(table.can_transition(&Normal, &Suspicious));
/// ```
pub struct TransitionTableBuilder<S: State> {
    states: Vec<S>,
    rules: Vec<TransitionRule<S>>,
}

impl<S: State> TransitionTableBuilder<S> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Declare a state. Re-declaring a state is a no-op.
    pub fn state(mut self, state: S) -> Self {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
        self
    }

    /// Declare several states at once.
    pub fn states(self, states: impl IntoIterator<Item = S>) -> Self {
        states.into_iter().fold(self, Self::state)
    }

    /// Add a rule. Self-loops are allowed only when added here explicitly.
    pub fn rule(mut self, from: S, to: S, trigger: impl Into<String>) -> Self {
        self.rules.push(TransitionRule::new(from, to, trigger));
        self
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: TransitionRule<S>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Build the table.
    /// Returns every structural violation at once if the table is malformed.
    pub fn build(self) -> Result<TransitionTable<S>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }
        if self.rules.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        match validate_table(&self.states, &self.rules) {
            Validation::Success(_) => Ok(TransitionTable::from_parts(self.states, self.rules)),
            Validation::Failure(errors) => {
                Err(BuildError::InvalidTable(errors.iter().cloned().collect()))
            }
        }
    }
}

impl<S: State> Default for TransitionTableBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
