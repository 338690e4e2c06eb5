//! Static transition table and legality checks.

use super::state::{PostureState, State};
use super::transition::{InvalidTransition, TransitionRule};
use serde::Serialize;

/// Immutable set of legal moves between a fixed set of states.
///
/// Tables are built once, either through [`TransitionTable::posture`] or
/// the validating [`TransitionTableBuilder`](crate::builder::TransitionTableBuilder),
/// and never change afterwards.
///
/// # Example
///
/// ```rust
/// use posture::core::{PostureState, TransitionTable};
///
/// let table = TransitionTable::posture();
///
/// assert!(table.can_transition(&PostureState::Normal, &PostureState::Suspicious));
/// assert!(!table.can_transition(&PostureState::Normal, &PostureState::Blocked));
///
/// let next = table.attempt_transition(PostureState::Alert, PostureState::Blocked);
/// assert_eq!(next, Ok(PostureState::Blocked));
/// ```
#[derive(Clone, Debug, Serialize)]
#[serde(bound = "")]
pub struct TransitionTable<S: State> {
    states: Vec<S>,
    rules: Vec<TransitionRule<S>>,
}

impl<S: State> TransitionTable<S> {
    /// Assemble a table from already validated parts.
    pub(crate) fn from_parts(states: Vec<S>, rules: Vec<TransitionRule<S>>) -> Self {
        Self { states, rules }
    }

    /// True iff the table holds an entry for exactly this pair.
    pub fn can_transition(&self, from: &S, to: &S) -> bool {
        self.rule(from, to).is_some()
    }

    /// Pure legality check.
    ///
    /// Returns the requested state when the move is listed. Requesting the
    /// current state is rejected like any other unlisted move.
    pub fn attempt_transition(&self, current: S, requested: S) -> Result<S, InvalidTransition<S>> {
        if self.can_transition(&current, &requested) {
            Ok(requested)
        } else {
            Err(InvalidTransition {
                from: current,
                to: requested,
            })
        }
    }

    pub fn rule(&self, from: &S, to: &S) -> Option<&TransitionRule<S>> {
        self.rules.iter().find(|r| r.matches(from, to))
    }

    /// Rules leaving `from`, in declaration order.
    pub fn outgoing<'a>(&'a self, from: &'a S) -> impl Iterator<Item = &'a TransitionRule<S>> + 'a {
        self.rules.iter().filter(move |r| r.from == *from)
    }

    pub fn rules(&self) -> &[TransitionRule<S>] {
        &self.rules
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }
}

impl TransitionTable<PostureState> {
    /// The dashboard's escalation ladder.
    ///
    /// Each level escalates one step at a time and de-escalates one step
    /// back, except Blocked which only returns to Normal via admin unlock.
    pub fn posture() -> Self {
        use PostureState::*;

        let rules = vec![
            TransitionRule::new(Normal, Suspicious, "1 failed login"),
            TransitionRule::new(Suspicious, Normal, "Successful login"),
            TransitionRule::new(Suspicious, Warning, "2 failed logins"),
            TransitionRule::new(Warning, Suspicious, "5 min no activity"),
            TransitionRule::new(Warning, Alert, "3 failed logins"),
            TransitionRule::new(Alert, Warning, "10 min no activity"),
            TransitionRule::new(Alert, Blocked, "5 failed logins"),
            TransitionRule::new(Blocked, Normal, "Admin unlock"),
        ];

        Self::from_parts(PostureState::ALL.to_vec(), rules)
    }
}

impl Default for TransitionTable<PostureState> {
    fn default() -> Self {
        Self::posture()
    }
}
