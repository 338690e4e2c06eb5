//! Structural checks for transition tables.
//!
//! Every check runs and all violations are reported together, so a
//! malformed table can be fixed in one pass.

use crate::builder::error::TableViolation;
use crate::core::{State, TransitionRule};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of one structural check.
pub type Checked = Validation<(), NonEmptyVec<TableViolation>>;

/// Run all structural checks, accumulating every violation.
pub fn validate_table<S: State>(states: &[S], rules: &[TransitionRule<S>]) -> Checked {
    let mut checks: Vec<Checked> = Vec::new();

    checks.extend(check_unique_pairs(rules));
    checks.extend(check_declared_states(states, rules));
    checks.extend(check_outgoing(states, rules));

    Validation::all_vec(checks).map(|_| ())
}

fn check_unique_pairs<S: State>(rules: &[TransitionRule<S>]) -> Vec<Checked> {
    let mut seen = HashSet::new();
    rules
        .iter()
        .map(|rule| {
            if seen.insert((rule.from, rule.to)) {
                Validation::success(())
            } else {
                Validation::fail(TableViolation::DuplicatePair {
                    from: rule.from.name().to_string(),
                    to: rule.to.name().to_string(),
                })
            }
        })
        .collect()
}

fn check_declared_states<S: State>(states: &[S], rules: &[TransitionRule<S>]) -> Vec<Checked> {
    let declared: HashSet<&S> = states.iter().collect();
    let mut reported = HashSet::new();

    rules
        .iter()
        .flat_map(|rule| [rule.from, rule.to])
        .filter(|s| !declared.contains(s) && reported.insert(*s))
        .map(|s| {
            Validation::fail(TableViolation::UndeclaredState {
                state: s.name().to_string(),
            })
        })
        .collect()
}

fn check_outgoing<S: State>(states: &[S], rules: &[TransitionRule<S>]) -> Vec<Checked> {
    states
        .iter()
        .map(|state| {
            if rules.iter().any(|r| r.from == *state) {
                Validation::success(())
            } else {
                Validation::fail(TableViolation::DeadEnd {
                    state: state.name().to_string(),
                })
            }
        })
        .collect()
}
