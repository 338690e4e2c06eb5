//! Errors raised while building a transition table.

use thiserror::Error;

/// A single problem found in a candidate transition table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableViolation {
    #[error("Duplicate transition from '{from}' to '{to}'")]
    DuplicatePair { from: String, to: String },

    #[error("State '{state}' has no outgoing transition")]
    DeadEnd { state: String },

    #[error("Transition references undeclared state '{state}'")]
    UndeclaredState { state: String },
}

/// Errors that can occur when building a transition table.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No states declared. Call .states(..) or .state(..) before .build()")]
    NoStates,

    #[error("No transitions defined. Add at least one rule")]
    NoTransitions,

    #[error("Transition table is invalid: {}", format_violations(.0))]
    InvalidTable(Vec<TableViolation>),
}

fn format_violations(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
