//! Builder API for constructing validated transition tables.

pub mod error;
pub mod table;
pub mod validation;

pub use error::{BuildError, TableViolation};
pub use table::TransitionTableBuilder;
pub use validation::validate_table;
