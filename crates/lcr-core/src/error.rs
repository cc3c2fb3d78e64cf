//! # Error Types
//!
//! The reconciler itself cannot fail on well-formed input, so the only
//! error in this crate guards the boundary where state names arrive as
//! text (scenario files, command-line arguments).

use thiserror::Error;

/// A lifecycle state name did not match any of the six known states.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown lifecycle state {value:?}; expected one of START1, START2, MID1, MID2, FINAL1, FINAL2")]
pub struct ParseStateError {
    /// The rejected input, as supplied.
    pub value: String,
}

impl ParseStateError {
    pub(crate) fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}
