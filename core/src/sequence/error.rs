//! Error types for cycle construction and sequencing

use thiserror::Error;

/// Errors from building or running a presentation cycle
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    /// A cycle is already in flight on this sequencer
    #[error("a cycle is already in flight")]
    Busy,

    /// Cycles must contain at least one phase
    #[error("a cycle must contain at least one phase")]
    EmptyCycle,

    /// Phase durations must be strictly positive and fit in milliseconds
    #[error("unusable phase duration ({millis}ms)")]
    InvalidDuration { millis: u64 },
}
