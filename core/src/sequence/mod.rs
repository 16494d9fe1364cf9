//! Phase sequencing
//!
//! This module provides:
//! - **Phases**: timed steps of a presentation cycle (enter/hold/exit)
//! - **Cycles**: the atomic unit of execution, one per trigger event
//! - **Sequencer**: the state machine that drives a cycle to completion
//!
//! A cycle, once started, runs each phase for its full duration with no
//! interleaving from another trigger. The only early exit is shutdown,
//! honored at every phase boundary and during every phase wait.

mod error;
mod phase;
mod sequencer;


pub use error::SequenceError;
pub use phase::{Cycle, Phase, PhaseContent, VisualState};
pub use sequencer::{CycleOutcome, PhaseSequencer};
