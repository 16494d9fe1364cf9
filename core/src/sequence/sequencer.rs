//! The phase sequencer state machine
//!
//! Drives one cycle at a time through its phases. Transitions are purely
//! time-driven: each phase holds for its configured duration, then the next
//! begins. Idle is the only state that accepts a new cycle; starting a
//! cycle while one is in flight is rejected explicitly rather than left to
//! incidental interleaving.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use super::error::SequenceError;
use super::phase::Cycle;
use crate::presenter::Presenter;
use crate::shutdown::ShutdownSignal;

/// How a cycle finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All phases ran their full duration
    Completed,
    /// Shutdown arrived mid-cycle; the presenter was hidden and the
    /// remaining phases skipped
    Cancelled,
}

/// Runs cycles for a single overlay instance.
///
/// Exclusively owns the overlay's presentation resource: the presenter is
/// hidden (resource released) before a cycle ends, so the next cycle can
/// never observe a half-torn-down display. `run_cycle` takes `&self` so the
/// sequencer can be shared; the in-flight guard, not the borrow checker, is
/// what enforces non-overlap.
pub struct PhaseSequencer<P: Presenter> {
    presenter: Mutex<P>,
    shutdown: ShutdownSignal,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag even if the cycle future is dropped mid-run.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<P: Presenter> PhaseSequencer<P> {
    pub fn new(presenter: P, shutdown: ShutdownSignal) -> Self {
        Self {
            presenter: Mutex::new(presenter),
            shutdown,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a new cycle may be accepted.
    pub fn is_idle(&self) -> bool {
        !self.in_flight.load(Ordering::SeqCst)
    }

    /// Run one cycle to completion.
    ///
    /// Returns `SequenceError::Busy` if a cycle is already in flight;
    /// the caller decides whether that means "wait for the next cadence"
    /// (poll loops) or "drop the trigger" (push ingestion).
    pub async fn run_cycle(&self, cycle: Cycle) -> Result<CycleOutcome, SequenceError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SequenceError::Busy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        Ok(self.drive(cycle).await)
    }

    async fn drive(&self, cycle: Cycle) -> CycleOutcome {
        let mut shutdown = self.shutdown.clone();

        for phase in cycle.into_phases() {
            if shutdown.is_cancelled() {
                self.presenter.lock().await.hide();
                return CycleOutcome::Cancelled;
            }

            debug!(
                visual = ?phase.visual,
                duration_ms = phase.duration.as_millis() as u64,
                "phase begins"
            );

            {
                let mut presenter = self.presenter.lock().await;
                if phase.visual.presents() {
                    presenter.show(&phase.content, phase.visual);
                } else {
                    // Exiting/Cleared: release the resource at the
                    // transition, not only at teardown
                    presenter.hide();
                }
            }

            tokio::select! {
                _ = sleep(phase.duration) => {}
                _ = shutdown.cancelled() => {
                    self.presenter.lock().await.hide();
                    return CycleOutcome::Cancelled;
                }
            }
        }

        CycleOutcome::Completed
    }
}
