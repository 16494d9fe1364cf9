//! The poll-driven overlay loop
//!
//! Wakes on a fixed cadence, fetches a snapshot, asks the change detector
//! whether to trigger, and if so runs one full cycle to completion before
//! sleeping again. A fetch failure skips straight to the next sleep: no
//! cycle, previous snapshot retained untouched.

use std::time::Duration;

use tracing::{debug, warn};

use crate::presenter::Presenter;
use crate::sequence::{Cycle, CycleOutcome, PhaseSequencer};
use crate::shutdown::ShutdownSignal;
use crate::snapshot::{ChangeDetector, SnapshotFetcher, StreamSnapshot};

/// One poll-driven overlay instance's loop.
///
/// Owns its own previous-accepted snapshot; no state is shared with any
/// other overlay instance. The previous pointer is updated only when a
/// cycle is started, never mid-cycle and never on a failed fetch.
pub struct PollLoop<F, P, B>
where
    F: SnapshotFetcher,
    P: Presenter,
    B: FnMut(&StreamSnapshot) -> Option<Cycle> + Send,
{
    fetcher: F,
    detector: ChangeDetector,
    sequencer: PhaseSequencer<P>,
    build_cycle: B,
    interval: Duration,
    shutdown: ShutdownSignal,
    previous: Option<StreamSnapshot>,
}

impl<F, P, B> PollLoop<F, P, B>
where
    F: SnapshotFetcher,
    P: Presenter,
    B: FnMut(&StreamSnapshot) -> Option<Cycle> + Send,
{
    pub fn new(
        fetcher: F,
        detector: ChangeDetector,
        sequencer: PhaseSequencer<P>,
        build_cycle: B,
        interval: Duration,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            fetcher,
            detector,
            sequencer,
            build_cycle,
            interval,
            shutdown,
            previous: None,
        }
    }

    /// Loop until shutdown. Never returns early on an error.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => break,
            }

            let current = match self.fetcher.fetch().await {
                Ok(snapshot) => snapshot,
                Err(error) => {
                    // No update available; previous snapshot stays as-is
                    warn!(%error, "snapshot fetch failed, skipping this poll");
                    continue;
                }
            };

            if !self.detector.should_trigger(self.previous.as_ref(), &current) {
                debug!("tracked field unchanged, no cycle");
                continue;
            }

            let Some(cycle) = (self.build_cycle)(&current) else {
                debug!("trigger produced no presentable cycle");
                continue;
            };

            self.previous = Some(current);

            match self.sequencer.run_cycle(cycle).await {
                Ok(CycleOutcome::Completed) => {}
                Ok(CycleOutcome::Cancelled) => break,
                // Impossible by construction: this loop is the sequencer's
                // only caller and awaits each cycle to completion
                Err(error) => warn!(%error, "cycle rejected, waiting for next cadence"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;
    use crate::sequence::PhaseContent;
    use crate::shutdown;
    use crate::snapshot::{FetchError, TrackedField};
    use crate::test_support::{RecordingPresenter, ScriptedFetcher, snapshot_with_title};

    fn title_swap(snapshot: &StreamSnapshot) -> Option<Cycle> {
        Cycle::swap(PhaseContent::text(&snapshot.playing.title), 800, 100).ok()
    }

    async fn run_scripted(
        script: Vec<Result<StreamSnapshot, FetchError>>,
        virtual_secs: u64,
    ) -> crate::test_support::EventLog {
        let (controller, signal) = shutdown::channel();
        let (presenter, log) = RecordingPresenter::new();
        let poll = PollLoop::new(
            ScriptedFetcher::new(script),
            ChangeDetector::new(TrackedField::NowPlayingTitle),
            PhaseSequencer::new(presenter, signal.clone()),
            title_swap,
            Duration::from_secs(5),
            signal,
        );

        let handle = tokio::spawn(poll.run());
        sleep(Duration::from_secs(virtual_secs)).await;
        controller.shutdown();
        handle.await.unwrap();
        log
    }

    #[tokio::test(start_paused = true)]
    async fn identical_polls_trigger_exactly_one_transition() {
        let log = run_scripted(
            vec![
                Ok(snapshot_with_title("X")),
                Ok(snapshot_with_title("X")),
                Ok(snapshot_with_title("X")),
            ],
            60,
        )
        .await;

        // First observation triggers; identical values never again
        assert_eq!(log.shown_texts(), vec!["X".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn title_change_triggers_one_cycle_with_the_new_title() {
        let log = run_scripted(
            vec![Ok(snapshot_with_title("X")), Ok(snapshot_with_title("Y"))],
            60,
        )
        .await;

        assert_eq!(log.shown_texts(), vec!["X".to_string(), "Y".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_failure_retains_the_previous_snapshot() {
        let log = run_scripted(
            vec![
                Ok(snapshot_with_title("X")),
                Err(FetchError::Unavailable {
                    reason: "flaky".to_string(),
                }),
                // Same value again: must NOT re-trigger, proving the
                // previous snapshot survived the failed iteration
                Ok(snapshot_with_title("X")),
            ],
            60,
        )
        .await;

        assert_eq!(log.shown_texts(), vec!["X".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_failure_never_stops_the_loop() {
        let log = run_scripted(
            vec![
                Err(FetchError::Unavailable {
                    reason: "down".to_string(),
                }),
                Err(FetchError::Unavailable {
                    reason: "still down".to_string(),
                }),
                Ok(snapshot_with_title("late")),
            ],
            60,
        )
        .await;

        assert_eq!(log.shown_texts(), vec!["late".to_string()]);
    }
}
