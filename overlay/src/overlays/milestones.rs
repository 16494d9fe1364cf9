//! Milestone ticker
//!
//! Rotates through configured slots (first redeem, latest follower, latest
//! subscriber, mascot), revealing each value as fade-in / hold / fade-out.
//! Unlike the polling overlays, rotation is not change-driven: every round
//! shows every populated slot, and the snapshot is only re-fetched every
//! Nth round. A failed or skipped fetch reuses the cached snapshot.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use limelight_core::sequence::{Cycle, CycleOutcome, PhaseContent, PhaseSequencer};
use limelight_core::shutdown::ShutdownSignal;
use limelight_core::snapshot::{RefetchSchedule, SnapshotFetcher, StreamSnapshot};
use limelight_core::Presenter;
use limelight_types::{MilestoneField, MilestonesConfig};

/// Value a slot displays for a given snapshot, `None` when the server has
/// not observed one yet (the slot is skipped for this round).
fn slot_value<'a>(field: &'a MilestoneField, snapshot: &'a StreamSnapshot) -> Option<&'a str> {
    match field {
        MilestoneField::First => snapshot.first.as_deref(),
        MilestoneField::Follower => snapshot.follower.as_deref(),
        MilestoneField::Subscriber => snapshot.subscriber.as_deref(),
        MilestoneField::Mascot(text) => Some(text),
    }
}

/// Run the rotation until shutdown.
pub async fn run<F, P>(
    config: MilestonesConfig,
    fetcher: F,
    presenter: P,
    mut shutdown: ShutdownSignal,
) where
    F: SnapshotFetcher,
    P: Presenter,
{
    let sequencer = PhaseSequencer::new(presenter, shutdown.clone());
    let mut schedule = RefetchSchedule::every(config.refetch_every);
    let mut cached: Option<StreamSnapshot> = None;

    loop {
        if shutdown.is_cancelled() {
            return;
        }

        if schedule.begin_round() {
            match fetcher.fetch().await {
                Ok(snapshot) => cached = Some(snapshot),
                // Keep rotating on whatever we last saw
                Err(error) => warn!(%error, "milestone fetch failed, reusing cached snapshot"),
            }
        }

        let mut presented = false;

        if let Some(snapshot) = cached.as_ref() {
            for slot in &config.slots {
                let Some(value) = slot_value(&slot.field, snapshot) else {
                    debug!(field = ?slot.field, "slot has no value yet, skipped");
                    continue;
                };
                let content = PhaseContent::text(value).with_image(slot.image.clone());
                let cycle = match Cycle::reveal(content, config.fade_ms, config.hold_ms) {
                    Ok(cycle) => cycle,
                    Err(error) => {
                        warn!(%error, "milestone timings rejected, ticker stopping");
                        return;
                    }
                };

                match sequencer.run_cycle(cycle).await {
                    Ok(CycleOutcome::Completed) => presented = true,
                    Ok(CycleOutcome::Cancelled) => return,
                    // Impossible by construction: this loop awaits each
                    // cycle to completion
                    Err(error) => warn!(%error, "milestone cycle rejected"),
                }
            }
        }

        if !presented {
            // Nothing on screen this round; pace the loop instead of
            // re-checking the empty snapshot immediately
            tokio::select! {
                _ = sleep(Duration::from_millis(config.hold_ms)) => {}
                _ = shutdown.cancelled() => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::time::sleep;

    use limelight_core::sequence::VisualState;
    use limelight_core::shutdown;
    use limelight_core::snapshot::FetchError;
    use limelight_types::MilestoneSlot;

    use super::*;

    struct ScriptedFetcher {
        script: Mutex<VecDeque<Result<StreamSnapshot, FetchError>>>,
        last: Mutex<Option<StreamSnapshot>>,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<StreamSnapshot, FetchError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                last: Mutex::new(None),
            }
        }
    }

    impl SnapshotFetcher for ScriptedFetcher {
        fn fetch(
            &self,
        ) -> impl std::future::Future<Output = Result<StreamSnapshot, FetchError>> + Send {
            let next = self.script.lock().unwrap().pop_front();
            let result = match next {
                Some(Ok(snapshot)) => {
                    *self.last.lock().unwrap() = Some(snapshot.clone());
                    Ok(snapshot)
                }
                Some(Err(error)) => Err(error),
                // Script exhausted: keep serving the last snapshot
                None => match self.last.lock().unwrap().clone() {
                    Some(snapshot) => Ok(snapshot),
                    None => Err(FetchError::Unavailable {
                        reason: "script exhausted".to_string(),
                    }),
                },
            };
            async move { result }
        }
    }

    struct RecordingPresenter {
        shown: Arc<Mutex<Vec<String>>>,
    }

    impl Presenter for RecordingPresenter {
        fn show(&mut self, content: &PhaseContent, visual: VisualState) {
            if visual == VisualState::Entering {
                self.shown
                    .lock()
                    .unwrap()
                    .push(content.text.clone().unwrap_or_default());
            }
        }

        fn hide(&mut self) {}
    }

    fn follower_snapshot(name: &str) -> StreamSnapshot {
        StreamSnapshot {
            follower: Some(name.to_string()),
            ..StreamSnapshot::default()
        }
    }

    fn config(slots: Vec<MilestoneSlot>, refetch_every: u32) -> MilestonesConfig {
        MilestonesConfig {
            enabled: true,
            hold_ms: 1000,
            fade_ms: 100,
            refetch_every,
            slots,
        }
    }

    async fn run_rotation(
        config: MilestonesConfig,
        script: Vec<Result<StreamSnapshot, FetchError>>,
        virtual_ms: u64,
    ) -> Vec<String> {
        let shown = Arc::new(Mutex::new(Vec::new()));
        let presenter = RecordingPresenter {
            shown: Arc::clone(&shown),
        };
        let (controller, signal) = shutdown::channel();

        let handle = tokio::spawn(run(
            config,
            ScriptedFetcher::new(script),
            presenter,
            signal,
        ));
        sleep(Duration::from_millis(virtual_ms)).await;
        controller.shutdown();
        handle.await.unwrap();

        let shown = shown.lock().unwrap().clone();
        shown
    }

    fn follower_slot() -> MilestoneSlot {
        MilestoneSlot {
            field: MilestoneField::Follower,
            image: "cat_love.png".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn refetches_only_every_nth_round() {
        // One slot per round, 1200ms each. Fetches land on rounds 0 and 2,
        // so the value only advances every other round.
        let shown = run_rotation(
            config(vec![follower_slot()], 2),
            vec![
                Ok(follower_snapshot("ada")),
                Ok(follower_snapshot("grace")),
            ],
            4600,
        )
        .await;

        assert_eq!(shown, vec!["ada", "ada", "grace", "grace"]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_slots_are_skipped_but_mascot_always_shows() {
        let slots = vec![
            MilestoneSlot {
                field: MilestoneField::First,
                image: "cat_hype.png".to_string(),
            },
            MilestoneSlot {
                field: MilestoneField::Mascot("NonEssentialFish".to_string()),
                image: "fish.png".to_string(),
            },
        ];

        // Snapshot with no milestone values at all: one reveal per round
        let shown = run_rotation(
            config(slots, 1),
            vec![Ok(StreamSnapshot::default())],
            2500,
        )
        .await;

        assert!(!shown.is_empty());
        assert!(shown.iter().all(|text| text == "NonEssentialFish"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_reuses_the_cached_snapshot() {
        let shown = run_rotation(
            config(vec![follower_slot()], 1),
            vec![
                Ok(follower_snapshot("ada")),
                Err(FetchError::Unavailable {
                    reason: "flaky".to_string(),
                }),
            ],
            2200,
        )
        .await;

        assert_eq!(shown, vec!["ada", "ada"]);
    }

    #[tokio::test(start_paused = true)]
    async fn starts_once_a_fetch_finally_succeeds() {
        let shown = run_rotation(
            config(vec![follower_slot()], 1),
            vec![
                Err(FetchError::Unavailable {
                    reason: "down".to_string(),
                }),
                Ok(follower_snapshot("late")),
            ],
            2500,
        )
        .await;

        assert_eq!(shown.first().map(String::as_str), Some("late"));
    }
}
