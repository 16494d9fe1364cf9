//! Chatter wall
//!
//! Polls the snapshot and, whenever the set of recent chat participants
//! changes, rebuilds the wall: one tile per chatter, revealed one after
//! another, then a single bulk clear at the end of the cycle.

use std::time::Duration;

use limelight_core::poll::PollLoop;
use limelight_core::sequence::{Cycle, PhaseContent, PhaseSequencer};
use limelight_core::shutdown::ShutdownSignal;
use limelight_core::snapshot::{ChangeDetector, SnapshotFetcher, StreamSnapshot, TrackedField};
use limelight_core::Presenter;
use limelight_types::ChatterWallConfig;

/// Run the wall until shutdown.
pub async fn run<F, P>(
    config: ChatterWallConfig,
    fetcher: F,
    presenter: P,
    shutdown: ShutdownSignal,
) where
    F: SnapshotFetcher,
    P: Presenter,
{
    let ChatterWallConfig {
        poll_secs,
        reveal_ms,
        image,
        ..
    } = config;

    let build_cycle = move |snapshot: &StreamSnapshot| {
        let roster = snapshot.chatter_roster();
        if roster.is_empty() {
            return None;
        }
        let tiles = roster
            .into_iter()
            .map(|name| PhaseContent::text(name).with_image(image.clone()))
            .collect();
        Cycle::batch(tiles, reveal_ms).ok()
    };

    PollLoop::new(
        fetcher,
        ChangeDetector::new(TrackedField::ChatterRoster),
        PhaseSequencer::new(presenter, shutdown.clone()),
        build_cycle,
        Duration::from_secs(poll_secs),
        shutdown,
    )
    .run()
    .await;
}
