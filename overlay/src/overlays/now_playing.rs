//! Now-playing ticker
//!
//! Polls the snapshot on a fixed cadence and, when the playing title
//! changes, fades the old track out and the new one in. The new content
//! then persists on screen until the next change.

use std::time::Duration;

use limelight_core::poll::PollLoop;
use limelight_core::sequence::{Cycle, PhaseContent, PhaseSequencer};
use limelight_core::shutdown::ShutdownSignal;
use limelight_core::snapshot::{ChangeDetector, SnapshotFetcher, StreamSnapshot, TrackedField};
use limelight_core::Presenter;
use limelight_types::NowPlayingConfig;

/// Run the ticker until shutdown.
pub async fn run<F, P>(
    config: NowPlayingConfig,
    fetcher: F,
    presenter: P,
    shutdown: ShutdownSignal,
) where
    F: SnapshotFetcher,
    P: Presenter,
{
    let NowPlayingConfig {
        poll_secs,
        fade_ms,
        settle_ms,
        ..
    } = config;

    let build_cycle = move |snapshot: &StreamSnapshot| {
        // Nothing playing: stay on whatever is currently shown
        if snapshot.playing.title.is_empty() {
            return None;
        }
        let content = PhaseContent::text(&snapshot.playing.title)
            .with_image(&snapshot.playing.image);
        Cycle::swap(content, fade_ms, settle_ms).ok()
    };

    PollLoop::new(
        fetcher,
        ChangeDetector::new(TrackedField::NowPlayingTitle),
        PhaseSequencer::new(presenter, shutdown.clone()),
        build_cycle,
        Duration::from_secs(poll_secs),
        shutdown,
    )
    .run()
    .await;
}
