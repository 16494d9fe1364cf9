//! The overlay instances
//!
//! One module per overlay kind. `spawn_overlays` wires every enabled
//! overlay onto the runtime with its own presenter and shutdown signal.

mod alerts;
pub mod chatter_wall;
pub mod milestones;
pub mod now_playing;

pub use alerts::AlertsOverlay;

use limelight_core::context::BackgroundTasks;
use limelight_core::push::SseSource;
use limelight_core::shutdown::ShutdownController;
use limelight_core::snapshot::HttpSnapshotFetcher;
use limelight_core::PushSender;
use limelight_types::AppConfig;
use tracing::info;

use crate::presenter::TracePresenter;

/// Spawn every enabled overlay with trace presenters.
///
/// Returns the running task handles and, when the alerts overlay is
/// enabled, a `PushSender` for injecting alerts locally (e.g. from the
/// CLI) alongside the SSE source.
pub fn spawn_overlays(
    config: &AppConfig,
    client: reqwest::Client,
    controller: &ShutdownController,
) -> (BackgroundTasks, Option<PushSender>) {
    let mut tasks = BackgroundTasks::default();
    let mut push_sender = None;

    let fetcher = || HttpSnapshotFetcher::new(client.clone(), &config.endpoints.snapshot_url);

    if config.overlays.alerts.enabled {
        let (sender, overlay) =
            AlertsOverlay::new(TracePresenter::new("alerts"), controller.signal());
        let source = SseSource::new(
            client.clone(),
            &config.endpoints.push_url,
            sender.clone(),
            controller.signal(),
        );
        tasks.push_source = Some(tokio::spawn(source.run()));
        tasks.overlays.push(tokio::spawn(overlay.run()));
        push_sender = Some(sender);
        info!("alerts overlay started");
    }

    if config.overlays.now_playing.enabled {
        tasks.overlays.push(tokio::spawn(now_playing::run(
            config.overlays.now_playing.clone(),
            fetcher(),
            TracePresenter::new("now_playing"),
            controller.signal(),
        )));
        info!("now-playing overlay started");
    }

    if config.overlays.milestones.enabled {
        tasks.overlays.push(tokio::spawn(milestones::run(
            config.overlays.milestones.clone(),
            fetcher(),
            TracePresenter::new("milestones"),
            controller.signal(),
        )));
        info!("milestones overlay started");
    }

    if config.overlays.chatter_wall.enabled {
        tasks.overlays.push(tokio::spawn(chatter_wall::run(
            config.overlays.chatter_wall.clone(),
            fetcher(),
            TracePresenter::new("chatter_wall"),
            controller.signal(),
        )));
        info!("chatter-wall overlay started");
    }

    (tasks, push_sender)
}
