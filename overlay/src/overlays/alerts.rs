//! Alerts overlay
//!
//! Push-driven pop-ups: each inbound alert message shows its image and
//! text, starts its audio, holds for the requested duration minus the
//! reserved settle second, then releases everything. At most one alert
//! is ever on screen; at most one more may wait.

use limelight_core::push::{PushListener, PushSender, alert_channel};
use limelight_core::sequence::PhaseSequencer;
use limelight_core::shutdown::ShutdownSignal;
use limelight_core::Presenter;

/// One push-driven alert overlay instance.
pub struct AlertsOverlay<P: Presenter> {
    listener: PushListener<P>,
}

impl<P: Presenter> AlertsOverlay<P> {
    /// Create the overlay and the sender its transport feeds.
    pub fn new(presenter: P, shutdown: ShutdownSignal) -> (PushSender, Self) {
        let (sender, rx) = alert_channel();
        let sequencer = PhaseSequencer::new(presenter, shutdown.clone());
        let listener = PushListener::new(rx, sequencer, shutdown);
        (sender, Self { listener })
    }

    /// Listen until shutdown.
    pub async fn run(self) {
        self.listener.run().await;
    }
}
