//! Push ingestion
//!
//! A single always-on listener on the alert channel. Each inbound message
//! carries `{data: {image, audio, text}, duration}` and is fed directly
//! into one sequencer cycle. One bad message never terminates listening.
//!
//! The channel between the transport and the listener is bounded at depth
//! one: that slot IS the "at most one pending cycle" policy. While a cycle
//! is in flight one message may wait; anything past that is dropped with a
//! warning rather than queued without bound.

mod sse;

pub use sse::SseSource;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::presenter::Presenter;
use crate::sequence::{Cycle, CycleOutcome, PhaseContent, PhaseSequencer};
use crate::shutdown::ShutdownSignal;

/// Pending-slot depth between the transport and the listener.
const PENDING_CAPACITY: usize = 1;

/// Alert content as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlertPayload {
    pub image: String,
    pub audio: String,
    pub text: String,
}

/// One pushed alert message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlertMessage {
    pub data: AlertPayload,
    /// Requested on-screen time in whole seconds
    pub duration: u64,
}

impl AlertMessage {
    /// The phase content this alert presents.
    pub fn content(&self) -> PhaseContent {
        PhaseContent {
            text: Some(self.data.text.clone()),
            image: Some(self.data.image.clone()),
            audio: Some(self.data.audio.clone()),
        }
    }
}

/// Errors decoding a single pushed message. Fatal for that message only.
#[derive(Debug, Error)]
pub enum PushDecodeError {
    #[error("malformed alert message")]
    Json(#[from] serde_json::Error),
}

/// Decode one raw message body.
pub fn decode_alert(raw: &str) -> Result<AlertMessage, PushDecodeError> {
    Ok(serde_json::from_str(raw)?)
}

/// Sending half of the alert channel, used by the transport.
#[derive(Clone)]
pub struct PushSender {
    tx: mpsc::Sender<String>,
}

impl PushSender {
    /// Hand a raw message to the listener. Returns false if the message
    /// was dropped because the pending slot is full (or the listener is
    /// gone); delivery is best-effort by design.
    pub fn deliver(&self, raw: String) -> bool {
        match self.tx.try_send(raw) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("alert dropped: a cycle is in flight and one alert is already pending");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("alert dropped: listener has shut down");
                false
            }
        }
    }
}

/// Create the bounded alert channel.
pub fn alert_channel() -> (PushSender, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(PENDING_CAPACITY);
    (PushSender { tx }, rx)
}

/// The push-driven sequencing loop for one alert overlay instance.
pub struct PushListener<P: Presenter> {
    rx: mpsc::Receiver<String>,
    sequencer: PhaseSequencer<P>,
    shutdown: ShutdownSignal,
}

impl<P: Presenter> PushListener<P> {
    pub fn new(
        rx: mpsc::Receiver<String>,
        sequencer: PhaseSequencer<P>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            rx,
            sequencer,
            shutdown,
        }
    }

    /// Listen until shutdown or the channel closes. Each valid message
    /// runs exactly one cycle to completion before the next message is
    /// taken from the pending slot.
    pub async fn run(mut self) {
        loop {
            let raw = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                msg = self.rx.recv() => match msg {
                    Some(raw) => raw,
                    None => break,
                },
            };

            let message = match decode_alert(&raw) {
                Ok(message) => message,
                Err(error) => {
                    warn!(%error, "dropping undecodable alert message");
                    continue;
                }
            };

            let cycle = match Cycle::alert(message.content(), message.duration) {
                Ok(cycle) => cycle,
                Err(error) => {
                    warn!(%error, duration = message.duration, "dropping alert with unusable duration");
                    continue;
                }
            };

            debug!(duration = message.duration, text = %message.data.text, "alert cycle starting");

            match self.sequencer.run_cycle(cycle).await {
                Ok(CycleOutcome::Completed) => {}
                Ok(CycleOutcome::Cancelled) => break,
                // Unreachable: this loop is the sequencer's only caller
                Err(error) => warn!(%error, "alert rejected by sequencer"),
            }
        }

        info!("push listener stopped");
    }
}
