//! Server-sent-events transport for the push channel
//!
//! Maintains one long-lived subscription to the alert endpoint and forwards
//! each event's `data:` payload to the push channel. Transport failures are
//! logged and followed by a reconnect after a fixed delay; the source only
//! stops on shutdown.

use std::time::Duration;

use tracing::{info, warn};

use super::PushSender;
use crate::shutdown::ShutdownSignal;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Reads an SSE stream and feeds raw event payloads to a `PushSender`.
pub struct SseSource {
    client: reqwest::Client,
    url: String,
    sender: PushSender,
    shutdown: ShutdownSignal,
}

impl SseSource {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        sender: PushSender,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            sender,
            shutdown,
        }
    }

    /// Subscribe-read-reconnect until shutdown.
    pub async fn run(mut self) {
        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            match self.subscribe_once().await {
                Ok(()) => info!(url = %self.url, "push stream ended, reconnecting"),
                Err(error) => warn!(%error, url = %self.url, "push stream failed, reconnecting"),
            }

            tokio::select! {
                _ = tokio::time::sleep(RECONNECT_DELAY) => {}
                _ = self.shutdown.cancelled() => break,
            }
        }

        info!("push source stopped");
    }

    /// One subscription: read chunks until the server closes the stream
    /// or shutdown arrives.
    async fn subscribe_once(&mut self) -> Result<(), reqwest::Error> {
        let mut response = self
            .client
            .get(&self.url)
            .header("Accept", "text/event-stream")
            .send()
            .await?
            .error_for_status()?;

        info!(url = %self.url, "subscribed to push stream");

        let mut buffer: Vec<u8> = Vec::new();
        loop {
            let chunk = tokio::select! {
                chunk = response.chunk() => chunk?,
                _ = self.shutdown.cancelled() => return Ok(()),
            };

            let Some(bytes) = chunk else {
                return Ok(());
            };

            buffer.extend_from_slice(&bytes);
            for block in drain_event_blocks(&mut buffer) {
                if let Some(payload) = event_data(&block) {
                    self.sender.deliver(payload);
                }
            }
        }
    }
}

/// Split complete event blocks (terminated by a blank line) off the front
/// of the buffer, leaving any partial block in place. The buffer holds raw
/// bytes so a multi-byte character split across network chunks is only
/// decoded once its block is complete.
fn drain_event_blocks(buffer: &mut Vec<u8>) -> Vec<String> {
    let mut blocks = Vec::new();
    while let Some(end) = buffer.windows(2).position(|pair| pair == b"\n\n") {
        let block: Vec<u8> = buffer.drain(..end + 2).collect();
        blocks.push(String::from_utf8_lossy(&block[..end]).into_owned());
    }
    blocks
}

/// Join an event block's `data:` lines into the message payload.
fn event_data(block: &str) -> Option<String> {
    let data: Vec<&str> = block
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim_start)
        .collect();

    if data.is_empty() {
        None
    } else {
        Some(data.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_complete_blocks_and_keeps_partials() {
        let mut buffer = b"data: one\n\ndata: two\n\ndata: par".to_vec();
        let blocks = drain_event_blocks(&mut buffer);
        assert_eq!(blocks, vec!["data: one".to_string(), "data: two".to_string()]);
        assert_eq!(buffer, b"data: par".to_vec());
    }

    #[test]
    fn multibyte_character_split_across_chunks_stays_intact() {
        let payload = "data: caf\u{e9}\n\n".as_bytes();
        // Split inside the two-byte encoding of 'é'
        let (first, second) = payload.split_at(payload.len() - 3);

        let mut buffer = first.to_vec();
        assert!(drain_event_blocks(&mut buffer).is_empty());

        buffer.extend_from_slice(second);
        let blocks = drain_event_blocks(&mut buffer);
        assert_eq!(blocks, vec!["data: caf\u{e9}".to_string()]);
        assert_eq!(event_data(&blocks[0]), Some("caf\u{e9}".to_string()));
        assert!(buffer.is_empty());
    }

    #[test]
    fn extracts_and_joins_data_lines() {
        assert_eq!(event_data("data: {\"a\":1}"), Some("{\"a\":1}".to_string()));
        assert_eq!(
            event_data("event: alert\ndata: line1\ndata: line2"),
            Some("line1\nline2".to_string())
        );
        // Comment-only keep-alive blocks carry no payload
        assert_eq!(event_data(": keep-alive"), None);
    }
}
