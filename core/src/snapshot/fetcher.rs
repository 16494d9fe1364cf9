//! Snapshot retrieval
//!
//! Pure retrieval, no caching: every call hits the endpoint. A failed
//! fetch means "no update available" to the caller; it must never clear or
//! replace the previously held snapshot.

use std::future::Future;

use thiserror::Error;

use super::state::StreamSnapshot;

/// Errors during snapshot retrieval
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be reached (connection, timeout, HTTP status)
    #[error("snapshot endpoint unreachable")]
    Transport(#[source] reqwest::Error),

    /// The endpoint responded but the body was not a valid snapshot
    #[error("snapshot body could not be decoded")]
    Decode(#[source] reqwest::Error),

    /// The source had nothing to offer (non-HTTP sources, test doubles)
    #[error("snapshot unavailable: {reason}")]
    Unavailable { reason: String },
}

/// A source of stream-state snapshots.
pub trait SnapshotFetcher: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<StreamSnapshot, FetchError>> + Send;
}

/// Fetches snapshots from the broadcast server's JSON endpoint.
#[derive(Clone)]
pub struct HttpSnapshotFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotFetcher {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl SnapshotFetcher for HttpSnapshotFetcher {
    fn fetch(&self) -> impl Future<Output = Result<StreamSnapshot, FetchError>> + Send {
        async move {
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(FetchError::Transport)?;

            response.json::<StreamSnapshot>().await.map_err(|e| {
                if e.is_decode() {
                    FetchError::Decode(e)
                } else {
                    FetchError::Transport(e)
                }
            })
        }
    }
}
