//! Snapshot model, retrieval, and change detection
//!
//! The engine only ever holds two snapshots: the most recently fetched one
//! and the previously accepted one. Fetching is pure retrieval; deciding
//! whether a fetched snapshot should trigger a presentation cycle is the
//! detector's job.

mod detector;
mod fetcher;
mod state;

pub use detector::{ChangeDetector, RefetchSchedule, TrackedField};
pub use fetcher::{FetchError, HttpSnapshotFetcher, SnapshotFetcher};
pub use state::{NowPlaying, StreamSnapshot};
