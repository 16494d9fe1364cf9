pub mod context;
pub mod poll;
pub mod presenter;
pub mod push;
pub mod sequence;
pub mod shutdown;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use poll::PollLoop;
pub use presenter::Presenter;
pub use push::{
    AlertMessage, AlertPayload, PushDecodeError, PushListener, PushSender, SseSource,
    alert_channel, decode_alert,
};
pub use sequence::{
    Cycle, CycleOutcome, Phase, PhaseContent, PhaseSequencer, SequenceError, VisualState,
};
pub use shutdown::{ShutdownController, ShutdownSignal};
pub use snapshot::{
    ChangeDetector, FetchError, HttpSnapshotFetcher, NowPlaying, RefetchSchedule, SnapshotFetcher,
    StreamSnapshot, TrackedField,
};
