//! Shared test doubles for engine tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::time::Instant;

use crate::presenter::Presenter;
use crate::sequence::{PhaseContent, VisualState};
use crate::snapshot::{FetchError, SnapshotFetcher, StreamSnapshot};

/// What a presenter was asked to do and when (virtual time).
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Shown {
        content: PhaseContent,
        visual: VisualState,
    },
    Hidden,
}

/// Shared view of a `RecordingPresenter`'s call log.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<(Instant, PresenterEvent)>>>,
}

impl EventLog {
    pub fn events(&self) -> Vec<(Instant, PresenterEvent)> {
        self.events.lock().unwrap().clone()
    }

    pub fn shown_texts(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, e)| match e {
                PresenterEvent::Shown { content, .. } => content.text.clone(),
                PresenterEvent::Hidden => None,
            })
            .collect()
    }

    fn push(&self, event: PresenterEvent) {
        self.events.lock().unwrap().push((Instant::now(), event));
    }
}

/// Presenter that records every call with a virtual timestamp.
pub struct RecordingPresenter {
    log: EventLog,
}

impl RecordingPresenter {
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl Presenter for RecordingPresenter {
    fn show(&mut self, content: &PhaseContent, visual: VisualState) {
        self.log.push(PresenterEvent::Shown {
            content: content.clone(),
            visual,
        });
    }

    fn hide(&mut self) {
        self.log.push(PresenterEvent::Hidden);
    }
}

/// Fetcher that replays a scripted sequence of results, then reports
/// `Unavailable` forever.
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<StreamSnapshot, FetchError>>>,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<Result<StreamSnapshot, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

impl SnapshotFetcher for ScriptedFetcher {
    fn fetch(
        &self,
    ) -> impl std::future::Future<Output = Result<StreamSnapshot, FetchError>> + Send {
        let result = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::Unavailable {
                reason: "script exhausted".to_string(),
            }));
        async move { result }
    }
}

/// Snapshot with the given now-playing title and everything else empty.
pub fn snapshot_with_title(title: &str) -> StreamSnapshot {
    StreamSnapshot {
        playing: crate::snapshot::NowPlaying {
            title: title.to_string(),
            image: format!("{title}.png"),
            url: None,
        },
        ..StreamSnapshot::default()
    }
}
