//! Change detection and refetch scheduling
//!
//! Two distinct policies live here. `ChangeDetector` is a value policy: it
//! compares exactly one tracked field between the previously accepted
//! snapshot and a fresh one, by exact value equality. `RefetchSchedule` is
//! a scheduling policy: rotating tickers that show a fixed set of fields
//! every round use it to decide, on a counter independent of any value
//! change, whether this round re-fetches the snapshot or reuses the last
//! one.

use super::state::StreamSnapshot;

/// Which snapshot field an overlay kind tracks for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedField {
    /// `playing.title`, exact string equality
    NowPlayingTitle,
    /// The set of chatter display names (metadata values are ignored)
    ChatterRoster,
}

/// Decides whether a freshly fetched snapshot should trigger a cycle.
#[derive(Debug, Clone, Copy)]
pub struct ChangeDetector {
    field: TrackedField,
}

impl ChangeDetector {
    pub fn new(field: TrackedField) -> Self {
        Self { field }
    }

    /// First observation always triggers; after that, only an exact-value
    /// change in the tracked field does. Changes in any other field are
    /// ignored.
    pub fn should_trigger(
        &self,
        previous: Option<&StreamSnapshot>,
        current: &StreamSnapshot,
    ) -> bool {
        let Some(previous) = previous else {
            return true;
        };

        match self.field {
            TrackedField::NowPlayingTitle => previous.playing.title != current.playing.title,
            TrackedField::ChatterRoster => previous.chatter_roster() != current.chatter_roster(),
        }
    }
}

/// Round counter for rotating tickers: re-fetch every `every`-th round,
/// reuse the cached snapshot otherwise. Round 0 always fetches so the
/// first rotation has data.
#[derive(Debug)]
pub struct RefetchSchedule {
    every: u32,
    round: u32,
}

impl RefetchSchedule {
    pub fn every(every: u32) -> Self {
        Self {
            every: every.max(1),
            round: 0,
        }
    }

    /// Advance to the next round; returns whether this round re-fetches.
    pub fn begin_round(&mut self) -> bool {
        let refetch = self.round % self.every == 0;
        self.round = self.round.wrapping_add(1);
        refetch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::snapshot_with_title;

    #[test]
    fn identical_snapshots_never_trigger() {
        let detector = ChangeDetector::new(TrackedField::NowPlayingTitle);
        let snap = snapshot_with_title("X");
        assert!(!detector.should_trigger(Some(&snap), &snap.clone()));
    }

    #[test]
    fn first_observation_always_triggers() {
        for field in [TrackedField::NowPlayingTitle, TrackedField::ChatterRoster] {
            let detector = ChangeDetector::new(field);
            assert!(detector.should_trigger(None, &StreamSnapshot::default()));
        }
    }

    #[test]
    fn title_change_triggers() {
        let detector = ChangeDetector::new(TrackedField::NowPlayingTitle);
        let previous = snapshot_with_title("X");
        let current = snapshot_with_title("Y");
        assert!(detector.should_trigger(Some(&previous), &current));
    }

    #[test]
    fn untracked_field_change_is_ignored() {
        let detector = ChangeDetector::new(TrackedField::NowPlayingTitle);
        let previous = snapshot_with_title("X");
        let mut current = snapshot_with_title("X");
        current.follower = Some("ada".to_string());
        current.online = true;
        assert!(!detector.should_trigger(Some(&previous), &current));
    }

    #[test]
    fn roster_tracks_names_not_metadata() {
        let detector = ChangeDetector::new(TrackedField::ChatterRoster);

        let mut previous = StreamSnapshot::default();
        previous
            .chatter_cache
            .insert("ada".to_string(), serde_json::json!({"seen": 1}));

        // Same names, different metadata: no trigger
        let mut current = StreamSnapshot::default();
        current
            .chatter_cache
            .insert("ada".to_string(), serde_json::json!({"seen": 99}));
        assert!(!detector.should_trigger(Some(&previous), &current));

        // New name: trigger
        current
            .chatter_cache
            .insert("grace".to_string(), serde_json::Value::Null);
        assert!(detector.should_trigger(Some(&previous), &current));
    }

    #[test]
    fn refetch_every_second_round() {
        let mut schedule = RefetchSchedule::every(2);
        let rounds: Vec<bool> = (0..6).map(|_| schedule.begin_round()).collect();
        assert_eq!(rounds, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn refetch_every_round_when_interval_is_one() {
        let mut schedule = RefetchSchedule::every(1);
        assert!(schedule.begin_round());
        assert!(schedule.begin_round());
    }
}
