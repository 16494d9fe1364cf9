//! Phase and cycle types
//!
//! A `Cycle` is the ordered sequence of timed phases executed for exactly
//! one trigger event. Constructors encode the cycle shapes the overlays
//! use and validate the structural invariants (non-empty, strictly
//! positive durations) so a malformed cycle can never reach the sequencer.

use std::time::Duration;

use super::error::SequenceError;

/// One second of every pushed alert is reserved for the visible settle
/// before teardown, so a push requesting N seconds holds for N-1.
pub const ALERT_SETTLE_MS: u64 = 1000;

/// Visual state a phase presents in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    /// Content is animating in
    Entering,
    /// Content is on screen at rest
    Holding,
    /// Content is animating out; the presentation resource is released
    /// when this phase begins
    Exiting,
    /// Bulk removal at the end of a batch cycle
    Cleared,
}

impl VisualState {
    /// Whether the sequencer shows content (`show`) or takes it down
    /// (`hide`) when a phase in this state begins.
    pub fn presents(&self) -> bool {
        matches!(self, VisualState::Entering | VisualState::Holding)
    }
}

/// What a phase puts on screen. All fields optional; an all-`None` content
/// is legal for teardown phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseContent {
    pub text: Option<String>,
    pub image: Option<String>,
    pub audio: Option<String>,
}

impl PhaseContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = Some(audio.into());
        self
    }
}

/// A single timed step of a cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub content: PhaseContent,
    pub duration: Duration,
    pub visual: VisualState,
}

impl Phase {
    pub fn new(content: PhaseContent, millis: u64, visual: VisualState) -> Self {
        Self {
            content,
            duration: Duration::from_millis(millis),
            visual,
        }
    }
}

/// The atomic unit of execution: one trigger event, one ordered sequence
/// of phases, run to completion with no interleaving.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    phases: Vec<Phase>,
}

impl Cycle {
    /// Build a cycle from explicit phases, validating the invariants.
    pub fn new(phases: Vec<Phase>) -> Result<Self, SequenceError> {
        if phases.is_empty() {
            return Err(SequenceError::EmptyCycle);
        }
        for phase in &phases {
            if phase.duration.is_zero() {
                return Err(SequenceError::InvalidDuration {
                    millis: phase.duration.as_millis() as u64,
                });
            }
        }
        Ok(Self { phases })
    }

    /// Pushed alert: show image + text and start audio immediately, hold
    /// for `(requested_secs - 1)` seconds, then release the resource and
    /// settle for the reserved final second.
    ///
    /// Durations below 2 seconds are rejected: they would leave no hold
    /// time at all once the settle second is reserved. Durations whose
    /// millisecond conversion overflows are rejected the same way; the
    /// wire field is an unbounded integer.
    pub fn alert(content: PhaseContent, requested_secs: u64) -> Result<Self, SequenceError> {
        let hold_ms = if requested_secs < 2 {
            None
        } else {
            (requested_secs - 1).checked_mul(1000)
        };
        let Some(hold_ms) = hold_ms else {
            return Err(SequenceError::InvalidDuration {
                millis: requested_secs.saturating_sub(1).saturating_mul(1000),
            });
        };
        Self::new(vec![
            Phase::new(content, hold_ms, VisualState::Entering),
            Phase::new(PhaseContent::default(), ALERT_SETTLE_MS, VisualState::Exiting),
        ])
    }

    /// Ticker swap: fade the previous content out, then bring the new
    /// content in. The new content persists on screen after the cycle
    /// completes (there is no trailing exit phase).
    pub fn swap(content: PhaseContent, fade_ms: u64, settle_ms: u64) -> Result<Self, SequenceError> {
        Self::new(vec![
            Phase::new(PhaseContent::default(), fade_ms, VisualState::Exiting),
            Phase::new(content, fade_ms + settle_ms, VisualState::Entering),
        ])
    }

    /// Ticker reveal: fade in, hold, fade out. Used for rotating slots
    /// that each get their own appearance.
    pub fn reveal(content: PhaseContent, fade_ms: u64, hold_ms: u64) -> Result<Self, SequenceError> {
        Self::new(vec![
            Phase::new(content.clone(), fade_ms, VisualState::Entering),
            Phase::new(content, hold_ms, VisualState::Holding),
            Phase::new(PhaseContent::default(), fade_ms, VisualState::Exiting),
        ])
    }

    /// Batch reveal: one hold phase per item (each item appears when its
    /// phase begins), then a single bulk clear.
    pub fn batch(items: Vec<PhaseContent>, reveal_ms: u64) -> Result<Self, SequenceError> {
        let mut phases: Vec<Phase> = items
            .into_iter()
            .map(|item| Phase::new(item, reveal_ms, VisualState::Holding))
            .collect();
        phases.push(Phase::new(
            PhaseContent::default(),
            reveal_ms,
            VisualState::Cleared,
        ));
        Self::new(phases)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Total wall-clock time this cycle takes to run.
    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }

    pub(crate) fn into_phases(self) -> Vec<Phase> {
        self.phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cycle_is_rejected() {
        assert_eq!(Cycle::new(Vec::new()), Err(SequenceError::EmptyCycle));
    }

    #[test]
    fn zero_duration_phase_is_rejected() {
        let phases = vec![Phase::new(PhaseContent::default(), 0, VisualState::Holding)];
        assert_eq!(
            Cycle::new(phases),
            Err(SequenceError::InvalidDuration { millis: 0 })
        );
    }

    #[test]
    fn alert_reserves_the_settle_second() {
        let cycle = Cycle::alert(PhaseContent::text("hi"), 5).unwrap();
        let phases = cycle.phases();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].duration, Duration::from_millis(4000));
        assert_eq!(phases[0].visual, VisualState::Entering);
        assert_eq!(phases[1].duration, Duration::from_millis(1000));
        assert_eq!(phases[1].visual, VisualState::Exiting);
        assert_eq!(cycle.total_duration(), Duration::from_secs(5));
    }

    #[test]
    fn alert_below_two_seconds_is_rejected() {
        assert!(Cycle::alert(PhaseContent::text("hi"), 1).is_err());
        assert!(Cycle::alert(PhaseContent::text("hi"), 0).is_err());
    }

    #[test]
    fn alert_duration_overflowing_milliseconds_is_rejected() {
        assert_eq!(
            Cycle::alert(PhaseContent::text("hi"), u64::MAX),
            Err(SequenceError::InvalidDuration { millis: u64::MAX })
        );
        // Largest duration whose millisecond conversion still fits
        assert!(Cycle::alert(PhaseContent::text("hi"), u64::MAX / 1000).is_ok());
    }

    #[test]
    fn batch_ends_with_bulk_clear() {
        let items = vec![PhaseContent::text("a"), PhaseContent::text("b")];
        let cycle = Cycle::batch(items, 400).unwrap();
        let phases = cycle.phases();
        assert_eq!(phases.len(), 3);
        assert!(phases[..2].iter().all(|p| p.visual == VisualState::Holding));
        assert_eq!(phases[2].visual, VisualState::Cleared);
    }
}
