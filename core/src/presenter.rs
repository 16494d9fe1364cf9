//! Presentation adapter boundary
//!
//! The engine never reasons about pixels. It tells a `Presenter` what
//! content should be visible and in which visual state, and when to take it
//! down. DOM, game-engine canvas, or terminal rendering all live behind
//! this trait.

use crate::sequence::{PhaseContent, VisualState};

/// The external rendering surface for one overlay instance.
///
/// The sequencer calls `show` when a phase begins in `Entering` or
/// `Holding`, and `hide` when a phase begins in `Exiting` or `Cleared`.
/// `hide` must release any held audio/visual resource (stop playback,
/// clear source), not just blank the display: it is invoked at the exiting
/// transition precisely to avoid trailing artifacts.
pub trait Presenter: Send {
    /// Render the given content in the given visual state.
    ///
    /// Repeated calls with the same content (e.g. `Entering` followed by
    /// `Holding`) must be idempotent.
    fn show(&mut self, content: &PhaseContent, visual: VisualState);

    /// Unrender and release the presentation resource.
    fn hide(&mut self);
}
