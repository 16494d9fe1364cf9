//! Tracing-backed presenter
//!
//! Renders nothing; logs every transition instead. Useful for headless
//! runs, the CLI, and watching overlay behavior without a browser source.

use limelight_core::sequence::{PhaseContent, VisualState};
use limelight_core::Presenter;
use tracing::info;

/// Logs show/hide calls under an overlay label.
pub struct TracePresenter {
    label: &'static str,
}

impl TracePresenter {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Presenter for TracePresenter {
    fn show(&mut self, content: &PhaseContent, visual: VisualState) {
        info!(
            overlay = self.label,
            ?visual,
            text = content.text.as_deref().unwrap_or(""),
            image = content.image.as_deref().unwrap_or(""),
            audio = content.audio.as_deref().unwrap_or(""),
            "show"
        );
    }

    fn hide(&mut self) {
        info!(overlay = self.label, "hide");
    }
}
