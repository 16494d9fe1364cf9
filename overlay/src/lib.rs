//! Overlay instances for the LIMELIGHT engine
//!
//! Each overlay here is an independent, isolated sequencing loop built
//! from limelight-core pieces: the alerts pop-up (push-driven), the
//! now-playing ticker, the rotating milestone ticker, and the chatter
//! wall (all poll-driven). Rendering stays behind the `Presenter` trait;
//! this crate only ships a tracing-backed presenter for headless runs.

pub mod overlays;
pub mod presenter;

pub use overlays::{AlertsOverlay, chatter_wall, milestones, now_playing, spawn_overlays};
pub use presenter::TracePresenter;
