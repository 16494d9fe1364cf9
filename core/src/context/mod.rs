mod background_tasks;
mod config;

pub use background_tasks::BackgroundTasks;
pub use config::AppConfigExt;

// Re-export the shared config types so consumers only import from core
pub use limelight_types::{
    AlertsOverlayConfig, AppConfig, ChatterWallConfig, EndpointSettings, MilestoneField,
    MilestoneSlot, MilestonesConfig, NowPlayingConfig, OverlaySettings,
};
