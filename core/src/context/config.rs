//! Configuration persistence
//!
//! `AppConfig` itself lives in limelight-types; this module adds loading
//! and saving through confy (TOML under the platform config directory).

use limelight_types::AppConfig;

/// Extension trait for AppConfig persistence.
pub trait AppConfigExt: Sized {
    /// Load the stored config, falling back to defaults if none exists
    /// or the stored file cannot be read.
    fn load() -> Self;

    /// Persist the config.
    fn save(&self) -> Result<(), confy::ConfyError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load("limelight", "config").unwrap_or_default()
    }

    fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store("limelight", "config", self)
    }
}
