//! Application configuration options

use std::path::PathBuf;

use crate::app::settings::Settings;

/// Options for one deployment run
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Directory the model patterns are resolved against
    pub working_dir: PathBuf,

    /// Deployment settings
    pub settings: Settings,

    /// Emit CI workflow commands (`::warning::`, `::error::`)
    pub annotate: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            settings: Settings::default(),
            annotate: false,
        }
    }
}
