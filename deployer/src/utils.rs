//! Utility functions

use serde::{Deserialize, Serialize};

/// Version information printed by `--version`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub revision: String,
    pub build_date: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        revision: option_env!("DEPLOYER_GIT_REVISION")
            .unwrap_or("unknown")
            .to_string(),
        build_date: option_env!("DEPLOYER_BUILD_DATE")
            .unwrap_or("unknown")
            .to_string(),
    }
}
