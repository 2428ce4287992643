//! Configuration sections

use forge_types::Platform;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source tree and install locations
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Root for fetched, cached sources (one directory per package)
    pub local_sources: Option<PathBuf>,
    /// Root for extracted build trees (one directory per package)
    pub sources: Option<PathBuf>,
    /// Installation prefix passed to build mechanisms
    pub prefix: Option<PathBuf>,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_target_platform")]
    pub target_platform: Platform,
    #[serde(default = "default_build_jobs")]
    pub build_jobs: usize, // 0 = auto-detect
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            target_platform: default_target_platform(),
            build_jobs: default_build_jobs(),
        }
    }
}

fn default_target_platform() -> Platform {
    Platform::host()
}

fn default_build_jobs() -> usize {
    0 // 0 = auto-detect
}
