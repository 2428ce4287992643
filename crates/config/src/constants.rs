//! Fallback locations used when the configuration leaves a path unset

pub const CONFIG_DIR_NAME: &str = "forge";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Relative to the user cache directory
pub const LOCAL_SOURCES_DIR: &str = "forge/sources";
/// Used when no user cache directory exists
pub const LOCAL_SOURCES_FALLBACK: &str = ".forge/sources";

pub const SOURCES_DIR: &str = "sources";
pub const PREFIX: &str = "/usr/local";

pub const ENV_LOCAL_SOURCES: &str = "FORGE_LOCAL_SOURCES";
pub const ENV_SOURCES: &str = "FORGE_SOURCES";
pub const ENV_PREFIX: &str = "FORGE_PREFIX";
pub const ENV_TARGET_PLATFORM: &str = "FORGE_TARGET_PLATFORM";
pub const ENV_BUILD_JOBS: &str = "FORGE_BUILD_JOBS";
