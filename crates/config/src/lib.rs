#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for forge
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/forge/config.toml)
//! - Environment variables

pub mod constants;
pub mod sections;

pub use sections::{BuildConfig, PathConfig};

use forge_errors::{ConfigError, Error};
use forge_types::Platform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or contains
    /// values of the wrong type.
    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if fs::try_exists(&config_path).await.unwrap_or(false) {
            Self::load_from_file(&config_path).await
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Some(path) = non_empty_var(constants::ENV_LOCAL_SOURCES) {
            self.paths.local_sources = Some(PathBuf::from(path));
        }

        if let Some(path) = non_empty_var(constants::ENV_SOURCES) {
            self.paths.sources = Some(PathBuf::from(path));
        }

        if let Some(path) = non_empty_var(constants::ENV_PREFIX) {
            self.paths.prefix = Some(PathBuf::from(path));
        }

        if let Some(platform) = non_empty_var(constants::ENV_TARGET_PLATFORM) {
            self.build.target_platform =
                platform
                    .parse::<Platform>()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: constants::ENV_TARGET_PLATFORM.to_string(),
                        value: platform.clone(),
                    })?;
        }

        if let Some(jobs) = non_empty_var(constants::ENV_BUILD_JOBS) {
            self.build.build_jobs = jobs.parse().map_err(|_| ConfigError::InvalidValue {
                field: constants::ENV_BUILD_JOBS.to_string(),
                value: jobs.clone(),
            })?;
        }

        Ok(())
    }

    /// Get the local sources root (with default)
    #[must_use]
    pub fn local_sources(&self) -> PathBuf {
        self.paths.local_sources.clone().unwrap_or_else(|| {
            dirs::cache_dir().map_or_else(
                || PathBuf::from(constants::LOCAL_SOURCES_FALLBACK),
                |dir| dir.join(constants::LOCAL_SOURCES_DIR),
            )
        })
    }

    /// Get the build sources root (with default)
    #[must_use]
    pub fn sources(&self) -> PathBuf {
        self.paths
            .sources
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::SOURCES_DIR))
    }

    /// Get the installation prefix (with default)
    #[must_use]
    pub fn prefix(&self) -> PathBuf {
        self.paths
            .prefix
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::PREFIX))
    }

    /// Platform recipes are resolved for
    #[must_use]
    pub fn target_platform(&self) -> Platform {
        self.build.target_platform
    }

    /// Effective parallel job count
    #[must_use]
    pub fn build_jobs(&self) -> usize {
        calculate_build_jobs(self.build.build_jobs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) => {
            tracing::warn!(var = name, "ignoring empty environment variable");
            None
        }
        Err(_) => None,
    }
}

/// Calculate build jobs based on CPU count
#[must_use]
pub fn calculate_build_jobs(config_value: usize) -> usize {
    if config_value > 0 {
        config_value // User override
    } else {
        // Use 75% of CPUs for builds, minimum 1
        let cpus = num_cpus::get();
        (cpus * 3 / 4).max(1)
    }
}
