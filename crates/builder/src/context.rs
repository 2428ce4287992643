//! Contexts handed to recipes and to the mechanisms they compose

use forge_config::Config;
use forge_types::Platform;
use std::path::PathBuf;

/// Read-only configuration a recipe instance is bound to
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Root of locally cached sources
    pub local_sources: PathBuf,
    /// Root of extracted build trees
    pub sources: PathBuf,
    /// Installation prefix
    pub prefix: PathBuf,
    /// Platform the build targets
    pub target_platform: Platform,
    /// Number of parallel jobs
    pub jobs: usize,
}

impl BuildContext {
    /// Create a context with the default prefix and a single job
    pub fn new(
        local_sources: impl Into<PathBuf>,
        sources: impl Into<PathBuf>,
        target_platform: Platform,
    ) -> Self {
        Self {
            local_sources: local_sources.into(),
            sources: sources.into(),
            prefix: PathBuf::from(forge_config::constants::PREFIX),
            target_platform,
            jobs: 1,
        }
    }

    /// Derive a context from loaded configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            local_sources: config.local_sources(),
            sources: config.sources(),
            prefix: config.prefix(),
            target_platform: config.target_platform(),
            jobs: config.build_jobs(),
        }
    }

    /// Set installation prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set parallel job count
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }
}

/// Everything a build or source mechanism may read while planning a step
#[derive(Clone, Debug)]
pub struct StepContext {
    pub name: String,
    pub version: String,
    pub package_name: String,
    /// Absolute directory holding fetched sources
    pub repo_dir: PathBuf,
    /// Absolute directory the build runs in
    pub build_dir: PathBuf,
    pub prefix: PathBuf,
    pub target_platform: Platform,
    pub jobs: usize,
    pub url: Option<String>,
    pub commit: Option<String>,
    pub configure_options: Vec<String>,
}

impl StepContext {
    /// Prefix rendered for command-line arguments
    #[must_use]
    pub fn prefix_arg(&self) -> String {
        self.prefix.display().to_string()
    }

    /// `-jN` style argument for parallel builds
    #[must_use]
    pub fn jobs_arg(&self) -> String {
        format!("-j{}", self.jobs.max(1))
    }
}
