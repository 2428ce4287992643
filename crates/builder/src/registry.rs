//! Registry of build and source mechanisms recipes can bind by name

use crate::build_systems::{
    AutotoolsBuildSystem, BuildMechanism, CMakeBuildSystem, MakefileBuildSystem, MesonBuildSystem,
};
use crate::sources::{GitSource, LocalSource, SourceMechanism, TarballSource};
use std::sync::Arc;

/// Registry of available capabilities
///
/// Lookups are case-insensitive. A mechanism registered later under an
/// existing name shadows the earlier one.
#[derive(Clone)]
pub struct CapabilityRegistry {
    build: Vec<Arc<dyn BuildMechanism>>,
    source: Vec<Arc<dyn SourceMechanism>>,
}

impl CapabilityRegistry {
    /// Create a new registry with all built-in mechanisms
    #[must_use]
    pub fn new() -> Self {
        Self {
            build: vec![
                Arc::new(AutotoolsBuildSystem::new()),
                Arc::new(CMakeBuildSystem::new()),
                Arc::new(MesonBuildSystem::new()),
                Arc::new(MakefileBuildSystem::new()),
            ],
            source: vec![
                Arc::new(TarballSource::new()),
                Arc::new(GitSource::new()),
                Arc::new(LocalSource::new()),
            ],
        }
    }

    /// Create a registry without any mechanisms
    #[must_use]
    pub fn empty() -> Self {
        Self {
            build: Vec::new(),
            source: Vec::new(),
        }
    }

    /// Register a build mechanism
    pub fn register_build(&mut self, mechanism: impl BuildMechanism + 'static) -> &mut Self {
        tracing::debug!(name = mechanism.name(), "registered build mechanism");
        self.build.push(Arc::new(mechanism));
        self
    }

    /// Register a source mechanism
    pub fn register_source(&mut self, mechanism: impl SourceMechanism + 'static) -> &mut Self {
        tracing::debug!(name = mechanism.name(), "registered source mechanism");
        self.source.push(Arc::new(mechanism));
        self
    }

    /// Get a build mechanism by name
    #[must_use]
    pub fn build_mechanism(&self, name: &str) -> Option<Arc<dyn BuildMechanism>> {
        self.build
            .iter()
            .rev()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Get a source mechanism by name
    #[must_use]
    pub fn source_mechanism(&self, name: &str) -> Option<Arc<dyn SourceMechanism>> {
        self.source
            .iter()
            .rev()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Names of registered build mechanisms, in registration order
    #[must_use]
    pub fn build_names(&self) -> Vec<&'static str> {
        self.build.iter().map(|m| m.name()).collect()
    }

    /// Names of registered source mechanisms, in registration order
    #[must_use]
    pub fn source_names(&self) -> Vec<&'static str> {
        self.source.iter().map(|m| m.name()).collect()
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("build", &self.build_names())
            .field("source", &self.source_names())
            .finish()
    }
}
