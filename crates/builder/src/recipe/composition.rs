//! Composing recipe types from a definition and the mechanisms it binds
//!
//! Composition runs once per recipe type. It resolves the declared
//! `build_type` and `source_type` through a [`CapabilityRegistry`] and fixes
//! which provider answers each build step: recipe-declared hooks first,
//! then the build mechanism, then the source mechanism. Steps nobody
//! provides are absent from the type, not stubbed.

use super::instance::Recipe;
use super::model::RecipeDefinition;
use crate::build_systems::BuildMechanism;
use crate::context::{BuildContext, StepContext};
use crate::registry::CapabilityRegistry;
use crate::sources::SourceMechanism;
use crate::stages::StepAction;
use forge_errors::{BuildError, Error};
use forge_types::BuildStep;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Recipe-declared implementation of a step
pub type StepHook = Arc<dyn Fn(&StepContext) -> Result<Vec<StepAction>, Error> + Send + Sync>;

/// Who answers a step for a composed recipe type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Provider {
    /// Declared by the recipe itself
    Recipe,
    /// Contributed by the named build mechanism
    Build(&'static str),
    /// Contributed by the named source mechanism
    Source(&'static str),
}

enum Operation {
    Hook(StepHook),
    Build(Arc<dyn BuildMechanism>),
    Source(Arc<dyn SourceMechanism>),
}

impl Operation {
    fn provider(&self) -> Provider {
        match self {
            Self::Hook(_) => Provider::Recipe,
            Self::Build(mechanism) => Provider::Build(mechanism.name()),
            Self::Source(mechanism) => Provider::Source(mechanism.name()),
        }
    }
}

/// A recipe definition composed with its mechanisms
///
/// Immutable once composed and shared between instances through `Arc`.
pub struct RecipeType {
    definition: RecipeDefinition,
    build: Option<Arc<dyn BuildMechanism>>,
    source: Option<Arc<dyn SourceMechanism>>,
    operations: BTreeMap<BuildStep, Operation>,
    step_template: Vec<BuildStep>,
}

impl RecipeType {
    /// Start composing a recipe type
    #[must_use]
    pub fn builder(definition: RecipeDefinition) -> RecipeTypeBuilder {
        RecipeTypeBuilder {
            definition,
            hooks: BTreeMap::new(),
        }
    }

    /// Compose a recipe type with no recipe-declared hooks
    ///
    /// # Errors
    ///
    /// Returns an error if a bound mechanism is not registered.
    pub fn compose(
        definition: RecipeDefinition,
        registry: &CapabilityRegistry,
    ) -> Result<Arc<Self>, Error> {
        Self::builder(definition).compose(registry)
    }

    #[must_use]
    pub fn definition(&self) -> &RecipeDefinition {
        &self.definition
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Name of the bound build mechanism
    #[must_use]
    pub fn build_mechanism(&self) -> Option<&'static str> {
        self.build.as_ref().map(|m| m.name())
    }

    /// Name of the bound source mechanism
    #[must_use]
    pub fn source_mechanism(&self) -> Option<&'static str> {
        self.source.as_ref().map(|m| m.name())
    }

    /// Steps this type can perform, in pipeline order
    #[must_use]
    pub fn operations(&self) -> Vec<BuildStep> {
        self.operations.keys().copied().collect()
    }

    #[must_use]
    pub fn supports(&self, step: BuildStep) -> bool {
        self.operations.contains_key(&step)
    }

    /// Who answers `step`, if anyone
    #[must_use]
    pub fn provider(&self, step: BuildStep) -> Option<Provider> {
        self.operations.get(&step).map(Operation::provider)
    }

    /// Default pipeline new instances copy
    #[must_use]
    pub fn step_template(&self) -> &[BuildStep] {
        &self.step_template
    }

    /// Create an instance bound to `context`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the package name is not a single path
    /// component, or an I/O error if the directories cannot be made absolute.
    pub fn instantiate(self: &Arc<Self>, context: BuildContext) -> Result<Recipe, Error> {
        Recipe::new(Arc::clone(self), context)
    }

    /// Plan `step` through whichever provider composition chose
    ///
    /// # Errors
    ///
    /// Returns `OperationUnavailable` if nothing provides `step`, or the
    /// provider's own error.
    pub(crate) fn invoke(&self, step: BuildStep, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        let unavailable = || -> Error {
            BuildError::OperationUnavailable {
                recipe: self.definition.name().to_string(),
                step: step.name().to_string(),
            }
            .into()
        };

        match self.operations.get(&step).ok_or_else(unavailable)? {
            Operation::Hook(hook) => (hook.as_ref())(ctx),
            Operation::Build(mechanism) => match step {
                BuildStep::Configure => mechanism.configure(ctx),
                BuildStep::Compile => mechanism.compile(ctx),
                BuildStep::Install => mechanism.install(ctx),
                _ => Err(unavailable()),
            },
            Operation::Source(mechanism) => match step {
                BuildStep::Fetch => mechanism.fetch(ctx),
                BuildStep::Extract => mechanism.extract(ctx),
                _ => Err(unavailable()),
            },
        }
    }
}

impl std::fmt::Debug for RecipeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let providers: BTreeMap<BuildStep, Provider> = self
            .operations
            .iter()
            .map(|(step, op)| (*step, op.provider()))
            .collect();
        f.debug_struct("RecipeType")
            .field("name", &self.definition.name())
            .field("version", &self.definition.version())
            .field("operations", &providers)
            .finish_non_exhaustive()
    }
}

/// Collects recipe-declared hooks before composing
pub struct RecipeTypeBuilder {
    definition: RecipeDefinition,
    hooks: BTreeMap<BuildStep, StepHook>,
}

impl RecipeTypeBuilder {
    /// Declare the recipe's own implementation of `step`
    ///
    /// Takes precedence over any mechanism providing the same step.
    #[must_use]
    pub fn hook<F>(mut self, step: BuildStep, hook: F) -> Self
    where
        F: Fn(&StepContext) -> Result<Vec<StepAction>, Error> + Send + Sync + 'static,
    {
        self.hooks.insert(step, Arc::new(hook));
        self
    }

    /// Resolve the bound mechanisms and fix the operation table
    ///
    /// # Errors
    ///
    /// Returns `UnknownCapability` if a bound mechanism is not registered,
    /// or `RecipeError` if the definition is invalid.
    pub fn compose(self, registry: &CapabilityRegistry) -> Result<Arc<RecipeType>, Error> {
        let Self {
            definition,
            mut hooks,
        } = self;
        definition.validate()?;

        let build = definition
            .build_type()
            .map(|name| {
                registry
                    .build_mechanism(name)
                    .ok_or_else(|| unknown_capability("build", name))
            })
            .transpose()?;
        let source = definition
            .source_type()
            .map(|name| {
                registry
                    .source_mechanism(name)
                    .ok_or_else(|| unknown_capability("source", name))
            })
            .transpose()?;

        if !definition.post_install().is_empty() && !hooks.contains_key(&BuildStep::PostInstall) {
            let commands = definition.post_install().to_vec();
            hooks.insert(
                BuildStep::PostInstall,
                Arc::new(move |ctx: &StepContext| -> Result<Vec<StepAction>, Error> {
                    Ok(commands
                        .iter()
                        .map(|script| StepAction::Shell {
                            script: script.clone(),
                            cwd: ctx.build_dir.clone(),
                        })
                        .collect())
                }),
            );
        }

        // Lowest precedence first; later inserts win
        let mut operations = BTreeMap::new();
        if let Some(mechanism) = &source {
            for step in BuildStep::DEFAULT_SEQUENCE.into_iter().filter(|s| s.is_source_step()) {
                operations.insert(step, Operation::Source(Arc::clone(mechanism)));
            }
        }
        if let Some(mechanism) = &build {
            for step in BuildStep::DEFAULT_SEQUENCE.into_iter().filter(|s| s.is_build_step()) {
                operations.insert(step, Operation::Build(Arc::clone(mechanism)));
            }
        }
        for (step, hook) in hooks {
            operations.insert(step, Operation::Hook(hook));
        }

        for (step, op) in &operations {
            tracing::debug!(
                recipe = definition.name(),
                step = step.name(),
                provider = ?op.provider(),
                "composed operation"
            );
        }

        Ok(Arc::new(RecipeType {
            definition,
            build,
            source,
            operations,
            step_template: BuildStep::DEFAULT_SEQUENCE.to_vec(),
        }))
    }
}

fn unknown_capability(kind: &str, name: &str) -> Error {
    BuildError::UnknownCapability {
        kind: kind.to_string(),
        name: name.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> RecipeDefinition {
        RecipeDefinition::builder("recipe", "0.0.0")
            .build_type("autotools")
            .source_type("tarball")
            .url("https://example.org/recipe-0.0.0.tar.gz")
            .build()
            .unwrap()
    }

    #[test]
    fn test_no_bindings_exposes_only_own_operations() {
        let registry = CapabilityRegistry::new();
        let bare = RecipeType::compose(
            RecipeDefinition::builder("meta", "1.0").build().unwrap(),
            &registry,
        )
        .unwrap();
        assert!(bare.operations().is_empty());

        let with_hook = RecipeType::builder(RecipeDefinition::builder("meta", "1.0").build().unwrap())
            .hook(BuildStep::PostInstall, |_| Ok(Vec::new()))
            .compose(&registry)
            .unwrap();
        assert_eq!(with_hook.operations(), [BuildStep::PostInstall]);
    }

    #[test]
    fn test_source_only_has_no_build_steps() {
        let definition = RecipeDefinition::builder("src", "1.0")
            .source_type("git")
            .build()
            .unwrap();
        let recipe_type = RecipeType::compose(definition, &CapabilityRegistry::new()).unwrap();
        assert_eq!(
            recipe_type.operations(),
            [BuildStep::Fetch, BuildStep::Extract]
        );
        assert!(!recipe_type.supports(BuildStep::Compile));
        assert_eq!(recipe_type.provider(BuildStep::Fetch), Some(Provider::Source("git")));
    }

    #[test]
    fn test_recipe_hook_wins_over_mechanism() {
        let recipe_type = RecipeType::builder(definition())
            .hook(BuildStep::Compile, |ctx| {
                Ok(vec![StepAction::command("ninja", Vec::<String>::new(), &ctx.build_dir)])
            })
            .compose(&CapabilityRegistry::new())
            .unwrap();
        assert_eq!(recipe_type.provider(BuildStep::Compile), Some(Provider::Recipe));
        assert_eq!(
            recipe_type.provider(BuildStep::Configure),
            Some(Provider::Build("autotools"))
        );
        assert_eq!(recipe_type.operations().len(), 5);
    }

    #[test]
    fn test_post_install_commands_become_recipe_operation() {
        let definition = RecipeDefinition::builder("recipe", "1.0")
            .post_install(["ldconfig"])
            .build()
            .unwrap();
        let recipe_type = RecipeType::compose(definition, &CapabilityRegistry::new()).unwrap();
        assert_eq!(
            recipe_type.provider(BuildStep::PostInstall),
            Some(Provider::Recipe)
        );
    }

    #[test]
    fn test_unknown_capability() {
        let definition = RecipeDefinition::builder("recipe", "1.0")
            .build_type("scons")
            .build()
            .unwrap();
        let err = RecipeType::compose(definition, &CapabilityRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::UnknownCapability { ref kind, ref name }) if kind == "build" && name == "scons"
        ));
    }
}
