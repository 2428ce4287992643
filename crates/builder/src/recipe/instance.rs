//! Recipe instances bound to one build invocation

use super::composition::{Provider, RecipeType};
use super::model::RecipeDefinition;
use crate::context::{BuildContext, StepContext};
use crate::licenses;
use crate::paths::absolute_path;
use crate::plan::{BuildPlan, PlannedStep};
use crate::platform::PlatformGate;
use crate::stages::StepAction;
use crate::steps::StepSet;
use forge_errors::{BuildError, Error};
use forge_types::{BuildStep, License, Platform};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One recipe instance
///
/// Owns its step set exclusively; everything else is read from the shared
/// [`RecipeType`] and the build context.
#[derive(Debug)]
pub struct Recipe {
    recipe_type: Arc<RecipeType>,
    context: BuildContext,
    platform: Option<Platform>,
    steps: StepSet,
    repo_dir: PathBuf,
    build_dir: PathBuf,
}

impl Recipe {
    pub(crate) fn new(recipe_type: Arc<RecipeType>, context: BuildContext) -> Result<Self, Error> {
        let package_name = recipe_type.definition().package_name();
        if package_name.contains(['/', '\\']) {
            return Err(BuildError::InvalidPath {
                path: package_name,
                reason: "package name must be a single path component".to_string(),
            }
            .into());
        }
        let repo_dir = absolute_path(&context.local_sources.join(&package_name))?;
        let build_dir = absolute_path(&context.sources.join(&package_name))?;
        let steps = StepSet::from_template(recipe_type.step_template());

        tracing::debug!(
            recipe = %package_name,
            target_platform = %context.target_platform,
            repo_dir = %repo_dir.display(),
            build_dir = %build_dir.display(),
            "instantiated recipe"
        );

        Ok(Self {
            recipe_type,
            context,
            platform: None,
            steps,
            repo_dir,
            build_dir,
        })
    }

    #[must_use]
    pub fn recipe_type(&self) -> &Arc<RecipeType> {
        &self.recipe_type
    }

    #[must_use]
    pub fn definition(&self) -> &RecipeDefinition {
        self.recipe_type.definition()
    }

    #[must_use]
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.definition().name()
    }

    #[must_use]
    pub fn version(&self) -> &str {
        self.definition().version()
    }

    #[must_use]
    pub fn package_name(&self) -> String {
        self.definition().package_name()
    }

    #[must_use]
    pub fn licenses(&self) -> &[License] {
        self.definition().licenses()
    }

    /// Absolute directory under `local_sources` holding fetched sources
    #[must_use]
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Absolute directory under `sources` the build runs in
    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    #[must_use]
    pub fn target_platform(&self) -> Platform {
        self.context.target_platform
    }

    /// Platform this instance is built for
    ///
    /// Follows the target platform until pinned with [`Recipe::set_platform`].
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or(self.context.target_platform)
    }

    /// Pin the instance to `platform`
    ///
    /// A pinned instance only sees platform overrides when `platform`
    /// equals the target platform.
    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = Some(platform);
    }

    fn gate(&self) -> PlatformGate {
        PlatformGate::new(self.platform, self.context.target_platform)
    }

    /// Dependencies with the target platform's additions appended
    #[must_use]
    pub fn list_deps(&self) -> Vec<String> {
        let definition = self.definition();
        self.gate()
            .concat(definition.deps(), definition.platform_deps())
    }

    /// Categories this recipe declares, `libs` and `bins` first
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.definition().category_names()
    }

    /// Files of `category` with the target platform's additions appended
    ///
    /// Undeclared categories have no files.
    #[must_use]
    pub fn files_list_by_category(&self, category: &str) -> Vec<String> {
        self.definition()
            .category(category)
            .map(|c| self.gate().concat(&c.files, &c.platform_files))
            .unwrap_or_default()
    }

    /// Files of every category, in category order
    #[must_use]
    pub fn files_list(&self) -> Vec<String> {
        self.categories()
            .into_iter()
            .flat_map(|category| self.files_list_by_category(category))
            .collect()
    }

    /// Licenses of each requested category
    ///
    /// # Errors
    ///
    /// Returns `UnknownCategory` for a category the recipe never declares.
    pub fn list_licenses_by_categories<S: AsRef<str>>(
        &self,
        categories: &[S],
    ) -> Result<BTreeMap<String, Vec<License>>, Error> {
        licenses::licenses_by_categories(self.definition(), self.gate(), categories)
    }

    /// Steps this instance will run, in order
    #[must_use]
    pub fn steps(&self) -> &[BuildStep] {
        self.steps.as_slice()
    }

    #[must_use]
    pub fn has_step(&self, step: BuildStep) -> bool {
        self.steps.contains(step)
    }

    /// Drop steps from this instance's pipeline; absent steps are ignored
    pub fn remove_steps(&mut self, steps: &[BuildStep]) -> Vec<BuildStep> {
        let removed = self.steps.remove(steps);
        tracing::debug!(recipe = self.name(), ?removed, "removed steps");
        removed
    }

    /// Drop steps by name; unknown names are ignored
    pub fn remove_steps_named<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<BuildStep> {
        let removed = self.steps.remove_named(names);
        tracing::debug!(recipe = self.name(), ?removed, "removed steps");
        removed
    }

    /// Steps the composed type provides, whether or not still scheduled
    #[must_use]
    pub fn operations(&self) -> Vec<BuildStep> {
        self.recipe_type.operations()
    }

    #[must_use]
    pub fn supports(&self, step: BuildStep) -> bool {
        self.recipe_type.supports(step)
    }

    /// Context handed to mechanisms and hooks
    #[must_use]
    pub fn step_context(&self) -> StepContext {
        let definition = self.definition();
        StepContext {
            name: definition.name().to_string(),
            version: definition.version().to_string(),
            package_name: definition.package_name(),
            repo_dir: self.repo_dir.clone(),
            build_dir: self.build_dir.clone(),
            prefix: self.context.prefix.clone(),
            target_platform: self.context.target_platform,
            jobs: self.context.jobs,
            url: definition.url().map(str::to_string),
            commit: definition.commit().map(str::to_string),
            configure_options: definition.configure_options().to_vec(),
        }
    }

    /// Plan one step regardless of whether it is still scheduled
    ///
    /// # Errors
    ///
    /// Returns `OperationUnavailable` if the recipe type has no provider for
    /// `step`, or the provider's own error.
    pub fn run_step(&self, step: BuildStep) -> Result<Vec<StepAction>, Error> {
        self.recipe_type.invoke(step, &self.step_context())
    }

    /// # Errors
    ///
    /// Returns `OperationUnavailable` without a source mechanism or hook.
    pub fn fetch(&self) -> Result<Vec<StepAction>, Error> {
        self.run_step(BuildStep::Fetch)
    }

    /// # Errors
    ///
    /// Returns `OperationUnavailable` without a source mechanism or hook.
    pub fn extract(&self) -> Result<Vec<StepAction>, Error> {
        self.run_step(BuildStep::Extract)
    }

    /// # Errors
    ///
    /// Returns `OperationUnavailable` without a build mechanism or hook.
    pub fn configure(&self) -> Result<Vec<StepAction>, Error> {
        self.run_step(BuildStep::Configure)
    }

    /// # Errors
    ///
    /// Returns `OperationUnavailable` without a build mechanism or hook.
    pub fn compile(&self) -> Result<Vec<StepAction>, Error> {
        self.run_step(BuildStep::Compile)
    }

    /// # Errors
    ///
    /// Returns `OperationUnavailable` without a build mechanism or hook.
    pub fn install(&self) -> Result<Vec<StepAction>, Error> {
        self.run_step(BuildStep::Install)
    }

    /// # Errors
    ///
    /// Returns `OperationUnavailable` unless the recipe declares post-install work.
    pub fn post_install(&self) -> Result<Vec<StepAction>, Error> {
        self.run_step(BuildStep::PostInstall)
    }

    /// Plan every scheduled step in order
    ///
    /// Scheduled steps nobody provides are skipped and reported in
    /// [`BuildPlan::skipped`].
    ///
    /// # Errors
    ///
    /// Returns the first error a provider reports.
    pub fn build_plan(&self) -> Result<BuildPlan, Error> {
        let ctx = self.step_context();
        let mut steps = Vec::new();
        let mut skipped = Vec::new();

        for step in self.steps.iter() {
            let Some(provider) = self.recipe_type.provider(step) else {
                tracing::debug!(recipe = self.name(), step = step.name(), "no provider, skipping");
                skipped.push(step);
                continue;
            };
            steps.push(PlannedStep {
                step,
                provider,
                actions: self.recipe_type.invoke(step, &ctx)?,
            });
        }

        Ok(BuildPlan {
            package_name: ctx.package_name,
            target_platform: ctx.target_platform,
            deps: self.list_deps(),
            steps,
            skipped,
        })
    }

    /// Who answers `step` for this instance's type
    #[must_use]
    pub fn provider(&self, step: BuildStep) -> Option<Provider> {
        self.recipe_type.provider(step)
    }
}
