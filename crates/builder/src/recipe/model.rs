//! Declarative recipe definitions
//!
//! A [`RecipeDefinition`] is the immutable record a recipe author writes:
//! identity, licenses, dependencies, artifact categories and the names of
//! the build and source mechanisms it binds. It is created once through
//! [`RecipeDefinitionBuilder`] or parsed from YAML, and never changes after.

use crate::platform::PlatformOverrides;
use forge_errors::{BuildError, Error};
use forge_types::{License, Platform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categories derived from a recipe's library and binary file lists
///
/// They exist only when declared, and are listed ahead of custom categories.
pub const IMPLICIT_CATEGORIES: [&str; 2] = ["libs", "bins"];

/// One named group of shipped artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Licenses for this category; `None` falls back to the recipe's licenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<License>>,

    #[serde(default, skip_serializing_if = "PlatformOverrides::is_empty")]
    pub platform_files: PlatformOverrides<String>,

    #[serde(default, skip_serializing_if = "PlatformOverrides::is_empty")]
    pub platform_licenses: PlatformOverrides<License>,
}

/// Complete recipe declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeDefinition {
    pub(crate) name: String,
    pub(crate) version: String,

    #[serde(default)]
    pub(crate) licenses: Vec<License>,

    #[serde(default)]
    pub(crate) deps: Vec<String>,

    #[serde(default, skip_serializing_if = "PlatformOverrides::is_empty")]
    pub(crate) platform_deps: PlatformOverrides<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) categories: BTreeMap<String, Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) build_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) source_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) commit: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) configure_options: Vec<String>,

    /// Shell commands run after install, in the build directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) post_install: Vec<String>,
}

impl RecipeDefinition {
    /// Start declaring a recipe
    pub fn builder(name: impl Into<String>, version: impl Into<String>) -> RecipeDefinitionBuilder {
        RecipeDefinitionBuilder::new(name, version)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Directory name used under both source roots
    #[must_use]
    pub fn package_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    #[must_use]
    pub fn licenses(&self) -> &[License] {
        &self.licenses
    }

    #[must_use]
    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    #[must_use]
    pub fn platform_deps(&self) -> &PlatformOverrides<String> {
        &self.platform_deps
    }

    /// Declared category by name
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Declared categories, `libs` and `bins` first
    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = IMPLICIT_CATEGORIES
            .into_iter()
            .filter(|name| self.categories.contains_key(*name))
            .collect();
        for name in self.categories.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    #[must_use]
    pub fn build_type(&self) -> Option<&str> {
        self.build_type.as_deref()
    }

    #[must_use]
    pub fn source_type(&self) -> Option<&str> {
        self.source_type.as_deref()
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    #[must_use]
    pub fn configure_options(&self) -> &[String] {
        &self.configure_options
    }

    #[must_use]
    pub fn post_install(&self) -> &[String] {
        &self.post_install
    }

    /// Check the invariants every definition must hold
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` for an empty name, version or category name.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(recipe_error("name cannot be empty"));
        }

        if self.version.trim().is_empty() {
            return Err(recipe_error(format!(
                "{}: version cannot be empty",
                self.name
            )));
        }

        if self.categories.keys().any(|c| c.trim().is_empty()) {
            return Err(recipe_error(format!(
                "{}: category names cannot be empty",
                self.name
            )));
        }

        Ok(())
    }
}

fn recipe_error(message: impl Into<String>) -> Error {
    BuildError::RecipeError {
        message: message.into(),
    }
    .into()
}

/// Builder for [`RecipeDefinition`]
#[derive(Debug, Clone)]
pub struct RecipeDefinitionBuilder {
    definition: RecipeDefinition,
    build_bindings: usize,
    source_bindings: usize,
}

impl RecipeDefinitionBuilder {
    fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            definition: RecipeDefinition {
                name: name.into(),
                version: version.into(),
                licenses: Vec::new(),
                deps: Vec::new(),
                platform_deps: PlatformOverrides::new(),
                categories: BTreeMap::new(),
                build_type: None,
                source_type: None,
                url: None,
                commit: None,
                configure_options: Vec::new(),
                post_install: Vec::new(),
            },
            build_bindings: 0,
            source_bindings: 0,
        }
    }

    #[must_use]
    pub fn licenses(mut self, licenses: impl IntoIterator<Item = License>) -> Self {
        self.definition.licenses.extend(licenses);
        self
    }

    #[must_use]
    pub fn deps<S: Into<String>>(mut self, deps: impl IntoIterator<Item = S>) -> Self {
        self.definition.deps.extend(deps.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn platform_deps<S: Into<String>>(
        mut self,
        platform: Platform,
        deps: impl IntoIterator<Item = S>,
    ) -> Self {
        self.definition
            .platform_deps
            .insert(platform, deps.into_iter().map(Into::into));
        self
    }

    fn category_mut(&mut self, category: &str) -> &mut Category {
        self.definition
            .categories
            .entry(category.to_string())
            .or_default()
    }

    /// Files shipped in `category` on every platform
    #[must_use]
    pub fn files<S: Into<String>>(
        mut self,
        category: &str,
        files: impl IntoIterator<Item = S>,
    ) -> Self {
        self.category_mut(category)
            .files
            .extend(files.into_iter().map(Into::into));
        self
    }

    /// Licenses of `category` on every platform
    #[must_use]
    pub fn files_licenses(
        mut self,
        category: &str,
        licenses: impl IntoIterator<Item = License>,
    ) -> Self {
        self.category_mut(category)
            .licenses
            .get_or_insert_with(Vec::new)
            .extend(licenses);
        self
    }

    /// Extra files shipped in `category` on `platform`
    #[must_use]
    pub fn platform_files<S: Into<String>>(
        mut self,
        category: &str,
        platform: Platform,
        files: impl IntoIterator<Item = S>,
    ) -> Self {
        self.category_mut(category)
            .platform_files
            .insert(platform, files.into_iter().map(Into::into));
        self
    }

    /// Licenses replacing the category's own on `platform`
    #[must_use]
    pub fn platform_files_licenses(
        mut self,
        category: &str,
        platform: Platform,
        licenses: impl IntoIterator<Item = License>,
    ) -> Self {
        self.category_mut(category)
            .platform_licenses
            .insert(platform, licenses);
        self
    }

    /// Bind a build mechanism by registry name
    #[must_use]
    pub fn build_type(mut self, name: impl Into<String>) -> Self {
        self.definition.build_type = Some(name.into());
        self.build_bindings += 1;
        self
    }

    /// Bind a source mechanism by registry name
    #[must_use]
    pub fn source_type(mut self, name: impl Into<String>) -> Self {
        self.definition.source_type = Some(name.into());
        self.source_bindings += 1;
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.definition.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn commit(mut self, commit: impl Into<String>) -> Self {
        self.definition.commit = Some(commit.into());
        self
    }

    #[must_use]
    pub fn configure_options<S: Into<String>>(
        mut self,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        self.definition
            .configure_options
            .extend(options.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn post_install<S: Into<String>>(
        mut self,
        commands: impl IntoIterator<Item = S>,
    ) -> Self {
        self.definition
            .post_install
            .extend(commands.into_iter().map(Into::into));
        self
    }

    /// Finish the definition
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCapability` if a mechanism slot was bound more than
    /// once, or `RecipeError` if the definition is invalid.
    pub fn build(self) -> Result<RecipeDefinition, Error> {
        for (kind, count) in [("build", self.build_bindings), ("source", self.source_bindings)] {
            if count > 1 {
                return Err(BuildError::DuplicateCapability {
                    recipe: self.definition.name.clone(),
                    kind: kind.to_string(),
                }
                .into());
            }
        }

        self.definition.validate()?;
        Ok(self.definition)
    }
}
