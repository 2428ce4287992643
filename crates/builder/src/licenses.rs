//! License aggregation by artifact category
//!
//! Each requested category resolves to the licenses of the artifacts
//! shipped in it:
//!
//! 1. a platform override for the target platform, when the gate is open,
//!    replaces everything else;
//! 2. otherwise the category's own license list;
//! 3. otherwise the recipe's top-level licenses.
//!
//! A category must be declared by the recipe in some form, `libs` and
//! `bins` included, or the request fails with `UnknownCategory`.

use crate::platform::PlatformGate;
use crate::recipe::RecipeDefinition;
use forge_errors::{BuildError, Error};
use forge_types::License;
use std::collections::BTreeMap;

/// Licenses of each requested category
///
/// Requesting the same category twice yields a single entry.
///
/// # Errors
///
/// Returns `UnknownCategory` for a category the recipe never declares.
pub fn licenses_by_categories<S: AsRef<str>>(
    definition: &RecipeDefinition,
    gate: PlatformGate,
    categories: &[S],
) -> Result<BTreeMap<String, Vec<License>>, Error> {
    let mut resolved = BTreeMap::new();

    for name in categories {
        let name = name.as_ref();
        if resolved.contains_key(name) {
            continue;
        }
        resolved.insert(name.to_string(), category_licenses(definition, gate, name)?);
    }

    Ok(resolved)
}

fn category_licenses(
    definition: &RecipeDefinition,
    gate: PlatformGate,
    name: &str,
) -> Result<Vec<License>, Error> {
    let category = definition
        .category(name)
        .ok_or_else(|| BuildError::UnknownCategory {
            recipe: definition.name().to_string(),
            category: name.to_string(),
        })?;

    let base = category
        .licenses
        .as_deref()
        .unwrap_or(definition.licenses());
    Ok(gate.replace(base, &category.platform_licenses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_types::Platform;

    fn definition() -> RecipeDefinition {
        RecipeDefinition::builder("recipe", "0.0.0")
            .licenses([License::Lgpl])
            .files("libs", ["librecipe-test"])
            .files("bins", ["recipe-test"])
            .files_licenses("bins", [License::Gpl])
            .platform_files("test", Platform::Linux, ["test1"])
            .platform_files_licenses("test", Platform::Linux, [License::Bsd])
            .build()
            .unwrap()
    }

    #[test]
    fn test_libs_fall_back_to_recipe_licenses() {
        let gate = PlatformGate::new(None, Platform::Linux);
        let licenses = licenses_by_categories(&definition(), gate, &["libs"]).unwrap();
        assert_eq!(licenses.len(), 1);
        assert_eq!(licenses["libs"], [License::Lgpl]);
    }

    #[test]
    fn test_category_licenses_take_precedence() {
        let gate = PlatformGate::new(None, Platform::Linux);
        let licenses = licenses_by_categories(&definition(), gate, &["bins"]).unwrap();
        assert_eq!(licenses["bins"], [License::Gpl]);
    }

    #[test]
    fn test_platform_override_replaces() {
        let gate = PlatformGate::new(Some(Platform::Linux), Platform::Linux);
        let licenses = licenses_by_categories(&definition(), gate, &["test"]).unwrap();
        assert_eq!(licenses["test"], [License::Bsd]);
    }

    #[test]
    fn test_gated_override_falls_back() {
        let gate = PlatformGate::new(Some(Platform::Windows), Platform::Linux);
        let licenses = licenses_by_categories(&definition(), gate, &["test"]).unwrap();
        assert_eq!(licenses["test"], [License::Lgpl]);

        let gate = PlatformGate::new(None, Platform::Darwin);
        let licenses = licenses_by_categories(&definition(), gate, &["test"]).unwrap();
        assert_eq!(licenses["test"], [License::Lgpl]);
    }

    #[test]
    fn test_undeclared_category_is_an_error() {
        let gate = PlatformGate::new(None, Platform::Linux);
        let err = licenses_by_categories(&definition(), gate, &["libs", "docs"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::UnknownCategory { ref category, .. }) if category == "docs"
        ));
    }

    #[test]
    fn test_libs_without_files_is_unknown() {
        let definition = RecipeDefinition::builder("meta", "1.0")
            .licenses([License::Mit])
            .files("bins", ["meta"])
            .build()
            .unwrap();
        let gate = PlatformGate::new(None, Platform::Linux);

        let bins = licenses_by_categories(&definition, gate, &["bins"]).unwrap();
        assert_eq!(bins["bins"], [License::Mit]);

        let err = licenses_by_categories(&definition, gate, &["libs"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::UnknownCategory { ref category, .. }) if category == "libs"
        ));
    }

    #[test]
    fn test_multiple_categories_and_repeats() {
        let gate = PlatformGate::new(None, Platform::Linux);
        let licenses =
            licenses_by_categories(&definition(), gate, &["bins", "libs", "bins"]).unwrap();
        assert_eq!(licenses.len(), 2);
        assert_eq!(licenses["libs"], [License::Lgpl]);
        assert_eq!(licenses["bins"], [License::Gpl]);
    }
}
