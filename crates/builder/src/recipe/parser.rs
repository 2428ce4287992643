//! YAML recipe parser with validation and variable expansion

use super::model::RecipeDefinition;
use forge_errors::{BuildError, Error};
use std::path::Path;

/// Parse a YAML recipe from a file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is invalid or has unknown fields
/// - Validation fails
pub async fn parse_recipe(path: &Path) -> Result<RecipeDefinition, Error> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| BuildError::RecipeError {
            message: format!("failed to read recipe {}: {e}", path.display()),
        })?;

    let definition = parse_recipe_from_str(&content)?;
    tracing::debug!(
        recipe = %definition.package_name(),
        path = %path.display(),
        "parsed recipe"
    );
    Ok(definition)
}

/// Parse a YAML recipe from a string
///
/// # Errors
///
/// Returns an error if:
/// - The YAML is invalid or has unknown fields
/// - Validation fails
pub fn parse_recipe_from_str(content: &str) -> Result<RecipeDefinition, Error> {
    let mut definition: RecipeDefinition =
        serde_yml::from_str(content).map_err(|e| BuildError::RecipeError {
            message: format!("failed to parse YAML: {e}"),
        })?;

    definition.validate()?;
    expand_variables(&mut definition);

    Ok(definition)
}

/// Expand `${name}` and `${version}` in the fields that name sources or run commands
fn expand_variables(definition: &mut RecipeDefinition) {
    let vars = [
        ("name", definition.name.clone()),
        ("version", definition.version.clone()),
    ];

    if let Some(url) = &mut definition.url {
        *url = expand_string(url, &vars);
    }
    if let Some(commit) = &mut definition.commit {
        *commit = expand_string(commit, &vars);
    }
    for command in &mut definition.post_install {
        *command = expand_string(command, &vars);
    }
}

fn expand_string(input: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(input.to_string(), |acc, (key, value)| {
        acc.replace(&format!("${{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_types::{License, Platform};

    const ZLIB: &str = r"
name: zlib
version: 1.3.1
licenses: [BSD-like]
deps: [gettext]
platform_deps:
  windows: [mingw-runtime]
categories:
  libs:
    files: [lib/libz.so]
    platform_files:
      darwin: [lib/libz.dylib]
  devel:
    files: [include/zlib.h]
    licenses: [MIT]
build_type: autotools
source_type: tarball
url: https://zlib.net/${name}-${version}.tar.gz
post_install:
  - rm -f ${version}.stamp
";

    #[test]
    fn test_parse_full_recipe() {
        let definition = parse_recipe_from_str(ZLIB).unwrap();
        assert_eq!(definition.package_name(), "zlib-1.3.1");
        assert_eq!(definition.licenses(), [License::BsdLike]);
        assert_eq!(definition.deps(), ["gettext"]);
        assert_eq!(
            definition.platform_deps().get(Platform::Windows),
            Some(&["mingw-runtime".to_string()][..])
        );
        assert_eq!(
            definition.category("devel").unwrap().licenses,
            Some(vec![License::Mit])
        );
        assert_eq!(definition.build_type(), Some("autotools"));
        assert_eq!(definition.source_type(), Some("tarball"));
    }

    #[test]
    fn test_variables_expanded() {
        let definition = parse_recipe_from_str(ZLIB).unwrap();
        assert_eq!(
            definition.url(),
            Some("https://zlib.net/zlib-1.3.1.tar.gz")
        );
        assert_eq!(definition.post_install(), ["rm -f 1.3.1.stamp"]);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = parse_recipe_from_str("name: ''\nversion: '1.0'\n").unwrap_err();
        assert!(matches!(err, Error::Build(BuildError::RecipeError { .. })));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_recipe_from_str("name: a\nversion: '1'\nbogus: true\n").unwrap_err();
        assert!(matches!(err, Error::Build(BuildError::RecipeError { ref message }) if message.contains("YAML")));
    }

    #[tokio::test]
    async fn test_parse_recipe_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zlib.yml");
        tokio::fs::write(&path, ZLIB).await.unwrap();

        let definition = parse_recipe(&path).await.unwrap();
        assert_eq!(definition.name(), "zlib");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = parse_recipe(Path::new("/nonexistent/recipe.yml"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Build(BuildError::RecipeError { .. })));
    }
}
