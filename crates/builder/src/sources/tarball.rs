//! Release tarball source mechanism

use super::{required_url, SourceMechanism};
use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::{BuildError, Error};
use std::path::PathBuf;

/// Downloads a release archive into `repo_dir` and unpacks it into `build_dir`
#[derive(Debug, Default)]
pub struct TarballSource;

impl TarballSource {
    /// Create a new tarball source mechanism
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Location of the downloaded archive
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe has no URL or the URL has no file name.
    pub fn archive_path(ctx: &StepContext) -> Result<PathBuf, Error> {
        let url = required_url(ctx)?;
        let file_name = url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| BuildError::RecipeError {
                message: format!("cannot derive an archive name from {url}"),
            })?;
        Ok(ctx.repo_dir.join(file_name))
    }
}

impl SourceMechanism for TarballSource {
    fn name(&self) -> &'static str {
        "tarball"
    }

    fn fetch(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::Download {
            url: required_url(ctx)?.to_string(),
            dest: Self::archive_path(ctx)?,
        }])
    }

    fn extract(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::Unpack {
            archive: Self::archive_path(ctx)?,
            dest: ctx.build_dir.clone(),
            strip_components: 1,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_systems::test_support::step_context;

    #[test]
    fn test_fetch_downloads_into_repo_dir() {
        let actions = TarballSource::new().fetch(&step_context()).unwrap();
        assert_eq!(
            actions,
            vec![StepAction::Download {
                url: "https://zlib.net/zlib-1.3.1.tar.gz".to_string(),
                dest: PathBuf::from("/cache/zlib-1.3.1/zlib-1.3.1.tar.gz"),
            }]
        );
    }

    #[test]
    fn test_archive_name_ignores_query() {
        let mut ctx = step_context();
        ctx.url = Some("https://example.org/dl/pkg.tar.xz?mirror=1".to_string());
        assert_eq!(
            TarballSource::archive_path(&ctx).unwrap(),
            PathBuf::from("/cache/zlib-1.3.1/pkg.tar.xz")
        );
    }

    #[test]
    fn test_missing_url() {
        let mut ctx = step_context();
        ctx.url = None;
        let err = TarballSource::new().extract(&ctx).unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::MissingSource { .. })
        ));
    }

    #[test]
    fn test_url_without_file_name() {
        let mut ctx = step_context();
        ctx.url = Some("https://example.org/".to_string());
        assert!(TarballSource::archive_path(&ctx).is_err());
    }
}
