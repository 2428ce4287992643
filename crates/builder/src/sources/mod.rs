//! Source acquisition mechanisms
//!
//! A source mechanism plans how a recipe's sources reach `repo_dir`
//! (fetch) and how they are laid out in `build_dir` (extract).

use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::{BuildError, Error};

mod git;
mod local;
mod tarball;

pub use git::GitSource;
pub use local::LocalSource;
pub use tarball::TarballSource;

/// Trait for source mechanism implementations
pub trait SourceMechanism: Send + Sync {
    /// Identifier recipes bind through `source_type`
    fn name(&self) -> &'static str;

    /// Fetch phase
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe lacks data the mechanism needs.
    fn fetch(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error>;

    /// Extract phase
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe lacks data the mechanism needs.
    fn extract(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error>;
}

/// The recipe's source URL, or `MissingSource`
pub(crate) fn required_url(ctx: &StepContext) -> Result<&str, Error> {
    ctx.url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            BuildError::MissingSource {
                recipe: ctx.name.clone(),
            }
            .into()
        })
}
