//! Git source mechanism

use super::{required_url, SourceMechanism};
use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::Error;

/// Clones into `repo_dir` and copies the checked-out tree to `build_dir`
#[derive(Debug, Default)]
pub struct GitSource;

impl GitSource {
    /// Create a new git source mechanism
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceMechanism for GitSource {
    fn name(&self) -> &'static str {
        "git"
    }

    fn fetch(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        // Without an explicit commit the version is assumed to be a tag
        let commit = ctx
            .commit
            .clone()
            .unwrap_or_else(|| format!("v{}", ctx.version));
        Ok(vec![StepAction::GitCheckout {
            url: required_url(ctx)?.to_string(),
            commit,
            dest: ctx.repo_dir.clone(),
        }])
    }

    fn extract(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::CopyTree {
            src: ctx.repo_dir.clone(),
            dest: ctx.build_dir.clone(),
        }])
    }
}
