//! Sources already present under `local_sources`

use super::SourceMechanism;
use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::Error;

/// Sources that live in `repo_dir` already; nothing is downloaded
#[derive(Debug, Default)]
pub struct LocalSource;

impl LocalSource {
    /// Create a new local source mechanism
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceMechanism for LocalSource {
    fn name(&self) -> &'static str {
        "local"
    }

    fn fetch(&self, _ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(Vec::new())
    }

    fn extract(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::CopyTree {
            src: ctx.repo_dir.clone(),
            dest: ctx.build_dir.clone(),
        }])
    }
}
