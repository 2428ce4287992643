//! Plain Makefile build mechanism

use super::BuildMechanism;
use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::Error;

/// Hand-written Makefiles with no configure script
#[derive(Debug, Default)]
pub struct MakefileBuildSystem;

impl MakefileBuildSystem {
    /// Create a new Makefile build mechanism
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BuildMechanism for MakefileBuildSystem {
    fn name(&self) -> &'static str {
        "makefile"
    }

    // Nothing to configure; the step stays in the pipeline with an empty plan
    fn configure(&self, _ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(Vec::new())
    }

    fn compile(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        let mut args = vec![ctx.jobs_arg(), format!("PREFIX={}", ctx.prefix_arg())];
        args.extend(ctx.configure_options.iter().cloned());
        Ok(vec![StepAction::command("make", args, &ctx.build_dir)])
    }

    fn install(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::command(
            "make",
            ["install".to_string(), format!("PREFIX={}", ctx.prefix_arg())],
            &ctx.build_dir,
        )])
    }
}
