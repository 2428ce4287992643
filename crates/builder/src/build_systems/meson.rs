//! Meson build mechanism

use super::{with_user_options, BuildMechanism};
use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::Error;

/// Meson build mechanism, driven through ninja
#[derive(Debug, Default)]
pub struct MesonBuildSystem;

impl MesonBuildSystem {
    /// Create a new Meson build mechanism
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BuildMechanism for MesonBuildSystem {
    fn name(&self) -> &'static str {
        "meson"
    }

    fn configure(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        let mut args = vec!["setup".to_string(), self.build_directory_name().to_string()];
        args.extend(with_user_options(
            vec![
                format!("--prefix={}", ctx.prefix_arg()),
                "--buildtype=release".to_string(),
            ],
            "--prefix=",
            ctx,
        ));
        Ok(vec![StepAction::command("meson", args, &ctx.build_dir)])
    }

    fn compile(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::command(
            "ninja",
            [
                "-C".to_string(),
                self.build_directory_name().to_string(),
                ctx.jobs_arg(),
            ],
            &ctx.build_dir,
        )])
    }

    fn install(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::command(
            "ninja",
            ["-C", self.build_directory_name(), "install"],
            &ctx.build_dir,
        )])
    }
}
