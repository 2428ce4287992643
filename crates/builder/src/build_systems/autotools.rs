//! GNU Autotools build mechanism

use super::{with_user_options, BuildMechanism};
use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::Error;

/// GNU Autotools build mechanism
#[derive(Debug, Default)]
pub struct AutotoolsBuildSystem;

impl AutotoolsBuildSystem {
    /// Create a new Autotools build mechanism
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn configure_args(ctx: &StepContext) -> Vec<String> {
        let args = vec![
            format!("--prefix={}", ctx.prefix_arg()),
            format!("--libdir={}", ctx.prefix.join("lib").display()),
        ];
        with_user_options(args, "--prefix=", ctx)
    }
}

impl BuildMechanism for AutotoolsBuildSystem {
    fn name(&self) -> &'static str {
        "autotools"
    }

    fn configure(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::command(
            "./configure",
            Self::configure_args(ctx),
            &ctx.build_dir,
        )])
    }

    fn compile(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::command(
            "make",
            [ctx.jobs_arg()],
            &ctx.build_dir,
        )])
    }

    fn install(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::command(
            "make",
            ["install"],
            &ctx.build_dir,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_systems::test_support::step_context;

    #[test]
    fn test_configure_uses_prefix() {
        let actions = AutotoolsBuildSystem::new()
            .configure(&step_context())
            .unwrap();
        match &actions[0] {
            StepAction::Command { program, args, cwd } => {
                assert_eq!(program, "./configure");
                assert_eq!(args[0], "--prefix=/opt/forge");
                assert_eq!(cwd.to_str(), Some("/build/zlib-1.3.1"));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_user_prefix_wins() {
        let mut ctx = step_context();
        ctx.configure_options = vec!["--prefix=/usr".to_string(), "--static".to_string()];
        let actions = AutotoolsBuildSystem::new().configure(&ctx).unwrap();
        let StepAction::Command { args, .. } = &actions[0] else {
            panic!("expected command");
        };
        assert_eq!(
            args.iter().filter(|a| a.starts_with("--prefix=")).count(),
            1
        );
        assert!(args.contains(&"--prefix=/usr".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("--static"));
    }

    #[test]
    fn test_compile_is_parallel() {
        let actions = AutotoolsBuildSystem::new().compile(&step_context()).unwrap();
        assert_eq!(
            actions,
            vec![StepAction::command("make", ["-j4"], "/build/zlib-1.3.1")]
        );
    }
}
