//! `CMake` build mechanism

use super::{with_user_options, BuildMechanism};
use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::Error;
use forge_types::Platform;

/// `CMake` build mechanism, always out of source
#[derive(Debug, Default)]
pub struct CMakeBuildSystem;

impl CMakeBuildSystem {
    /// Create a new `CMake` build mechanism
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn system_name(platform: Platform) -> &'static str {
        match platform {
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::Darwin => "Darwin",
            Platform::Android => "Android",
            Platform::Ios => "iOS",
        }
    }

    fn binary_dir(&self, ctx: &StepContext) -> String {
        ctx.build_dir
            .join(self.build_directory_name())
            .display()
            .to_string()
    }
}

impl BuildMechanism for CMakeBuildSystem {
    fn name(&self) -> &'static str {
        "cmake"
    }

    fn configure(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        let mut args = vec![
            "-S".to_string(),
            ctx.build_dir.display().to_string(),
            "-B".to_string(),
            self.binary_dir(ctx),
        ];
        args.extend(with_user_options(
            vec![
                format!("-DCMAKE_INSTALL_PREFIX={}", ctx.prefix_arg()),
                "-DCMAKE_BUILD_TYPE=Release".to_string(),
                format!(
                    "-DCMAKE_SYSTEM_NAME={}",
                    Self::system_name(ctx.target_platform)
                ),
            ],
            "-DCMAKE_INSTALL_PREFIX=",
            ctx,
        ));

        Ok(vec![StepAction::command("cmake", args, &ctx.build_dir)])
    }

    fn compile(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::command(
            "cmake",
            [
                "--build".to_string(),
                self.binary_dir(ctx),
                "--parallel".to_string(),
                ctx.jobs.max(1).to_string(),
            ],
            &ctx.build_dir,
        )])
    }

    fn install(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error> {
        Ok(vec![StepAction::command(
            "cmake",
            ["--install".to_string(), self.binary_dir(ctx)],
            &ctx.build_dir,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_systems::test_support::step_context;

    #[test]
    fn test_configure_targets_platform() {
        let mut ctx = step_context();
        ctx.target_platform = Platform::Windows;
        let actions = CMakeBuildSystem::new().configure(&ctx).unwrap();
        let StepAction::Command { program, args, .. } = &actions[0] else {
            panic!("expected command");
        };
        assert_eq!(program, "cmake");
        assert!(args.contains(&"-DCMAKE_SYSTEM_NAME=Windows".to_string()));
        assert!(args.contains(&"/build/zlib-1.3.1/_builddir".to_string()));
    }

    #[test]
    fn test_install_uses_binary_dir() {
        let actions = CMakeBuildSystem::new().install(&step_context()).unwrap();
        assert_eq!(
            actions,
            vec![StepAction::command(
                "cmake",
                ["--install", "/build/zlib-1.3.1/_builddir"],
                "/build/zlib-1.3.1"
            )]
        );
    }
}
