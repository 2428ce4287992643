//! Build mechanisms
//!
//! A build mechanism plans the configure, compile and install phases of a
//! recipe. Mechanisms are stateless and shared between every recipe type
//! that binds them.

use crate::context::StepContext;
use crate::stages::StepAction;
use forge_errors::Error;

mod autotools;
mod cmake;
mod makefile;
mod meson;

pub use autotools::AutotoolsBuildSystem;
pub use cmake::CMakeBuildSystem;
pub use makefile::MakefileBuildSystem;
pub use meson::MesonBuildSystem;

/// Trait for build mechanism implementations
pub trait BuildMechanism: Send + Sync {
    /// Identifier recipes bind through `build_type`
    fn name(&self) -> &'static str;

    /// Configure phase
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe lacks data the mechanism needs.
    fn configure(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error>;

    /// Compile phase
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe lacks data the mechanism needs.
    fn compile(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error>;

    /// Install phase
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe lacks data the mechanism needs.
    fn install(&self, ctx: &StepContext) -> Result<Vec<StepAction>, Error>;

    /// Get build directory name for out-of-source builds
    fn build_directory_name(&self) -> &'static str {
        "_builddir"
    }
}

/// Append recipe options, skipping ones that would repeat an argument the
/// mechanism already set through `flag`
pub(crate) fn with_user_options(mut args: Vec<String>, flag: &str, ctx: &StepContext) -> Vec<String> {
    if ctx.configure_options.iter().any(|arg| arg.starts_with(flag)) {
        args.retain(|arg| !arg.starts_with(flag));
    }
    args.extend(ctx.configure_options.iter().cloned());
    args
}
