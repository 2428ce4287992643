#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]
//! Recipe composition and platform resolution for forge
//!
//! Recipes declare metadata, files and licenses, bind at most one build
//! mechanism and one source mechanism, and are composed once into a
//! [`RecipeType`]. Instances of a type resolve platform overrides against
//! the build context and expand their step pipeline into a [`BuildPlan`]
//! of actions for an executor to run.

pub mod build_systems;
mod context;
mod licenses;
pub mod paths;
mod plan;
mod platform;
pub mod recipe;
mod registry;
pub mod sources;
mod stages;
mod steps;

pub use build_systems::{
    AutotoolsBuildSystem, BuildMechanism, CMakeBuildSystem, MakefileBuildSystem, MesonBuildSystem,
};
pub use context::{BuildContext, StepContext};
pub use licenses::licenses_by_categories;
pub use plan::{BuildPlan, PlannedStep};
pub use platform::{PlatformGate, PlatformOverrides};
pub use recipe::{
    parse_recipe, parse_recipe_from_str, Category, Provider, Recipe, RecipeDefinition,
    RecipeDefinitionBuilder, RecipeType, RecipeTypeBuilder, StepHook, IMPLICIT_CATEGORIES,
};
pub use registry::CapabilityRegistry;
pub use sources::{GitSource, LocalSource, SourceMechanism, TarballSource};
pub use stages::StepAction;
pub use steps::StepSet;

// Re-exported so callers need not depend on forge-types directly
pub use forge_types::{BuildStep, License, Platform};
