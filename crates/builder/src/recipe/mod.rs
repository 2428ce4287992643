//! Recipe definitions, composition and instances

pub mod composition;
pub mod instance;
pub mod model;
pub mod parser;

pub use composition::{Provider, RecipeType, RecipeTypeBuilder, StepHook};
pub use instance::Recipe;
pub use model::{Category, RecipeDefinition, RecipeDefinitionBuilder, IMPLICIT_CATEGORIES};
pub use parser::{parse_recipe, parse_recipe_from_str};
