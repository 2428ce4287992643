//! Recipe and build error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("recipe error: {message}")]
    RecipeError { message: String },

    #[error("recipe {recipe} declares no license category {category}")]
    UnknownCategory { recipe: String, category: String },

    #[error("recipe {recipe} has no {step} operation")]
    OperationUnavailable { recipe: String, step: String },

    #[error("unknown {kind} mechanism: {name}")]
    UnknownCapability { kind: String, name: String },

    #[error("recipe {recipe} binds its {kind} mechanism more than once")]
    DuplicateCapability { recipe: String, kind: String },

    #[error("recipe {recipe} has no source location")]
    MissingSource { recipe: String },

    #[error("invalid path: {path} - {reason}")]
    InvalidPath { path: String, reason: String },
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownCategory { .. } => {
                Some("Declare the category's files or licenses in the recipe, or drop it from the request.")
            }
            Self::OperationUnavailable { .. } => {
                Some("Bind a build or source mechanism that provides the step, or remove the step.")
            }
            Self::UnknownCapability { .. } => {
                Some("Register the mechanism before composing recipes that reference it.")
            }
            Self::RecipeError { .. }
            | Self::DuplicateCapability { .. }
            | Self::MissingSource { .. }
            | Self::InvalidPath { .. } => {
                Some("Correct the recipe definition before retrying the build.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::RecipeError { .. } => "build.recipe_error",
            Self::UnknownCategory { .. } => "build.unknown_category",
            Self::OperationUnavailable { .. } => "build.operation_unavailable",
            Self::UnknownCapability { .. } => "build.unknown_capability",
            Self::DuplicateCapability { .. } => "build.duplicate_capability",
            Self::MissingSource { .. } => "build.missing_source",
            Self::InvalidPath { .. } => "build.invalid_path",
        };
        Some(code)
    }
}
