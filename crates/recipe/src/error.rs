//! Error types produced by the recipe crate.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`MissingName`](RecipeError::MissingName) | Validation | Recipe name empty after trimming |
//! | [`EmptyIngredientName`](RecipeError::EmptyIngredientName) | Validation | An ingredient anywhere in the recipe has no name |
//! | [`InvalidServings`](RecipeError::InvalidServings) | Validation | Servings set to zero |
//! | [`InvalidScale`](RecipeError::InvalidScale) | Mutation | Scale factor not finite or not positive |
//! | [`UnknownIngredient`](RecipeError::UnknownIngredient) | Mutation | Substitution target not in the recipe |
//! | [`IncompatibleUnits`](RecipeError::IncompatibleUnits) | Conversion | Units measure different dimensions |
//! | [`Json`](RecipeError::Json) | Serialization | JSON encode/decode failure |

use thiserror::Error;

use crate::units::Unit;

/// Errors returned by recipe construction, mutation and conversion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecipeError {
    #[error("recipe requires a non-empty name")]
    MissingName,

    #[error("ingredient name must not be empty")]
    EmptyIngredientName,

    #[error("servings must be >= 1 (got {0})")]
    InvalidServings(u32),

    #[error("scale factor must be finite and > 0 (got {0})")]
    InvalidScale(f64),

    #[error("ingredient '{0}' is not part of this recipe")]
    UnknownIngredient(String),

    #[error("cannot convert {from} to {to}")]
    IncompatibleUnits { from: Unit, to: Unit },

    #[error("json error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for RecipeError {
    fn from(value: serde_json::Error) -> Self {
        RecipeError::Json(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_incompatible_units() {
        let err = RecipeError::IncompatibleUnits {
            from: Unit::Gram,
            to: Unit::Cup,
        };
        assert_eq!(err.to_string(), "cannot convert g to cup");
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let converted: RecipeError = err.into();
        assert!(matches!(converted, RecipeError::Json(_)));
    }
}
