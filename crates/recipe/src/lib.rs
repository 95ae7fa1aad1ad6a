//! # Recipe data model
//!
//! Structured description of cooking recipes: entities (ingredients,
//! containers, tools, appliances), a tree of steps made of typed actions,
//! and recipe-level metadata.
//!
//! Recipes are assembled with the fluent [`RecipeBuilder`] DSL, round-trip
//! through JSON, and render to plain text or Markdown. Downstream crates read
//! recipes through accessors only; all mutation (`scale`, `substitute`,
//! `add_tag`) happens through methods that also drop any digest memoized on
//! the instance.
//!
//! ```
//! use recipe::{Ingredient, RecipeBuilder, Unit};
//!
//! let mut recipe = RecipeBuilder::new("Lemonade")
//!     .serves(2)
//!     .ingredient(Ingredient::new("Lemon juice").amount(100.0, Unit::Milliliter))
//!     .ingredient(Ingredient::new("Sugar").amount(2.0, Unit::Tablespoon))
//!     .step(|s| s.mix(None))
//!     .build()
//!     .unwrap();
//!
//! recipe.scale(2.0).unwrap();
//! assert_eq!(recipe.servings(), Some(4));
//!
//! let json = recipe.to_json().unwrap();
//! assert_eq!(recipe::Recipe::from_json(&json).unwrap(), recipe);
//! ```

mod builder;
mod entity;
mod error;
mod recipe;
pub mod render;
mod step;
pub mod units;

pub use crate::builder::{RecipeBuilder, StepBuilder};
pub use crate::entity::{Appliance, Container, Ingredient, Tool};
pub use crate::error::RecipeError;
pub use crate::recipe::{DigestCache, Recipe, RecipeMetadata};
pub use crate::render::{to_markdown, to_text};
pub use crate::step::{Action, Adjustment, Cue, SensoryCheck, Step};
pub use crate::units::{convert, CookDuration, Temperature, TemperatureScale, TimeUnit, Unit};
