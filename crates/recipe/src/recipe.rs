//! The [`Recipe`] aggregate and its per-instance digest cache.
//!
//! Fields are private so that every change goes through a `&mut self`
//! method, and every such method clears the digest cache. A digest computed
//! downstream therefore never outlives the content it was computed from.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{Appliance, Container, Ingredient, Tool};
use crate::error::RecipeError;
use crate::step::Step;
use crate::units::CookDuration;

/// Descriptive, non-structural information about a recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecipeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<CookDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<CookDuration>,
}

/// Memo slots for encoded digests, keyed by whatever parameters the producer
/// used. Readers never observe a partially written value.
///
/// Slots are never evicted; their number is bounded by the distinct
/// configurations hashed against this instance since its last mutation.
#[derive(Debug, Default)]
pub struct DigestCache {
    slots: RwLock<HashMap<String, String>>,
}

impl DigestCache {
    pub fn get(&self, key: &str) -> Option<String> {
        let guard = self
            .slots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.get(key).cloned()
    }

    pub fn store(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut guard = self
            .slots
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self) {
        self.slots
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

// A clone is a new instance; it starts with an empty cache.
impl Clone for DigestCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

/// A complete recipe: entities, step tree and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    servings: Option<u32>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    metadata: RecipeMetadata,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    containers: Vec<Container>,
    #[serde(default)]
    tools: Vec<Tool>,
    #[serde(default)]
    appliances: Vec<Appliance>,
    #[serde(default)]
    steps: Vec<Step>,
    #[serde(skip)]
    digests: DigestCache,
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.servings == other.servings
            && self.tags == other.tags
            && self.metadata == other.metadata
            && self.ingredients == other.ingredients
            && self.containers == other.containers
            && self.tools == other.tools
            && self.appliances == other.appliances
            && self.steps == other.steps
    }
}

/// Raw parts handed over by the builder.
pub(crate) struct RecipeParts {
    pub name: String,
    pub description: Option<String>,
    pub servings: Option<u32>,
    pub tags: Vec<String>,
    pub metadata: RecipeMetadata,
    pub ingredients: Vec<Ingredient>,
    pub containers: Vec<Container>,
    pub tools: Vec<Tool>,
    pub appliances: Vec<Appliance>,
    pub steps: Vec<Step>,
}

impl Recipe {
    pub(crate) fn from_parts(parts: RecipeParts) -> Result<Self, RecipeError> {
        let mut recipe = Self {
            name: parts.name.trim().to_string(),
            description: parts.description,
            servings: parts.servings,
            tags: Vec::new(),
            metadata: parts.metadata,
            ingredients: parts.ingredients,
            containers: parts.containers,
            tools: parts.tools,
            appliances: parts.appliances,
            steps: parts.steps,
            digests: DigestCache::default(),
        };
        for tag in parts.tags {
            recipe.push_tag(tag);
        }
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn servings(&self) -> Option<u32> {
        self.servings
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn metadata(&self) -> &RecipeMetadata {
        &self.metadata
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Digest memo attached to this instance.
    pub fn digests(&self) -> &DigestCache {
        &self.digests
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::MissingName);
        }
        if let Some(0) = self.servings {
            return Err(RecipeError::InvalidServings(0));
        }
        if self.ingredients.iter().any(|i| i.name.trim().is_empty()) {
            return Err(RecipeError::EmptyIngredientName);
        }
        let mut empty_in_steps = false;
        for step in &self.steps {
            step.walk(&mut |s| {
                empty_in_steps |= s
                    .actions
                    .iter()
                    .filter_map(|a| a.ingredient.as_ref())
                    .any(|i| i.name.trim().is_empty());
            });
        }
        if empty_in_steps {
            return Err(RecipeError::EmptyIngredientName);
        }
        Ok(())
    }

    /// Multiply every ingredient amount (list and step actions) and the
    /// servings count by `factor`.
    pub fn scale(&mut self, factor: f64) -> Result<(), RecipeError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(RecipeError::InvalidScale(factor));
        }
        for ingredient in &mut self.ingredients {
            scale_amount(ingredient, factor);
        }
        for step in &mut self.steps {
            step.walk_mut(&mut |s| {
                for ingredient in s.actions.iter_mut().filter_map(|a| a.ingredient.as_mut()) {
                    scale_amount(ingredient, factor);
                }
            });
        }
        if let Some(servings) = self.servings {
            self.servings = Some(((servings as f64) * factor).round().max(1.0) as u32);
        }
        self.invalidate();
        Ok(())
    }

    /// Replace the ingredient named `from` everywhere it appears.
    pub fn substitute(&mut self, from: &str, replacement: Ingredient) -> Result<(), RecipeError> {
        if replacement.name.trim().is_empty() {
            return Err(RecipeError::EmptyIngredientName);
        }
        let mut found = false;
        for ingredient in &mut self.ingredients {
            if ingredient.is_named(from) {
                *ingredient = replacement.clone();
                found = true;
            }
        }
        if !found {
            return Err(RecipeError::UnknownIngredient(from.to_string()));
        }
        for step in &mut self.steps {
            step.walk_mut(&mut |s| {
                for slot in s.actions.iter_mut().filter_map(|a| a.ingredient.as_mut()) {
                    if slot.is_named(from) {
                        *slot = replacement.clone();
                    }
                }
            });
        }
        self.invalidate();
        Ok(())
    }

    /// Add a tag unless an equal one (ignoring case) is present.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        if self.push_tag(tag.into()) {
            self.invalidate();
        }
    }

    fn push_tag(&mut self, tag: String) -> bool {
        let tag = tag.trim().to_string();
        if tag.is_empty() || self.tags.iter().any(|t| t.to_lowercase() == tag.to_lowercase()) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    fn invalidate(&mut self) {
        if !self.digests.is_empty() {
            debug!(recipe = %self.name, "digest_cache_invalidated");
        }
        self.digests.clear();
    }

    pub fn to_json(&self) -> Result<String, RecipeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, RecipeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a recipe from JSON.
    pub fn from_json(json: &str) -> Result<Self, RecipeError> {
        let recipe: Recipe = serde_json::from_str(json)?;
        recipe.validate()?;
        Ok(recipe)
    }
}

fn scale_amount(ingredient: &mut Ingredient, factor: f64) {
    if let Some(amount) = ingredient.amount.as_mut() {
        *amount *= factor;
    }
}
