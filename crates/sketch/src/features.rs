//! Feature extraction: recipe → ordered token stream.
//!
//! Traversal order:
//!
//! 1. every ingredient name, in list order;
//! 2. for each top-level step, depth-first:
//!    - per action: type tag, then ingredient name, container name,
//!      temperature value, duration value (absent fields are skipped);
//!    - per cue: type tag, description;
//!    - per sensory check: type tag, description;
//!    - then each parallel thread, in order.
//!
//! Adjustments, tools, appliances and notes contribute nothing.
//!
//! Numbers hash in their shortest `Display` form (`180.0` → `"180"`), with
//! `-0.0` folded into `"0"`. Magnitudes at or above `1e21` or below `1e-6`
//! render positionally (`"0.0000001"`), not in exponent notation, so hashes
//! of such values differ from encoders that switch to `"1e-7"`.

use std::fmt;

use recipe::{Recipe, Step};

/// Atomic piece of recipe content fed to the bucket hasher.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureToken {
    Text(String),
    Number(f64),
}

impl FeatureToken {
    /// Lowercased string form that gets digested.
    pub fn hash_key(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for FeatureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureToken::Text(text) => f.write_str(text),
            // -0.0 == 0.0, so this also folds negative zero.
            FeatureToken::Number(value) if *value == 0.0 => f.write_str("0"),
            FeatureToken::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Enumerate every feature token of `recipe` in traversal order.
pub fn extract_features(recipe: &Recipe) -> Vec<FeatureToken> {
    let mut tokens = Vec::new();
    for ingredient in recipe.ingredients() {
        push_text(&mut tokens, &ingredient.name);
    }
    for step in recipe.steps() {
        extract_step(step, &mut tokens);
    }
    tokens
}

fn extract_step(step: &Step, tokens: &mut Vec<FeatureToken>) {
    for action in &step.actions {
        push_text(tokens, &action.kind);
        if let Some(ingredient) = &action.ingredient {
            push_text(tokens, &ingredient.name);
        }
        if let Some(container) = &action.container {
            push_text(tokens, &container.name);
        }
        if let Some(temperature) = &action.temperature {
            tokens.push(FeatureToken::Number(temperature.value));
        }
        if let Some(duration) = &action.duration {
            tokens.push(FeatureToken::Number(duration.value));
        }
    }
    for cue in &step.cues {
        push_text(tokens, &cue.kind);
        push_text(tokens, &cue.description);
    }
    for check in &step.sensory_checks {
        push_text(tokens, &check.kind);
        push_text(tokens, &check.description);
    }
    for thread in &step.threads {
        extract_step(thread, tokens);
    }
}

// Empty strings are treated like missing fields.
fn push_text(tokens: &mut Vec<FeatureToken>, text: &str) {
    if !text.is_empty() {
        tokens.push(FeatureToken::Text(text.to_string()));
    }
}
