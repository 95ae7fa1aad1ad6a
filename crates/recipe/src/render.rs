//! Plain-text and Markdown views of a recipe.

use std::fmt::Write;

use crate::entity::Ingredient;
use crate::recipe::Recipe;
use crate::step::{Action, Step};

/// Render a recipe as plain text.
pub fn to_text(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.name());
    if let Some(description) = recipe.description() {
        let _ = writeln!(out, "{description}");
    }
    if let Some(servings) = recipe.servings() {
        let _ = writeln!(out, "Serves {servings}");
    }

    out.push_str("\nIngredients:\n");
    for ingredient in recipe.ingredients() {
        let _ = writeln!(out, "- {}", describe_ingredient(ingredient));
    }

    out.push_str("\nSteps:\n");
    for (idx, step) in recipe.steps().iter().enumerate() {
        write_step_text(&mut out, step, &format!("{}.", idx + 1), 0);
    }
    out
}

fn write_step_text(out: &mut String, step: &Step, label: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    let actions: Vec<String> = step.actions.iter().map(describe_action).collect();
    let _ = writeln!(out, "{indent}{label} {}", actions.join(", then "));
    for cue in &step.cues {
        let _ = writeln!(out, "{indent}   watch ({}): {}", cue.kind, cue.description);
    }
    for check in &step.sensory_checks {
        let _ = writeln!(
            out,
            "{indent}   check ({}): {}; otherwise {}",
            check.kind, check.description, check.adjustment
        );
    }
    for adjustment in &step.adjustments {
        let _ = writeln!(out, "{indent}   if {}: {}", adjustment.condition, adjustment.action);
    }
    for thread in &step.threads {
        write_step_text(out, thread, "meanwhile:", depth + 1);
    }
}

/// Render a recipe as Markdown.
pub fn to_markdown(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", recipe.name());
    if let Some(description) = recipe.description() {
        let _ = writeln!(out, "{description}\n");
    }
    if !recipe.tags().is_empty() {
        let tags: Vec<String> = recipe.tags().iter().map(|t| format!("`{t}`")).collect();
        let _ = writeln!(out, "Tags: {}\n", tags.join(" "));
    }
    if let Some(servings) = recipe.servings() {
        let _ = writeln!(out, "**Serves:** {servings}\n");
    }

    out.push_str("## Ingredients\n\n");
    for ingredient in recipe.ingredients() {
        let _ = writeln!(out, "- {}", describe_ingredient(ingredient));
    }

    out.push_str("\n## Steps\n\n");
    for (idx, step) in recipe.steps().iter().enumerate() {
        write_step_markdown(&mut out, step, &format!("{}.", idx + 1), 0);
    }
    out
}

fn write_step_markdown(out: &mut String, step: &Step, marker: &str, depth: usize) {
    let indent = "   ".repeat(depth);
    let actions: Vec<String> = step.actions.iter().map(describe_action).collect();
    let _ = writeln!(out, "{indent}{marker} {}", actions.join(", then "));
    for cue in &step.cues {
        let _ = writeln!(out, "{indent}   - *{}*: {}", cue.kind, cue.description);
    }
    for check in &step.sensory_checks {
        let _ = writeln!(
            out,
            "{indent}   - *{}*: {} (otherwise {})",
            check.kind, check.description, check.adjustment
        );
    }
    for adjustment in &step.adjustments {
        let _ = writeln!(
            out,
            "{indent}   - if {}: {}",
            adjustment.condition, adjustment.action
        );
    }
    for thread in &step.threads {
        write_step_markdown(out, thread, "- **meanwhile:**", depth + 1);
    }
}

fn describe_ingredient(ingredient: &Ingredient) -> String {
    let mut text = String::new();
    if let Some(amount) = ingredient.amount {
        let _ = write!(text, "{amount} ");
        if let Some(unit) = ingredient.unit {
            let _ = write!(text, "{unit} ");
        }
    }
    text.push_str(&ingredient.name);
    if let Some(prep) = &ingredient.preparation {
        let _ = write!(text, ", {prep}");
    }
    if ingredient.optional {
        text.push_str(" (optional)");
    }
    text
}

fn describe_action(action: &Action) -> String {
    let mut text = action.kind.clone();
    if let Some(ingredient) = &action.ingredient {
        let _ = write!(text, " {}", ingredient.name);
    }
    if let Some(container) = &action.container {
        let _ = write!(text, " in {}", container.name);
    }
    if let Some(tool) = &action.tool {
        let _ = write!(text, " with {}", tool.name);
    }
    if let Some(appliance) = &action.appliance {
        let _ = write!(text, " using {}", appliance.name);
    }
    if let Some(temperature) = &action.temperature {
        let _ = write!(text, " to {temperature}");
    }
    if let Some(duration) = &action.duration {
        let _ = write!(text, " for {duration}");
    }
    if let Some(note) = &action.note {
        let _ = write!(text, " ({note})");
    }
    text
}
