//! Things a recipe refers to: ingredients, containers, tools, appliances.

use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// A food item used by the recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    /// Free-form preparation note ("diced", "room temperature").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: None,
            unit: None,
            preparation: None,
            optional: false,
        }
    }

    pub fn amount(mut self, amount: f64, unit: Unit) -> Self {
        self.amount = Some(amount);
        self.unit = Some(unit);
        self
    }

    /// Amount without a unit, e.g. "3 eggs".
    pub fn count(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn prepared(mut self, preparation: impl Into<String>) -> Self {
        self.preparation = Some(preparation.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Something food is put in: a bowl, a pan, a mug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
        }
    }

    pub fn sized(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

/// Hand tool such as a whisk or knife.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
}

impl Tool {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Powered equipment: oven, stove, espresso machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appliance {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<String>,
}

impl Appliance {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setting: None,
        }
    }

    pub fn with_setting(mut self, setting: impl Into<String>) -> Self {
        self.setting = Some(setting.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_fluent_constructor() {
        let sugar = Ingredient::new("Sugar")
            .amount(2.0, Unit::Teaspoon)
            .prepared("sifted")
            .optional();
        assert_eq!(sugar.name, "Sugar");
        assert_eq!(sugar.amount, Some(2.0));
        assert_eq!(sugar.unit, Some(Unit::Teaspoon));
        assert_eq!(sugar.preparation.as_deref(), Some("sifted"));
        assert!(sugar.optional);
    }

    #[test]
    fn ingredient_name_match_ignores_case() {
        let milk = Ingredient::new("Oat Milk");
        assert!(milk.is_named("oat milk"));
        assert!(!milk.is_named("milk"));
    }

    #[test]
    fn ingredient_json_skips_absent_fields() {
        let json = serde_json::to_string(&Ingredient::new("Salt")).unwrap();
        assert_eq!(json, r#"{"name":"Salt","optional":false}"#);
    }
}
