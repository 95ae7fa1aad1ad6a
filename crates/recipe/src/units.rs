//! Measurement units, temperatures and durations.
//!
//! Conversion covers mass and volume only, using fixed factors:
//!
//! | Unit | Base | Factor |
//! |------|------|--------|
//! | g / kg / oz / lb | gram | 1 / 1000 / 28.3495 / 453.592 |
//! | ml / l / tsp / tbsp / cup | milliliter | 1 / 1000 / 5 / 15 / 240 |
//!
//! Count units (`piece`, `pinch`) only convert to themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// Unit attached to an ingredient amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Milliliter,
    Liter,
    Teaspoon,
    Tablespoon,
    Cup,
    Piece,
    Pinch,
}

/// Physical quantity a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Mass,
    Volume,
    Count,
}

impl Unit {
    /// Short label used in rendered output.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::Cup => "cup",
            Unit::Piece => "pc",
            Unit::Pinch => "pinch",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => Dimension::Mass,
            Unit::Milliliter | Unit::Liter | Unit::Teaspoon | Unit::Tablespoon | Unit::Cup => {
                Dimension::Volume
            }
            Unit::Piece | Unit::Pinch => Dimension::Count,
        }
    }

    /// Multiplier into the dimension's base unit (gram or milliliter).
    fn base_factor(&self) -> f64 {
        match self {
            Unit::Gram | Unit::Milliliter => 1.0,
            Unit::Kilogram | Unit::Liter => 1000.0,
            Unit::Ounce => 28.3495,
            Unit::Pound => 453.592,
            Unit::Teaspoon => 5.0,
            Unit::Tablespoon => 15.0,
            Unit::Cup => 240.0,
            Unit::Piece | Unit::Pinch => 1.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Convert `amount` expressed in `from` into `to`.
pub fn convert(amount: f64, from: Unit, to: Unit) -> Result<f64, RecipeError> {
    if from == to {
        return Ok(amount);
    }
    if from.dimension() != to.dimension() || from.dimension() == Dimension::Count {
        return Err(RecipeError::IncompatibleUnits { from, to });
    }
    Ok(amount * from.base_factor() / to.base_factor())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
}

/// Target temperature for a heating action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Temperature {
    pub value: f64,
    pub scale: TemperatureScale,
}

impl Temperature {
    pub fn celsius(value: f64) -> Self {
        Self {
            value,
            scale: TemperatureScale::Celsius,
        }
    }

    pub fn fahrenheit(value: f64) -> Self {
        Self {
            value,
            scale: TemperatureScale::Fahrenheit,
        }
    }

    pub fn to_celsius(&self) -> f64 {
        match self.scale {
            TemperatureScale::Celsius => self.value,
            TemperatureScale::Fahrenheit => (self.value - 32.0) * 5.0 / 9.0,
        }
    }

    pub fn to_fahrenheit(&self) -> f64 {
        match self.scale {
            TemperatureScale::Celsius => self.value * 9.0 / 5.0 + 32.0,
            TemperatureScale::Fahrenheit => self.value,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.scale {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
        };
        write!(f, "{}{suffix}", self.value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
}

/// How long an action lasts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CookDuration {
    pub value: f64,
    pub unit: TimeUnit,
}

impl CookDuration {
    pub fn seconds(value: f64) -> Self {
        Self {
            value,
            unit: TimeUnit::Seconds,
        }
    }

    pub fn minutes(value: f64) -> Self {
        Self {
            value,
            unit: TimeUnit::Minutes,
        }
    }

    pub fn hours(value: f64) -> Self {
        Self {
            value,
            unit: TimeUnit::Hours,
        }
    }

    pub fn as_seconds(&self) -> f64 {
        match self.unit {
            TimeUnit::Seconds => self.value,
            TimeUnit::Minutes => self.value * 60.0,
            TimeUnit::Hours => self.value * 3600.0,
        }
    }
}

impl fmt::Display for CookDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.unit {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
        };
        write!(f, "{} {label}", self.value)
    }
}
