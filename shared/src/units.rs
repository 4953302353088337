//! Unit conversion and normalization module
//!
//! All calculations run on canonical metric units (cm, kg); values are
//! converted at the API boundaries, never inside the formulas.
//!
//! # Design Principles
//!
//! 1. **Internal Consistency**: Storage and math use metric (cm, kg)
//! 2. **Type Safety**: Units are explicit enums, not naming conventions
//! 3. **Conversion at Boundaries**: Convert on input/output, not in business logic

use serde::{Deserialize, Serialize};
use std::fmt;

/// Centimeters per foot
pub const CM_PER_FT: f64 = 30.48;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

// ============================================================================
// Height Units
// ============================================================================

/// Height unit selected on the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Ft,
}

impl HeightUnit {
    /// Convert a value in this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Ft => value * CM_PER_FT,
        }
    }

    /// Convert centimeters to this unit
    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            HeightUnit::Cm => cm,
            HeightUnit::Ft => cm / CM_PER_FT,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Ft => "ft",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            "ft" | "foot" | "feet" => Ok(HeightUnit::Ft),
            _ => Err(format!("Unknown height unit: {}", s)),
        }
    }
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit selected on the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    /// Convert a value in this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lb => value * KG_PER_LB,
        }
    }

    /// Convert kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lb => kg / KG_PER_LB,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lb),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

// ============================================================================
// Conversion Helpers
// ============================================================================

/// Convert a height value between units.
///
/// Identity (exact, no arithmetic) when `from == to`.
pub fn convert_height(value: f64, from: HeightUnit, to: HeightUnit) -> f64 {
    if from == to {
        return value;
    }
    to.from_cm(from.to_cm(value))
}

/// Convert a weight value between units.
///
/// Identity (exact, no arithmetic) when `from == to`.
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    if from == to {
        return value;
    }
    to.from_kg(from.to_kg(value))
}

/// Convert a height for display in an input field, rounded to one decimal.
///
/// Used when the unit selector is toggled so the field shows e.g. `5.6`
/// rather than `5.577427...`.
pub fn convert_height_for_display(value: f64, from: HeightUnit, to: HeightUnit) -> f64 {
    (convert_height(value, from, to) * 10.0).round() / 10.0
}

/// Convert a weight for display in an input field, rounded to one decimal.
pub fn convert_weight_for_display(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    (convert_weight(value, from, to) * 10.0).round() / 10.0
}

// ============================================================================
// Height Display Formatting
// ============================================================================

/// Format a height value for display.
///
/// Feet values are decomposed into whole feet and rounded inches and rendered
/// as `F'I"`. An inches value that rounds to 12 is rendered as `F'12"`, not
/// renormalized into the next foot. Centimeter values render with one decimal
/// and a `cm` suffix.
pub fn format_height(value: f64, unit: HeightUnit) -> String {
    match unit {
        HeightUnit::Ft => {
            let feet = value.floor();
            let inches = ((value - feet) * 12.0).round();
            format!("{}'{}\"", feet as i64, inches as i64)
        }
        HeightUnit::Cm => format!("{value:.1} cm"),
    }
}
