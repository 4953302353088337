//! Health metrics calculations module
//!
//! Provides calculations for BMI, BMR, daily calorie needs, healthy weight
//! ranges, and macro splits based on user profile data.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Evidence-Based**: BMR uses the Mifflin-St Jeor equation
//! 3. **Canonical Units**: Formulas only ever see cm and kg
//! 4. **Type Safety**: Strong typing prevents unit confusion

use serde::{Deserialize, Serialize};

use crate::advice::generate_health_advice;
use crate::units::{HeightUnit, WeightUnit};

/// Calories per gram of protein and carbohydrate
pub const KCAL_PER_GRAM_PROTEIN_CARB: f64 = 4.0;

/// Calories per gram of fat
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Macro split: 30% protein, 50% carbs, 20% fat of daily calories
pub const PROTEIN_PCT: f64 = 0.30;
pub const CARBS_PCT: f64 = 0.50;
pub const FAT_PCT: f64 = 0.20;

// ============================================================================
// User Profile Types
// ============================================================================

/// Gender as selected on the input form
///
/// Only used to pick the BMR formula branch; `Female` and `Other` share the
/// non-male branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Activity level for the daily calorie target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little to no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    ModeratelyActive,
    /// Heavy exercise 6-7 days/week
    VeryActive,
}

impl ActivityLevel {
    /// Get the multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }

    /// Get the human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little to no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Heavy exercise 6-7 days/week",
        }
    }

    /// Map a raw multiplier back to its level
    ///
    /// Clients that carry the numeric factor (the legacy form payload) use
    /// this to recover the closed-set variant.
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
        ]
        .into_iter()
        .find(|level| (level.multiplier() - multiplier).abs() < 1e-9)
    }
}

/// Validated user input for one calculation
///
/// Created when the input form is submitted, discarded on reset. Height and
/// weight are kept in the unit the user typed them in; the canonical metric
/// values are derived on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// Age in years
    pub age: i32,
    pub gender: Gender,
    /// Height in `height_unit`
    pub height: f64,
    pub height_unit: HeightUnit,
    /// Weight in `weight_unit`
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub activity: ActivityLevel,
}

impl UserProfile {
    /// Height canonicalized to centimeters
    pub fn height_cm(&self) -> f64 {
        self.height_unit.to_cm(self.height)
    }

    /// Weight canonicalized to kilograms
    pub fn weight_kg(&self) -> f64 {
        self.weight_unit.to_kg(self.weight)
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the BMI range for this category (half-open)
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Calculate BMI from canonical metric values
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify BMI into a category
///
/// The partition is half-open: 18.5 is Normal, 25 is Overweight, 30 is Obese.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Calculate the healthy weight range for a given height
///
/// Bounds at BMI 18.5 and 24.9; a pure function of height, independent of the
/// subject's actual weight.
pub fn healthy_weight_range_kg(height_cm: f64) -> (f64, f64) {
    let height_m = height_cm / 100.0;
    let height_m_sq = height_m * height_m;
    (18.5 * height_m_sq, 24.9 * height_m_sq)
}

// ============================================================================
// BMR and Daily Calories
// ============================================================================

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Male: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Female/Other: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
///
/// Returns the unrounded value; display rounding happens in
/// [`calculate_metrics`].
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Split daily calories into macro grams
///
/// 30% protein and 50% carbs at 4 kcal/g, 20% fat at 9 kcal/g. Each gram
/// value is rounded independently; the rounding error is accepted and not
/// redistributed, so the grams do not necessarily reconstruct the calorie
/// total exactly.
pub fn macro_grams(daily_calories: f64) -> (i32, i32, i32) {
    let protein = (PROTEIN_PCT * daily_calories / KCAL_PER_GRAM_PROTEIN_CARB).round() as i32;
    let carbs = (CARBS_PCT * daily_calories / KCAL_PER_GRAM_PROTEIN_CARB).round() as i32;
    let fat = (FAT_PCT * daily_calories / KCAL_PER_GRAM_FAT).round() as i32;
    (protein, carbs, fat)
}

// ============================================================================
// Full Metrics Record
// ============================================================================

/// Complete health metrics derived from one [`UserProfile`]
///
/// Immutable once computed; a new submission produces a fresh, independent
/// record. No history is kept across calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// BMI rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
    /// Healthy weight lower bound in kg, one decimal
    pub min_weight_kg: f64,
    /// Healthy weight upper bound in kg, one decimal
    pub max_weight_kg: f64,
    /// Basal metabolic rate in kcal/day, rounded for display
    pub bmr: i32,
    /// Daily calorie target in kcal/day
    pub daily_calories: i32,
    pub protein_grams: i32,
    pub carbs_grams: i32,
    pub fat_grams: i32,
    /// Height canonicalized to centimeters
    pub height_cm: f64,
    /// Weight canonicalized to kilograms
    pub weight_kg: f64,
    /// Template-based advice text, always available offline
    pub advice: String,
}

/// Compute the full metrics record for a validated profile
///
/// Inputs are assumed pre-validated (height 50-300 cm, weight 20-500 kg after
/// canonicalization); a zero or negative height is a precondition violation,
/// not a recoverable error.
///
/// The daily calorie target is derived from the *unrounded* BMR, and the
/// macro grams from the *unrounded* calorie product; only the stored fields
/// carry display rounding.
pub fn calculate_metrics(profile: &UserProfile) -> HealthMetrics {
    let height_cm = profile.height_cm();
    let weight_kg = profile.weight_kg();

    let bmi = calculate_bmi(weight_kg, height_cm);
    let category = classify_bmi(bmi);
    let (min_weight, max_weight) = healthy_weight_range_kg(height_cm);

    let bmr = calculate_bmr(weight_kg, height_cm, profile.age, profile.gender);
    let daily_calories = bmr * profile.activity.multiplier();
    let (protein_grams, carbs_grams, fat_grams) = macro_grams(daily_calories);

    let advice = generate_health_advice(&profile.name, category);

    HealthMetrics {
        bmi: round_to_tenth(bmi),
        category,
        min_weight_kg: round_to_tenth(min_weight),
        max_weight_kg: round_to_tenth(max_weight),
        bmr: bmr.round() as i32,
        daily_calories: daily_calories.round() as i32,
        protein_grams,
        carbs_grams,
        fat_grams,
        height_cm,
        weight_kg,
        advice,
    }
}

/// Round to one decimal, half away from zero
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
