//! Input validation functions
//!
//! Bounds checks for the profile form. Height and weight are canonicalized to
//! metric before the bounds are applied, so `6` with unit `ft` and `183` with
//! unit `cm` pass or fail together.

use crate::health_metrics::UserProfile;

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if name.len() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate age in years (1-120)
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1".to_string());
    }
    if age > 120 {
        return Err("Age must be at most 120".to_string());
    }
    Ok(())
}

/// Validate height in centimeters (50-300)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate weight in kilograms (20-500)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "age" => "Age",
        "gender" => "Gender",
        "height" | "height_cm" => "Height",
        "weight" | "weight_kg" => "Weight",
        "height_unit" => "Height Unit",
        "weight_unit" => "Weight Unit",
        "activity" => "Activity Level",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Validate a complete profile before calculation
///
/// Returns the first failing field. Numeric bounds run against the canonical
/// metric values, not the raw form fields.
pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    validate_name(&profile.name).map_err(|msg| ValidationError::new("name", &msg))?;
    validate_age(profile.age).map_err(|msg| ValidationError::new("age", &msg))?;
    validate_height_cm(profile.height_cm())
        .map_err(|msg| ValidationError::new("height", &msg))?;
    validate_weight_kg(profile.weight_kg())
        .map_err(|msg| ValidationError::new("weight", &msg))?;
    Ok(())
}
