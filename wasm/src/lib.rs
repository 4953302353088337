//! BMI Insight WASM Module
//!
//! WebAssembly bindings over the shared calculation engine so the full
//! pipeline can run in the browser without a round-trip to the backend.

use wasm_bindgen::prelude::*;

use bmi_insight_shared::health_metrics::{self, ActivityLevel};
use bmi_insight_shared::types::{CalculateRequest, HealthMetricsResponse};
use bmi_insight_shared::units::{self, HeightUnit, WeightUnit};
use bmi_insight_shared::validation::validate_profile;
use bmi_insight_shared::gauge;

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    health_metrics::calculate_bmi(weight_kg, height_cm)
}

/// Get the human-readable BMI category label for a BMI value
#[wasm_bindgen]
pub fn bmi_category(bmi: f64) -> String {
    health_metrics::classify_bmi(bmi).description().to_string()
}

/// Gauge needle angle in degrees for a BMI value, clamped to [-90, 90]
#[wasm_bindgen]
pub fn needle_angle(bmi: f64) -> f64 {
    gauge::needle_angle(bmi)
}

/// Convert a height value between "cm" and "ft", rounded for display
#[wasm_bindgen]
pub fn convert_height(value: f64, from: &str, to: &str) -> Result<f64, JsError> {
    let from: HeightUnit = from.parse().map_err(|e: String| JsError::new(&e))?;
    let to: HeightUnit = to.parse().map_err(|e: String| JsError::new(&e))?;
    Ok(units::convert_height_for_display(value, from, to))
}

/// Convert a weight value between "kg" and "lb", rounded for display
#[wasm_bindgen]
pub fn convert_weight(value: f64, from: &str, to: &str) -> Result<f64, JsError> {
    let from: WeightUnit = from.parse().map_err(|e: String| JsError::new(&e))?;
    let to: WeightUnit = to.parse().map_err(|e: String| JsError::new(&e))?;
    Ok(units::convert_weight_for_display(value, from, to))
}

/// Format a height value for display (`F'I"` or `N.N cm`)
#[wasm_bindgen]
pub fn format_height(value: f64, unit: &str) -> Result<String, JsError> {
    let unit: HeightUnit = unit.parse().map_err(|e: String| JsError::new(&e))?;
    Ok(units::format_height(value, unit))
}

/// Daily calorie target from the unrounded BMR and a raw activity factor
#[wasm_bindgen]
pub fn daily_calories(bmr: f64, activity_factor: f64) -> Result<f64, JsError> {
    let level = ActivityLevel::from_multiplier(activity_factor)
        .ok_or_else(|| JsError::new("Unknown activity factor"))?;
    Ok((bmr * level.multiplier()).round())
}

/// Run the full calculation pipeline on a JSON-encoded request
///
/// Takes the same payload as `POST /api/v1/calculations` and returns the same
/// response shape, validated identically.
#[wasm_bindgen]
pub fn calculate(request_json: &str) -> Result<String, JsError> {
    let request: CalculateRequest =
        serde_json::from_str(request_json).map_err(|e| JsError::new(&e.to_string()))?;

    let profile = request.into_profile();
    validate_profile(&profile).map_err(|e| JsError::new(&e.user_message()))?;

    let response = HealthMetricsResponse::from_profile(&profile);
    serde_json::to_string(&response).map_err(|e| JsError::new(&e.to_string()))
}
