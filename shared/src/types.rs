//! API request and response types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::gauge::needle_angle;
use crate::health_metrics::{
    calculate_metrics, ActivityLevel, BmiCategory, Gender, HealthMetrics, UserProfile,
};
use crate::units::{format_height, HeightUnit, WeightUnit};

/// Calculation request — the completed input form
///
/// Field-level bounds are covered by the `validator` derive; the unit-aware
/// height and weight checks run in [`crate::validation::validate_profile`]
/// after canonicalization.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CalculateRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: i32,
    pub gender: Gender,
    /// Height in `height_unit`
    pub height: f64,
    #[serde(default)]
    pub height_unit: HeightUnit,
    /// Weight in `weight_unit`
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub activity: ActivityLevel,
}

impl CalculateRequest {
    /// Convert into the domain profile
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            name: self.name,
            age: self.age,
            gender: self.gender,
            height: self.height,
            height_unit: self.height_unit,
            weight: self.weight,
            weight_unit: self.weight_unit,
            activity: self.activity,
        }
    }
}

/// Full calculation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetricsResponse {
    /// BMI rounded to one decimal
    pub bmi: f64,
    /// Category tag for programmatic use
    pub category: BmiCategory,
    /// Human-readable category label
    pub category_label: String,
    /// Healthy weight bounds in kg for the given height
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    /// Basal metabolic rate in kcal/day
    pub bmr: i32,
    /// Daily calorie target in kcal/day
    pub daily_calories: i32,
    pub protein_grams: i32,
    pub carbs_grams: i32,
    pub fat_grams: i32,
    /// Canonicalized measurements
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Height rendered in the unit the user typed it in (`F'I"` or `N.N cm`)
    pub height_display: String,
    /// Needle angle for the gauge visualization, degrees in [-90, 90]
    pub gauge_angle_deg: f64,
    /// Offline template advice
    pub advice: String,
}

impl HealthMetricsResponse {
    /// Compute the full response for a validated profile
    pub fn from_profile(profile: &UserProfile) -> Self {
        let metrics = calculate_metrics(profile);
        let height_display = format_height(profile.height, profile.height_unit);
        Self::from_metrics(metrics, height_display)
    }

    fn from_metrics(metrics: HealthMetrics, height_display: String) -> Self {
        Self {
            bmi: metrics.bmi,
            category: metrics.category,
            category_label: metrics.category.description().to_string(),
            min_weight_kg: metrics.min_weight_kg,
            max_weight_kg: metrics.max_weight_kg,
            bmr: metrics.bmr,
            daily_calories: metrics.daily_calories,
            protein_grams: metrics.protein_grams,
            carbs_grams: metrics.carbs_grams,
            fat_grams: metrics.fat_grams,
            height_cm: metrics.height_cm,
            weight_kg: metrics.weight_kg,
            height_display,
            gauge_angle_deg: needle_angle(metrics.bmi),
            advice: metrics.advice,
        }
    }
}

// ============================================================================
// Advice Service Types
// ============================================================================

/// Context sent to the generative advice service
///
/// The free-text lists come straight from the user; empty lists render as
/// "None" in the prompt.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdviceRequest {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

/// Where an advice text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceSource {
    /// Produced by the generative service
    Generated,
    /// The fixed fallback string after a service failure
    Fallback,
}

/// Advice endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
    pub source: AdviceSource,
}

// ============================================================================
// Error Types
// ============================================================================

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn request() -> CalculateRequest {
        CalculateRequest {
            name: "Ada".to_string(),
            age: 25,
            gender: Gender::Male,
            height: 170.0,
            height_unit: HeightUnit::Cm,
            weight: 70.0,
            weight_unit: WeightUnit::Kg,
            activity: ActivityLevel::ModeratelyActive,
        }
    }

    #[test]
    fn test_request_validation_bounds() {
        assert!(request().validate().is_ok());

        let mut req = request();
        req.name = String::new();
        assert!(req.validate().is_err());

        let mut req = request();
        req.age = 0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.age = 121;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_deserialization_defaults() {
        // Units and activity default when omitted
        let req: CalculateRequest = serde_json::from_str(
            r#"{"name":"Ada","age":25,"gender":"female","height":170,"weight":70}"#,
        )
        .unwrap();
        assert_eq!(req.height_unit, HeightUnit::Cm);
        assert_eq!(req.weight_unit, WeightUnit::Kg);
        assert_eq!(req.activity, ActivityLevel::ModeratelyActive);
    }

    #[test]
    fn test_response_from_profile() {
        let response = HealthMetricsResponse::from_profile(&request().into_profile());
        assert!((response.bmi - 24.2).abs() < 1e-9);
        assert_eq!(response.category, BmiCategory::Normal);
        assert_eq!(response.category_label, "Normal Weight");
        assert_eq!(response.bmr, 1643);
        assert_eq!(response.daily_calories, 2546);
        assert_eq!(response.height_display, "170.0 cm");
        assert!(response.gauge_angle_deg > -30.0 && response.gauge_angle_deg < 30.0);
    }

    #[test]
    fn test_advice_request_accepts_minimal_payload() {
        let req: AdviceRequest = serde_json::from_str(
            r#"{"bmi":24.2,"bmi_category":"normal","age":25,"gender":"male"}"#,
        )
        .unwrap();
        assert!(req.health_conditions.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_advice_source_serialization() {
        assert_eq!(
            serde_json::to_string(&AdviceSource::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
