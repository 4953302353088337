//! Calculation service - validation and metrics computation
//!
//! Bridges the API request to the pure engine: field bounds first, then
//! unit-aware profile validation, then the computation itself. The engine
//! cannot partially fail; either the whole record is produced or the request
//! is rejected up front.

use validator::Validate;

use crate::error::ApiError;
use bmi_insight_shared::types::{CalculateRequest, HealthMetricsResponse};
use bmi_insight_shared::validation::validate_profile;

/// Calculation service
pub struct CalculationService;

impl CalculationService {
    /// Validate the request and compute the full metrics record
    pub fn calculate(request: CalculateRequest) -> Result<HealthMetricsResponse, ApiError> {
        request.validate()?;

        let profile = request.into_profile();
        validate_profile(&profile)?;

        Ok(HealthMetricsResponse::from_profile(&profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmi_insight_shared::health_metrics::{ActivityLevel, BmiCategory, Gender};
    use bmi_insight_shared::units::{HeightUnit, WeightUnit};
    use rstest::rstest;

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
    fn test_calculate_happy_path() {
        let response = CalculationService::calculate(request()).unwrap();
        assert!((response.bmi - 24.2).abs() < 1e-9);
        assert_eq!(response.category, BmiCategory::Normal);
        assert_eq!(response.bmr, 1643);
        assert_eq!(response.daily_calories, 2546);
        assert_eq!(response.protein_grams, 191);
        assert_eq!(response.carbs_grams, 318);
        assert_eq!(response.fat_grams, 57);
    }

    #[test]
    fn test_calculate_rejects_empty_name() {
        let mut req = request();
        req.name = String::new();
        let err = CalculationService::calculate(req).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn test_calculate_rejects_out_of_range_height_after_conversion() {
        // 12 ft converts to 365.76 cm, above the 300 cm bound
        let mut req = request();
        req.height = 12.0;
        req.height_unit = HeightUnit::Ft;
        let err = CalculationService::calculate(req).unwrap_err();
        match err {
            ApiError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("height")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case(50.0, HeightUnit::Cm, true)] // lower bound inclusive
    #[case(300.0, HeightUnit::Cm, true)] // upper bound inclusive
    #[case(49.9, HeightUnit::Cm, false)]
    #[case(1.5, HeightUnit::Ft, false)] // 45.72 cm, below bound
    #[case(6.0, HeightUnit::Ft, true)] // 182.88 cm
    fn test_height_bounds_after_canonicalization(
        #[case] height: f64,
        #[case] unit: HeightUnit,
        #[case] accepted: bool,
    ) {
        let mut req = request();
        req.height = height;
        req.height_unit = unit;
        assert_eq!(CalculationService::calculate(req).is_ok(), accepted);
    }

    #[test]
    fn test_calculate_accepts_imperial_units() {
        let mut req = request();
        req.height = 5.7;
        req.height_unit = HeightUnit::Ft;
        req.weight = 154.0;
        req.weight_unit = WeightUnit::Lb;
        let response = CalculationService::calculate(req).unwrap();
        assert!((response.height_cm - 173.736).abs() < 0.001);
        assert_eq!(response.height_display, "5'8\"");
    }
}
