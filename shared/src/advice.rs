//! Offline advice templates
//!
//! One fixed template per BMI category with the user's name interpolated.
//! This text needs no network and is always available, independent of the
//! generative advice service.

use crate::health_metrics::BmiCategory;

/// Select the advice template for a category and interpolate the name.
pub fn generate_health_advice(name: &str, category: BmiCategory) -> String {
    match category {
        BmiCategory::Underweight => format!(
            "Hi {name}! Your BMI indicates you're underweight. Consider consulting with a \
             healthcare provider or nutritionist to develop a healthy weight gain plan. Focus on \
             nutrient-dense foods and consider strength training to build healthy muscle mass."
        ),
        BmiCategory::Normal => format!(
            "Great job, {name}! You're within a healthy BMI range. Keep up your balanced eating \
             habits and regular physical activity. Your calorie needs support maintaining your \
             current healthy weight. Continue monitoring your health with regular check-ups."
        ),
        BmiCategory::Overweight => format!(
            "Hi {name}, your BMI indicates you're in the overweight range. Consider making \
             gradual lifestyle changes like increasing physical activity and focusing on portion \
             control. Small, sustainable changes can help you reach a healthier weight over time."
        ),
        BmiCategory::Obese => format!(
            "Hi {name}, your BMI suggests you may benefit from working with healthcare \
             professionals to develop a comprehensive weight management plan. Focus on creating \
             sustainable healthy habits with proper nutrition and regular exercise. Remember, \
             every small step counts!"
        ),
    }
}
