//! Gauge needle mapping
//!
//! Maps a BMI value onto the needle angle of a semicircular gauge. The dial
//! spans -90° to +90° and is split into four colored arcs: Underweight
//! (-90°..-30°), Normal (-30°..30°), Overweight (30°..60°), Obese (60°..90°).

/// Map a BMI value to a needle angle in degrees.
///
/// Piecewise-linear over the category sub-ranges, clamped to [-90°, 90°].
/// The category boundaries land exactly on the arc boundaries: 18.5 -> -30°,
/// 25 -> 30°, 30 -> 60°, and 40 or above saturates at 90°.
pub fn needle_angle(bmi: f64) -> f64 {
    if bmi <= 0.0 {
        return -90.0;
    }
    if bmi < 18.5 {
        return -90.0 + (bmi / 18.5) * 60.0;
    }
    if bmi < 25.0 {
        return -30.0 + ((bmi - 18.5) / 6.5) * 60.0;
    }
    if bmi < 30.0 {
        return 30.0 + ((bmi - 25.0) / 5.0) * 30.0;
    }
    (60.0 + ((bmi - 30.0) / 10.0) * 30.0).min(90.0)
}
