//! Calculation API routes

use crate::error::ApiError;
use crate::services::CalculationService;
use crate::state::AppState;
use axum::{routing::post, Json, Router};
use bmi_insight_shared::types::{CalculateRequest, HealthMetricsResponse};

/// Create calculation routes
pub fn calculation_routes() -> Router<AppState> {
    Router::new().route("/", post(calculate))
}

/// POST /api/v1/calculations - Compute health metrics for a profile
///
/// The computation is pure and stateless; nothing is stored, and each request
/// produces an independent record.
async fn calculate(
    Json(request): Json<CalculateRequest>,
) -> Result<Json<HealthMetricsResponse>, ApiError> {
    CalculationService::calculate(request).map(Json)
}
