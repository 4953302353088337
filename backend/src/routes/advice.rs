//! Generative advice API routes

use crate::error::ApiError;
use crate::services::AdviceService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use bmi_insight_shared::types::{AdviceRequest, AdviceResponse};
use validator::Validate;

/// Create advice routes
pub fn advice_routes() -> Router<AppState> {
    Router::new().route("/", post(get_advice))
}

/// POST /api/v1/advice - Generate personalized dietary advice
///
/// Provider failures never surface as errors here: the response carries the
/// fixed fallback text with `source: "fallback"` instead.
async fn get_advice(
    State(state): State<AppState>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, ApiError> {
    request.validate()?;
    Ok(Json(AdviceService::get_advice(state.advice(), &request).await))
}
