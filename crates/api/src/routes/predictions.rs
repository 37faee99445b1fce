//! Prediction Routes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use booking_validator::RawBookingRecord;
use std::sync::Arc;

use crate::error::ApiError;
use crate::service::PredictionResponse;
use crate::AppState;

/// Predict cancellation for one booking
pub async fn create_prediction(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawBookingRecord>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(raw) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let response = state.service.predict(&raw)?;
    Ok(Json(response))
}
