//! HTTP Error Mapping

use crate::service::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

/// One rejected field
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: &'static str,
    pub message: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Errors surfaced by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be decoded
    BadRequest(String),
    /// Prediction pipeline failure
    Service(ServiceError),
    /// Route disabled in this deployment
    NotFound(&'static str),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, errors) = match self {
            ApiError::BadRequest(message) => {
                debug!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, message, Vec::new())
            }
            ApiError::Service(ServiceError::Validation(errors)) => {
                let fields = errors
                    .iter()
                    .map(|e| FieldError {
                        field: e.field(),
                        kind: e.kind(),
                        message: e.to_string(),
                    })
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "invalid booking".to_string(),
                    fields,
                )
            }
            ApiError::Service(ServiceError::Inference(e)) => {
                error!("Inference failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), Vec::new())
            }
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, what.to_string(), Vec::new()),
        };

        let body = ErrorResponse {
            success: false,
            error,
            errors,
        };
        (status, Json(body)).into_response()
    }
}
