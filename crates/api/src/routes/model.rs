//! Model Introspection Routes

use axum::{extract::State, Json};
use feature_aligner::{EncodingConvention, ROBUST_COLUMNS, STANDARD_COLUMNS};
use serde::Serialize;
use std::sync::Arc;

use crate::samples::{samples, SampleBooking};
use crate::AppState;

/// Encoding detected for one categorical field
#[derive(Debug, Serialize)]
pub struct FieldEncoding {
    pub field: &'static str,
    pub convention: EncodingConvention,
    pub levels: &'static [&'static str],
}

/// Response for schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub width: usize,
    pub columns: Vec<String>,
    pub encodings: Vec<FieldEncoding>,
    pub standard_columns: &'static [&'static str],
    pub robust_columns: &'static [&'static str],
}

/// Training schema and the encoding resolved at startup
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let aligner = state.service.aligner();
    Json(SchemaResponse {
        width: aligner.width(),
        columns: aligner.schema().columns().to_vec(),
        encodings: aligner
            .conventions()
            .map(|(field, convention)| FieldEncoding {
                field: field.name,
                convention,
                levels: field.levels,
            })
            .collect(),
        standard_columns: &STANDARD_COLUMNS,
        robust_columns: &ROBUST_COLUMNS,
    })
}

/// Response for samples endpoint
#[derive(Debug, Serialize)]
pub struct SamplesResponse {
    pub data: Vec<SampleBooking>,
    pub count: usize,
}

/// Bundled example bookings
pub async fn get_samples() -> Json<SamplesResponse> {
    let data = samples();
    Json(SamplesResponse {
        count: data.len(),
        data,
    })
}
