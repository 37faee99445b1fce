//! Validation Error Types

use thiserror::Error;

/// Errors raised while turning a raw booking into a [`BookingRecord`](crate::BookingRecord)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A field the model was trained on is absent from the record
    #[error("Schema mismatch: missing required field {0}")]
    SchemaMismatch(&'static str),

    /// Categorical value outside the levels seen at training time
    #[error("Unknown category for {field}: {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    /// Numeric value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::SchemaMismatch(field) => field,
            ValidationError::UnknownCategory { field, .. } => field,
            ValidationError::OutOfRange { field, .. } => field,
        }
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::SchemaMismatch(_) => "schema_mismatch",
            ValidationError::UnknownCategory { .. } => "unknown_category",
            ValidationError::OutOfRange { .. } => "out_of_range",
        }
    }
}
