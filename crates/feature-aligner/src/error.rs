//! Alignment Error Types

use booking_validator::ValidationError;
use thiserror::Error;

/// Errors raised while loading alignment artifacts or aligning a record
#[derive(Debug, Error)]
pub enum AlignError {
    /// Artifact file missing, unreadable or malformed
    #[error("Failed to load {artifact} from {path}: {reason}")]
    ArtifactLoad {
        artifact: &'static str,
        path: String,
        reason: String,
    },

    /// Schema column list is unusable
    #[error("Invalid training schema: {0}")]
    InvalidSchema(String),

    /// Scaler parameters are inconsistent
    #[error("Invalid {scaler} scaler: {reason}")]
    InvalidScaler { scaler: &'static str, reason: String },

    /// A column the scaler transforms is absent from the schema
    #[error("{scaler} scaler column {column} is not in the training schema")]
    ScalerColumnMissing { scaler: &'static str, column: String },

    /// The scaler was fitted on a different column list than expected
    #[error("{scaler} scaler columns {actual:?} do not match expected {expected:?}")]
    ScalerColumnMismatch {
        scaler: &'static str,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// The schema's indicator columns do not fit the configured encoding
    #[error("Encoding mismatch for {field}: {reason}")]
    EncodingMismatch { field: &'static str, reason: String },

    /// Record failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
