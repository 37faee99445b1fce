//! Cancellation Inference Engine
//!
//! Runs the trained booking-cancellation classifier on aligned feature
//! vectors and maps its class index to a display label.

mod classifier;
mod engine;
mod label;
mod onnx;

pub use classifier::{Classifier, ClassifierOutput};
pub use engine::{InferenceEngine, InferenceResult, Prediction};
pub use label::{format_probability, BookingOutcome, LabelLanguage};
pub use onnx::OnnxClassifier;

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
}
