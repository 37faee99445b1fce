//! Inference Engine Implementation

use crate::classifier::Classifier;
use crate::label::BookingOutcome;
use crate::InferenceError;
use feature_aligner::FeatureVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Prediction result from inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted outcome
    pub outcome: BookingOutcome,
    /// Probability of the predicted class, if the classifier reports one
    pub confidence: Option<f64>,
    /// Probabilities for each class
    pub probabilities: Option<[f64; 2]>,
    /// Timestamp when prediction was made
    pub timestamp_ms: u64,
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The prediction
    pub prediction: Prediction,
    /// Inference latency in microseconds
    pub latency_us: u64,
    /// Whether fallback was used
    pub used_fallback: bool,
    /// Name of the classifier that produced the prediction
    pub classifier: String,
}

/// Runs a primary classifier, falling back to a secondary one on failure
pub struct InferenceEngine {
    primary: Box<dyn Classifier>,
    fallback: Option<Box<dyn Classifier>>,
    /// Width every input vector must have
    input_width: usize,
}

impl InferenceEngine {
    /// Create a new inference engine
    pub fn new(primary: Box<dyn Classifier>, input_width: usize) -> Self {
        info!(
            "Creating inference engine: classifier={}, width={}",
            primary.name(),
            input_width
        );
        Self {
            primary,
            fallback: None,
            input_width,
        }
    }

    /// Attach a classifier used when the primary one fails
    pub fn with_fallback(mut self, fallback: Box<dyn Classifier>) -> Self {
        info!("Fallback classifier enabled: {}", fallback.name());
        self.fallback = Some(fallback);
        self
    }

    /// Run inference on a feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();

        if features.len() != self.input_width {
            return Err(InferenceError::InvalidInputShape {
                expected: self.input_width.to_string(),
                actual: features.len().to_string(),
            });
        }

        let (output, classifier, used_fallback) = match self.primary.classify(features) {
            Ok(output) => (output, self.primary.name(), false),
            Err(e) => match &self.fallback {
                Some(fallback) => {
                    warn!(
                        "Classifier {} failed ({}), using fallback {}",
                        self.primary.name(),
                        e,
                        fallback.name()
                    );
                    (fallback.classify(features)?, fallback.name(), true)
                }
                None => return Err(e),
            },
        };

        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let latency_us = start.elapsed().as_micros() as u64;
        debug!(
            "Inference completed in {}us: {:?} via {}",
            latency_us, output.outcome, classifier
        );

        Ok(InferenceResult {
            prediction: Prediction {
                outcome: output.outcome,
                confidence: output.confidence(),
                probabilities: output.probabilities,
                timestamp_ms,
            },
            latency_us,
            used_fallback,
            classifier: classifier.to_string(),
        })
    }

    /// Name of the primary classifier
    pub fn classifier_name(&self) -> &str {
        self.primary.name()
    }

    /// Whether a fallback classifier is attached
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Expected input width
    pub fn input_width(&self) -> usize {
        self.input_width
    }
}
