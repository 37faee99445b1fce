//! Classifier Contract

use crate::label::BookingOutcome;
use crate::InferenceError;
use feature_aligner::FeatureVector;

/// Raw classifier output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierOutput {
    /// Predicted class
    pub outcome: BookingOutcome,
    /// Probability per class index, when the model reports it
    pub probabilities: Option<[f64; 2]>,
}

impl ClassifierOutput {
    /// Probability of the predicted class
    pub fn confidence(&self) -> Option<f64> {
        self.probabilities
            .map(|p| p[self.outcome.class_index()])
    }
}

/// A trained binary classifier over aligned feature vectors.
///
/// Implementations are shared read-only across requests.
pub trait Classifier: Send + Sync {
    /// Short name for logs and responses
    fn name(&self) -> &str;

    /// Score one feature vector
    fn classify(&self, features: &FeatureVector) -> Result<ClassifierOutput, InferenceError>;
}
