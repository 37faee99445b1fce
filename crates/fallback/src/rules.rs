//! Heuristic Cancellation Rules
//!
//! A logistic score over named columns of the aligned vector. Weights are
//! in scaled units, so they apply to whatever the fitted scalers produced.

use feature_aligner::FeatureVector;
use inference_engine::{BookingOutcome, Classifier, ClassifierOutput, InferenceError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One weighted column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub column: String,
    pub weight: f64,
}

/// Default weights: long lead times, repeat cancellers and pricier rooms
/// cancel more; parking, special requests and loyal guests cancel less.
pub const DEFAULT_RULES: &[(&str, f64)] = &[
    ("lead_time", 1.5),
    ("no_of_special_requests", -1.0),
    ("required_car_parking_space", -2.0),
    ("no_of_previous_cancellations", 0.5),
    ("avg_price_per_room", 0.5),
    ("repeated_guest", -1.5),
    ("market_segment_type_Online", 0.5),
    ("market_segment_type_Corporate", -1.0),
    ("market_segment_type_Complementary", -2.0),
];

const DEFAULT_BIAS: f64 = -0.5;

/// Rule-based classifier
#[derive(Debug, Clone)]
pub struct RuleBasedClassifier {
    rules: Vec<ScoringRule>,
    bias: f64,
}

impl RuleBasedClassifier {
    /// Classifier with custom rules
    pub fn new(rules: Vec<ScoringRule>, bias: f64) -> Self {
        Self { rules, bias }
    }

    /// Rules currently applied
    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Logit of cancellation; columns absent from the vector are skipped
    pub fn score(&self, features: &FeatureVector) -> f64 {
        self.rules
            .iter()
            .filter_map(|rule| features.get(&rule.column).map(|v| v * rule.weight))
            .sum::<f64>()
            + self.bias
    }
}

impl Default for RuleBasedClassifier {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(column, weight)| ScoringRule {
                column: column.to_string(),
                weight: *weight,
            })
            .collect();
        Self::new(rules, DEFAULT_BIAS)
    }
}

impl Classifier for RuleBasedClassifier {
    fn name(&self) -> &str {
        "rules"
    }

    fn classify(&self, features: &FeatureVector) -> Result<ClassifierOutput, InferenceError> {
        let score = self.score(features);
        if !score.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "non-finite fallback score {}",
                score
            )));
        }

        let canceled = 1.0 / (1.0 + (-score).exp());
        let outcome = if canceled >= 0.5 {
            BookingOutcome::Canceled
        } else {
            BookingOutcome::NotCanceled
        };
        debug!("Fallback score {:.3} -> p(canceled)={:.3}", score, canceled);

        Ok(ClassifierOutput {
            outcome,
            probabilities: Some([1.0 - canceled, canceled]),
        })
    }
}
