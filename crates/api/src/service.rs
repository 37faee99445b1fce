//! Prediction Service
//!
//! validate → align → classify → label, for one booking at a time.

use crate::artifacts::ArtifactBundle;
use crate::config::DisplayConfig;
use booking_validator::{RawBookingRecord, ValidationConfig, ValidationError, Validator};
use feature_aligner::FeatureAligner;
use inference_engine::{
    format_probability, BookingOutcome, InferenceEngine, InferenceError, LabelLanguage,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Per-request failure; never affects shared state
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Booking rejected: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Prediction as returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    /// Display label in the configured language
    pub label: String,
    pub outcome: BookingOutcome,
    pub canceled: bool,
    /// Probability of the predicted class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability_display: Option<String>,
    pub classifier: String,
    pub used_fallback: bool,
    pub latency_us: u64,
}

/// Shared, read-only prediction pipeline
pub struct PredictionService {
    validator: Validator,
    aligner: FeatureAligner,
    engine: InferenceEngine,
    display: DisplayConfig,
}

impl PredictionService {
    /// Assemble a service from loaded artifacts
    pub fn new(bundle: ArtifactBundle, validation: ValidationConfig, display: DisplayConfig) -> Self {
        Self {
            validator: Validator::new(validation),
            aligner: bundle.aligner,
            engine: bundle.engine,
            display,
        }
    }

    pub fn aligner(&self) -> &FeatureAligner {
        &self.aligner
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Predict whether a booking will be canceled
    pub fn predict(&self, raw: &RawBookingRecord) -> Result<PredictionResponse, ServiceError> {
        let checked = self.validator.check(raw);
        let record = match checked.record {
            Some(record) => record,
            None => {
                metrics::counter!("prediction_errors_total", "kind" => "validation").increment(1);
                return Err(ServiceError::Validation(checked.errors));
            }
        };

        let features = self.aligner.align(&record);
        let result = self.engine.predict(&features).map_err(|e| {
            metrics::counter!("prediction_errors_total", "kind" => "inference").increment(1);
            e
        })?;

        let outcome = result.prediction.outcome;
        let label = outcome.label(self.display.language);
        let probability = result
            .prediction
            .confidence
            .filter(|_| self.display.show_probability);

        metrics::counter!("predictions_total", "label" => outcome.label(LabelLanguage::English))
            .increment(1);
        metrics::histogram!("prediction_latency_us").record(result.latency_us as f64);
        if result.used_fallback {
            metrics::counter!("prediction_fallbacks_total").increment(1);
        }
        debug!("Prediction: {} ({:?}) via {}", label, probability, result.classifier);

        Ok(PredictionResponse {
            label: label.to_string(),
            outcome,
            canceled: outcome.is_canceled(),
            probability,
            probability_display: probability.map(format_probability),
            classifier: result.classifier,
            used_fallback: result.used_fallback,
            latency_us: result.latency_us,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::tests::bundled_config;
    use crate::samples::{likely_canceled, likely_kept};

    fn service(display: DisplayConfig) -> PredictionService {
        let config = bundled_config();
        let bundle = ArtifactBundle::load(&config).unwrap();
        PredictionService::new(bundle, config.aligner.validation, display)
    }

    #[test]
    fn test_short_lead_booking_not_canceled() {
        let response = service(DisplayConfig::default()).predict(&likely_kept()).unwrap();
        assert_eq!(response.label, "Not Canceled");
        assert!(!response.canceled);
        assert_eq!(response.classifier, "rules");
        let p = response.probability.unwrap();
        assert!((0.5..=1.0).contains(&p));
        assert_eq!(response.probability_display.unwrap(), format!("{:.2}", p));
    }

    #[test]
    fn test_long_lead_booking_canceled() {
        let response = service(DisplayConfig::default()).predict(&likely_canceled()).unwrap();
        assert_eq!(response.label, "Canceled");
        assert!(response.canceled);
        assert!(!response.used_fallback);
    }

    #[test]
    fn test_boundary_booking_predicts() {
        let mut raw = likely_kept();
        raw.lead_time = Some(0);
        raw.no_of_adults = Some(0);
        raw.no_of_children = Some(0);
        raw.no_of_weekend_nights = Some(0);
        raw.no_of_week_nights = Some(0);
        raw.no_of_previous_bookings_not_canceled = Some(0);
        raw.no_of_special_requests = Some(0);
        raw.required_car_parking_space = Some(0);
        raw.arrival_date = Some(1);
        raw.arrival_month = Some(1);
        let service = service(DisplayConfig::default());
        let response = service.predict(&raw).unwrap();
        assert!(response.probability.unwrap().is_finite());

        let record = booking_validator::Validator::default().validate(&raw).unwrap();
        let vector = service.aligner().align(&record);
        assert_eq!(vector.len(), service.aligner().width());
        assert!(vector.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut raw = likely_kept();
        raw.type_of_meal_plan = Some("Meal Plan 4".to_string());
        let err = service(DisplayConfig::default()).predict(&raw).unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(matches!(
                    errors[0],
                    ValidationError::UnknownCategory { field: "type_of_meal_plan", .. }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let raw = RawBookingRecord {
            no_of_adults: Some(2),
            ..Default::default()
        };
        match service(DisplayConfig::default()).predict(&raw) {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.len(), 16);
                assert!(errors
                    .iter()
                    .all(|e| matches!(e, ValidationError::SchemaMismatch(_))));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.label)),
        }
    }

    #[test]
    fn test_display_options() {
        let display = DisplayConfig {
            language: LabelLanguage::Indonesian,
            show_probability: false,
        };
        let response = service(display).predict(&likely_canceled()).unwrap();
        assert_eq!(response.label, "Dibatalkan");
        assert!(response.probability.is_none());
        assert!(response.probability_display.is_none());
    }
}
