//! Artifact Bundle
//!
//! Everything produced by one training run, loaded together at startup.
//! Loading is all or nothing: any missing or inconsistent artifact aborts.

use crate::config::AppConfig;
use fallback::RuleBasedClassifier;
use feature_aligner::{AlignError, FeatureAligner, FittedScaler, ScalerKind, TrainingSchema};
use inference_engine::{Classifier, InferenceEngine, InferenceError, OnnxClassifier};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Startup failure while loading artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Schema or scaler missing, corrupt, or inconsistent with each other
    #[error("Artifact load failure: {0}")]
    Alignment(#[from] AlignError),

    /// Classifier model missing or corrupt
    #[error("Artifact load failure: {0}")]
    Model(#[from] InferenceError),

    /// Neither a model nor the fallback classifier is available
    #[error("No classifier configured: set artifacts.model_path or enable fallback")]
    NoClassifier,
}

/// Aligner and inference engine built from one training run
pub struct ArtifactBundle {
    pub aligner: FeatureAligner,
    pub engine: InferenceEngine,
}

impl ArtifactBundle {
    /// Load and cross-validate all artifacts named in the configuration
    pub fn load(config: &AppConfig) -> Result<Self, ArtifactError> {
        let paths = &config.artifacts;

        let schema = Arc::new(TrainingSchema::load_json(&paths.schema_path)?);
        let standard = FittedScaler::load_json(ScalerKind::Standard, &paths.standard_scaler_path)?;
        let robust = FittedScaler::load_json(ScalerKind::Robust, &paths.robust_scaler_path)?;
        let aligner = FeatureAligner::new(schema, standard, robust, config.aligner.encoding)?;

        let fallback = config.fallback.enabled.then(|| fallback_classifier(config));
        let engine = match (&paths.model_path, fallback) {
            (Some(model_path), fallback) => {
                let model = OnnxClassifier::load(model_path, aligner.width())?;
                let engine = InferenceEngine::new(Box::new(model), aligner.width());
                match fallback {
                    Some(rules) => engine.with_fallback(rules),
                    None => engine,
                }
            }
            (None, Some(rules)) => {
                info!("No model configured, serving rule-based predictions");
                InferenceEngine::new(rules, aligner.width())
            }
            (None, None) => return Err(ArtifactError::NoClassifier),
        };

        info!(
            "Artifact bundle ready: {} features, classifier {}",
            aligner.width(),
            engine.classifier_name()
        );
        Ok(Self { aligner, engine })
    }
}

fn fallback_classifier(config: &AppConfig) -> Box<dyn Classifier> {
    let defaults = RuleBasedClassifier::default();
    let classifier = match (&config.fallback.rules, config.fallback.bias) {
        (None, None) => defaults,
        (rules, bias) => RuleBasedClassifier::new(
            rules.clone().unwrap_or_else(|| defaults.rules().to_vec()),
            bias.unwrap_or(defaults.bias()),
        ),
    };
    Box::new(classifier)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    pub(crate) fn artifact_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
    }

    pub(crate) fn bundled_config() -> AppConfig {
        let dir = artifact_dir();
        let mut config = AppConfig::default();
        config.artifacts.schema_path = dir.join("columns.json");
        config.artifacts.standard_scaler_path = dir.join("standard_scaler.json");
        config.artifacts.robust_scaler_path = dir.join("robust_scaler.json");
        config
    }

    #[test]
    fn test_bundled_artifacts_load() {
        let bundle = ArtifactBundle::load(&bundled_config()).unwrap();
        assert_eq!(bundle.aligner.width(), 30);
        assert_eq!(bundle.engine.classifier_name(), "rules");
        assert_eq!(bundle.engine.input_width(), 30);
    }

    #[test]
    fn test_missing_schema_is_fatal() {
        let mut config = bundled_config();
        config.artifacts.schema_path = artifact_dir().join("missing.json");
        let err = ArtifactBundle::load(&config).err().expect("load should fail");
        assert!(matches!(
            err,
            ArtifactError::Alignment(AlignError::ArtifactLoad { .. })
        ));
    }

    #[test]
    fn test_swapped_scaler_files_are_fatal() {
        let mut config = bundled_config();
        std::mem::swap(
            &mut config.artifacts.standard_scaler_path,
            &mut config.artifacts.robust_scaler_path,
        );
        assert!(matches!(
            ArtifactBundle::load(&config),
            Err(ArtifactError::Alignment(AlignError::ScalerColumnMismatch { .. }))
        ));
    }

    #[test]
    fn test_missing_model_is_fatal_even_with_fallback() {
        let mut config = bundled_config();
        config.artifacts.model_path = Some(artifact_dir().join("missing.onnx"));
        assert!(matches!(
            ArtifactBundle::load(&config),
            Err(ArtifactError::Model(InferenceError::ModelLoadError(_)))
        ));
    }

    #[test]
    fn test_no_classifier_is_fatal() {
        let mut config = bundled_config();
        config.fallback.enabled = false;
        assert!(matches!(
            ArtifactBundle::load(&config),
            Err(ArtifactError::NoClassifier)
        ));
    }

    #[test]
    fn test_encoding_policy_checked_against_schema() {
        let mut config = bundled_config();
        config.aligner.encoding = feature_aligner::EncodingPolicy::DropFirst;
        assert!(matches!(
            ArtifactBundle::load(&config),
            Err(ArtifactError::Alignment(AlignError::EncodingMismatch { .. }))
        ));
    }
}
