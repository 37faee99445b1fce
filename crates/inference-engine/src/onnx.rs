//! ONNX Classifier
//!
//! Expects an ONNX-ML export of the classifier with a single `f32[1, N]`
//! input, a class-label output first and, optionally, a `[1, 2]`
//! probability tensor second (export with ZipMap disabled).

use crate::classifier::{Classifier, ClassifierOutput};
use crate::label::BookingOutcome;
use crate::InferenceError;
use feature_aligner::FeatureVector;
use std::path::Path;
use tracing::{debug, info};
use tract_onnx::prelude::*;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Classifier backed by an optimized tract plan
pub struct OnnxClassifier {
    plan: OnnxPlan,
    width: usize,
    model_path: String,
}

impl OnnxClassifier {
    /// Load and optimize an ONNX model for inputs of the given width
    pub fn load(path: impl AsRef<Path>, width: usize) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading ONNX classifier from {} (width {})", path.display(), width);

        let load_err = |e: TractError| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        };

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(load_err)?
            .with_input_fact(0, f32::fact([1, width]).into())
            .map_err(load_err)?
            .into_optimized()
            .map_err(load_err)?
            .into_runnable()
            .map_err(load_err)?;

        info!("ONNX classifier loaded");
        Ok(Self {
            plan,
            width,
            model_path: path.display().to_string(),
        })
    }

    /// Input width the plan was optimized for
    pub fn width(&self) -> usize {
        self.width
    }

    /// Model path
    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    fn run(&self, features: &FeatureVector) -> TractResult<(i64, Option<[f64; 2]>)> {
        let input = Tensor::from_shape(&[1, self.width], &features.to_f32())?;
        let outputs = self.plan.run(tvec!(input.into()))?;

        let label = outputs[0].cast_to::<i64>()?;
        let class = label
            .as_slice::<i64>()?
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("empty label output"))?;

        let probabilities = match outputs.get(1) {
            Some(tensor) => {
                let probs = tensor.cast_to::<f32>()?;
                match probs.as_slice::<f32>()? {
                    [p0, p1, ..] => Some([*p0 as f64, *p1 as f64]),
                    _ => None,
                }
            }
            None => None,
        };

        Ok((class, probabilities))
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    fn classify(&self, features: &FeatureVector) -> Result<ClassifierOutput, InferenceError> {
        if features.len() != self.width {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("[1, {}]", self.width),
                actual: format!("[1, {}]", features.len()),
            });
        }

        let (class, probabilities) = self
            .run(features)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
        debug!("ONNX classifier: class={} probabilities={:?}", class, probabilities);

        Ok(ClassifierOutput {
            outcome: BookingOutcome::from_class_index(class)?,
            probabilities,
        })
    }
}
