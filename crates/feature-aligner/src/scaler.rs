//! Fitted Column Scalers
//!
//! Both scalers apply `(x - center) / scale` per column. They differ only in
//! which statistics were fitted at training time: mean and standard
//! deviation for the standard scaler, median and interquartile range for
//! the robust one.

use crate::error::AlignError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Columns rescaled by the standard scaler, in fitted order
pub const STANDARD_COLUMNS: [&str; 2] = ["arrival_month", "arrival_date"];

/// Columns rescaled by the robust scaler, in fitted order
pub const ROBUST_COLUMNS: [&str; 12] = [
    "no_of_adults",
    "no_of_children",
    "no_of_weekend_nights",
    "no_of_week_nights",
    "required_car_parking_space",
    "lead_time",
    "arrival_year",
    "repeated_guest",
    "no_of_previous_cancellations",
    "no_of_previous_bookings_not_canceled",
    "avg_price_per_room",
    "no_of_special_requests",
];

/// Scaler group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerKind {
    /// Mean / standard deviation
    Standard,
    /// Median / interquartile range
    Robust,
}

impl ScalerKind {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ScalerKind::Standard => "standard",
            ScalerKind::Robust => "robust",
        }
    }

    /// Columns this group must have been fitted on
    pub fn expected_columns(&self) -> &'static [&'static str] {
        match self {
            ScalerKind::Standard => &STANDARD_COLUMNS,
            ScalerKind::Robust => &ROBUST_COLUMNS,
        }
    }
}

/// On-disk scaler parameters.
///
/// A missing centre or scale means the scaler was fitted with that step
/// disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub columns: Vec<String>,
    #[serde(default, alias = "mean")]
    pub center: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

/// A scaler with validated parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FittedScaler {
    kind: ScalerKind,
    columns: Vec<String>,
    center: Vec<f64>,
    scale: Vec<f64>,
}

impl FittedScaler {
    /// Validate parameters and build a scaler
    pub fn new(kind: ScalerKind, params: ScalerParams) -> Result<Self, AlignError> {
        let invalid = |reason: String| AlignError::InvalidScaler {
            scaler: kind.name(),
            reason,
        };

        let width = params.columns.len();
        if width == 0 {
            return Err(invalid("no columns".to_string()));
        }

        let center = match params.center {
            Some(center) => {
                if center.len() != width {
                    return Err(invalid(format!(
                        "{} centre values for {} columns",
                        center.len(),
                        width
                    )));
                }
                if let Some(i) = center.iter().position(|c| !c.is_finite()) {
                    return Err(invalid(format!("non-finite centre for {}", params.columns[i])));
                }
                center
            }
            None => vec![0.0; width],
        };

        let scale = match params.scale {
            Some(scale) => {
                if scale.len() != width {
                    return Err(invalid(format!(
                        "{} scale values for {} columns",
                        scale.len(),
                        width
                    )));
                }
                if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s < 0.0) {
                    return Err(invalid(format!("bad scale for {}", params.columns[i])));
                }
                // Constant features were fitted with a zero spread
                scale
                    .into_iter()
                    .zip(&params.columns)
                    .map(|(s, name)| {
                        if s == 0.0 {
                            debug!("{} scaler: zero scale for {}, using 1.0", kind.name(), name);
                            1.0
                        } else {
                            s
                        }
                    })
                    .collect()
            }
            None => vec![1.0; width],
        };

        Ok(Self {
            kind,
            columns: params.columns,
            center,
            scale,
        })
    }

    /// Load scaler parameters from a JSON artifact
    pub fn load_json(kind: ScalerKind, path: impl AsRef<Path>) -> Result<Self, AlignError> {
        let path = path.as_ref();
        let load_err = |reason: String| AlignError::ArtifactLoad {
            artifact: match kind {
                ScalerKind::Standard => "standard scaler",
                ScalerKind::Robust => "robust scaler",
            },
            path: path.display().to_string(),
            reason,
        };

        let bytes = std::fs::read(path).map_err(|e| load_err(e.to_string()))?;
        let params: ScalerParams =
            serde_json::from_slice(&bytes).map_err(|e| load_err(e.to_string()))?;
        let scaler = Self::new(kind, params)?;

        info!(
            "Loaded {} scaler from {}: {} columns",
            kind.name(),
            path.display(),
            scaler.columns.len()
        );
        Ok(scaler)
    }

    /// Scaler group
    pub fn kind(&self) -> ScalerKind {
        self.kind
    }

    /// Fitted columns in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Centre per column (0.0 when fitted without centring)
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Scale per column (1.0 when fitted without scaling)
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Check the fitted column list against the group's expected columns
    pub fn check_columns(&self) -> Result<(), AlignError> {
        let expected = self.kind.expected_columns();
        if self.columns.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(AlignError::ScalerColumnMismatch {
                scaler: self.kind.name(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
                actual: self.columns.clone(),
            });
        }
        Ok(())
    }

    /// Rescale one value of the column at `i`
    #[inline]
    pub fn scale_value(&self, i: usize, value: f64) -> f64 {
        (value - self.center[i]) / self.scale[i]
    }

    /// Rescale a sub-vector in fitted column order; values past the fitted
    /// width are dropped
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.center.iter().zip(&self.scale))
            .map(|(v, (center, scale))| (v - center) / scale)
            .collect()
    }
}
