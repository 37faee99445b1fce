//! Application Configuration
//!
//! Layered from an optional TOML file and `BOOKING__`-prefixed environment
//! variables, e.g. `BOOKING__SERVER__ADDR=127.0.0.1:9000`.

use crate::rate_limit::RateLimitConfig;
use booking_validator::ValidationConfig;
use config::{Config, ConfigError, Environment, File};
use fallback::ScoringRule;
use feature_aligner::EncodingPolicy;
use inference_engine::LabelLanguage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub artifacts: ArtifactConfig,
    pub aligner: AlignerConfig,
    pub display: DisplayConfig,
    pub fallback: FallbackConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from `path` (or `BOOKING_CONFIG`, or the default
    /// path) overlaid with environment variables
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var("BOOKING_CONFIG").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("BOOKING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Locations of the training-run artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub schema_path: PathBuf,
    pub standard_scaler_path: PathBuf,
    pub robust_scaler_path: PathBuf,
    /// ONNX export of the classifier; rule-based scoring when absent
    pub model_path: Option<PathBuf>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from("artifacts/columns.json"),
            standard_scaler_path: PathBuf::from("artifacts/standard_scaler.json"),
            robust_scaler_path: PathBuf::from("artifacts/robust_scaler.json"),
            model_path: None,
        }
    }
}

/// Feature alignment settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    pub encoding: EncodingPolicy,
    pub validation: ValidationConfig,
}

/// Presentation of prediction results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub language: LabelLanguage,
    pub show_probability: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: LabelLanguage::English,
            show_probability: true,
        }
    }
}

/// Rule-based fallback classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Use rule-based scoring when no model is configured or the model fails
    pub enabled: bool,
    /// Override the default bias
    pub bias: Option<f64>,
    /// Override the default rules
    pub rules: Option<Vec<ScoringRule>>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bias: None,
            rules: None,
        }
    }
}
