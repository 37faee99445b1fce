//! Booking Cancellation Prediction API
//!
//! REST server that validates a booking, aligns it to the training schema
//! and returns a cancellation prediction.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod artifacts;
pub mod config;
pub mod error;
pub mod rate_limit;
mod routes;
pub mod samples;
pub mod service;

use crate::artifacts::ArtifactBundle;
use crate::config::{AppConfig, LoggingConfig};
use crate::error::ApiError;
use crate::service::PredictionService;

/// Application state shared across handlers
pub struct AppState {
    /// Prediction pipeline, read-only after startup
    pub service: PredictionService,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus render handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(service: PredictionService, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            service,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics,
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelStatus,
}

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub classifier: String,
    pub fallback_available: bool,
    pub feature_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/schema", get(routes::model::get_schema))
        .route("/api/v1/samples", get(routes::model::get_samples))
        .route("/api/v1/predictions", post(routes::predictions::create_prediction))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let engine = state.service.engine();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelStatus {
            classifier: engine.classifier_name().to_string(),
            fallback_available: engine.has_fallback(),
            feature_count: engine.input_width(),
        },
    })
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .ok_or(ApiError::NotFound("metrics recorder not installed"))
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) {
    let level = config.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
            .expect("Failed to set tracing subscriber");
    } else {
        tracing::subscriber::set_global_default(builder.finish())
            .expect("Failed to set tracing subscriber");
    }
}

/// Run the server
pub async fn run_server(config: AppConfig, bundle: ArtifactBundle) -> anyhow::Result<()> {
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder not installed: {}", e);
            None
        }
    };

    let service = PredictionService::new(
        bundle,
        config.aligner.validation.clone(),
        config.display.clone(),
    );
    let state = Arc::new(AppState::new(service, metrics));
    let mut app = create_router(state);

    match rate_limit::create_governor_config(&config.rate_limit) {
        Some(governor) => app = app.layer(GovernorLayer { config: governor }),
        None => warn!("Invalid rate limit settings, serving without rate limiting"),
    }

    info!("Starting API server on {}", config.server.addr);

    let listener = tokio::net::TcpListener::bind(&config.server.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
