//! Taxi Demand Prediction Server
//!
//! Serves point predictions from the pre-trained demand model. The model and
//! settings are loaded once at startup and shared read-only with handlers.

use axum::{
    routing::{get, post},
    Router,
};
use inference_engine::{InferenceEngine, InferenceError};
use metrics_exporter_prometheus::PrometheusHandle;
use settings::AppConfig;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod error;
mod routes;
mod validation;

pub use error::ApiError;
pub use routes::health::HealthResponse;
pub use routes::predict::{DemandRequest, DemandResponse};
pub use validation::{ValidationError, GRID_SIZE, MAX_HOUR_OF_DAY};

/// Application state shared across handlers
pub struct AppState {
    /// Loaded demand model
    pub engine: InferenceEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Prometheus exposition handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Load the model named in the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, InferenceError> {
        let engine = InferenceEngine::load(&config.model_path())?;
        Ok(Self::new(engine))
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict", post(routes::predict::predict_demand))
        .route("/health", get(routes::health::health_handler))
        .route("/metrics", get(routes::metrics::metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Run the server until `shutdown` resolves
pub async fn run_server(
    addr: &str,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Starting prediction server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Prediction server stopped");
    Ok(())
}
