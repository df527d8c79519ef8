//! Inference Engine Implementation

use crate::features::DemandFeatures;
use crate::model::{load_model, DemandModel};
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of a single prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandPrediction {
    /// Rounded demand estimate
    pub demand: i64,
    /// Unrounded model output
    pub raw: f64,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Owns the loaded model; built once at startup and shared read-only
pub struct InferenceEngine {
    model: Box<dyn DemandModel>,
    model_path: PathBuf,
}

impl InferenceEngine {
    /// Load the model artifact at `path`
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        info!("Creating inference engine with model: {}", path.display());
        let model = load_model(path)?;
        Ok(Self {
            model,
            model_path: path.to_path_buf(),
        })
    }

    /// Wrap an already constructed model
    pub fn with_model(model: impl DemandModel + 'static, model_path: impl Into<PathBuf>) -> Self {
        Self {
            model: Box::new(model),
            model_path: model_path.into(),
        }
    }

    /// Predict demand, rounding the model output half-to-even
    pub fn predict(&self, features: &DemandFeatures) -> Result<DemandPrediction, InferenceError> {
        let start = Instant::now();

        let raw = self.model.predict(features).map_err(|e| {
            metrics::counter!("demand_inference_errors_total").increment(1);
            e
        })?;
        if !raw.is_finite() {
            warn!("Model returned {} for {:?}", raw, features);
            metrics::counter!("demand_inference_errors_total").increment(1);
            return Err(InferenceError::NonFiniteOutput(raw));
        }

        let latency = start.elapsed();
        metrics::counter!("demand_predictions_total").increment(1);
        metrics::histogram!("demand_inference_latency_seconds").record(latency.as_secs_f64());
        debug!("Inference completed in {}us: raw={}", latency.as_micros(), raw);

        Ok(DemandPrediction {
            demand: round_demand(raw),
            raw,
            latency_us: latency.as_micros() as u64,
        })
    }

    /// Model family name
    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }

    /// Get model path
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

/// Round to the nearest integer, ties to even, saturating at the i64 bounds
fn round_demand(raw: f64) -> i64 {
    raw.round_ties_even() as i64
}
