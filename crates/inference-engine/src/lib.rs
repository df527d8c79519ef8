//! Demand Inference Engine
//!
//! Loads a pre-trained demand regressor and turns its continuous output into
//! an integer demand estimate. Models are either a linear JSON artifact or an
//! ONNX graph executed with tract.

mod engine;
mod features;
mod model;
mod onnx;

pub use engine::{DemandPrediction, InferenceEngine};
pub use features::{DemandFeatures, FEATURE_NAMES};
pub use model::{load_model, Coefficients, DemandModel, LinearModel};
pub use onnx::OnnxModel;

use std::path::PathBuf;
use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model artifact not found: {}", .0.display())]
    ModelNotFound(PathBuf),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Unsupported model format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Model produced a non-finite prediction: {0}")]
    NonFiniteOutput(f64),
}
