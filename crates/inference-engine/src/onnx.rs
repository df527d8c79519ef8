//! ONNX regressor executed with tract

use crate::features::{DemandFeatures, FEATURE_NAMES};
use crate::model::DemandModel;
use crate::InferenceError;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::debug;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX graph taking a single `f32[1, 4]` input and returning one value
pub struct OnnxModel {
    plan: Plan,
}

impl OnnxModel {
    /// Load and optimize an ONNX model
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| {
                model.with_input_fact(0, f32::fact([1, FEATURE_NAMES.len()]).into())
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {:#}", path.display(), e)))?;

        debug!("Optimized ONNX plan for {}", path.display());
        Ok(Self { plan })
    }
}

impl DemandModel for OnnxModel {
    fn predict(&self, features: &DemandFeatures) -> Result<f64, InferenceError> {
        let input = tensor2(&[features.to_f32()]);

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(format!("{e:#}")))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model returned no outputs".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(format!("{e:#}")))?;

        view.iter()
            .next()
            .map(|&v| v as f64)
            .ok_or_else(|| InferenceError::InferenceFailed("empty model output".to_string()))
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_invalid_onnx_file() {
        let mut file = tempfile::Builder::new().suffix(".onnx").tempfile().unwrap();
        file.write_all(b"definitely not protobuf").unwrap();

        let err = OnnxModel::from_path(file.path()).err().unwrap();
        assert!(matches!(err, InferenceError::ModelLoadError(_)));
    }
}
