//! Regression model artifacts

use crate::features::DemandFeatures;
use crate::onnx::OnnxModel;
use crate::InferenceError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// A trained demand regressor
pub trait DemandModel: Send + Sync {
    /// Continuous demand estimate for one feature row
    fn predict(&self, features: &DemandFeatures) -> Result<f64, InferenceError>;

    /// Short name of the model family, used in logs and health output
    fn kind(&self) -> &'static str;
}

/// Per-feature weights of a [`LinearModel`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub hour_of_day: f64,
    pub day: f64,
    pub row: f64,
    pub col: f64,
}

/// Linear regressor stored as JSON:
///
/// ```json
/// {"intercept": 3.2, "coefficients": {"hour_of_day": 0.4, "day": 0.01, "row": -0.2, "col": 0.1}}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Coefficients,
}

impl LinearModel {
    /// Read a JSON model artifact
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        let file = File::open(path)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))
    }
}

impl DemandModel for LinearModel {
    fn predict(&self, features: &DemandFeatures) -> Result<f64, InferenceError> {
        let c = &self.coefficients;
        let weights = [c.hour_of_day, c.day, c.row, c.col];
        Ok(self.intercept
            + features
                .to_f64()
                .iter()
                .zip(weights)
                .map(|(x, w)| x * w)
                .sum::<f64>())
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

/// Load a model artifact, picking the format from the file extension
pub fn load_model(path: &Path) -> Result<Box<dyn DemandModel>, InferenceError> {
    if !path.exists() {
        return Err(InferenceError::ModelNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let model: Box<dyn DemandModel> = match extension.as_deref() {
        Some("json") => Box::new(LinearModel::from_path(path)?),
        Some("onnx") => Box::new(OnnxModel::from_path(path)?),
        _ => return Err(InferenceError::UnsupportedFormat(path.to_path_buf())),
    };

    info!("Loaded {} model from {}", model.kind(), path.display());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn linear() -> LinearModel {
        LinearModel {
            intercept: 1.0,
            coefficients: Coefficients {
                hour_of_day: 0.5,
                day: 0.1,
                row: -1.0,
                col: 2.0,
            },
        }
    }

    #[test]
    fn test_linear_predict() {
        let features = DemandFeatures {
            hour_of_day: 10,
            day: 20,
            row: 3,
            col: 1,
        };
        // 1 + 5 + 2 - 3 + 2
        let value = linear().predict(&features).unwrap();
        assert!((value - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_json_model() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(&linear()).unwrap().as_bytes())
            .unwrap();

        let model = load_model(file.path()).unwrap();
        assert_eq!(model.kind(), "linear");
    }

    #[test]
    fn test_missing_model() {
        let err = load_model(Path::new("no/such/model.json")).err().unwrap();
        assert!(matches!(err, InferenceError::ModelNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".pkl").tempfile().unwrap();
        let err = load_model(file.path()).err().unwrap();
        assert!(matches!(err, InferenceError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_malformed_json_model() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{\"intercept\": 1.0}").unwrap();

        let err = load_model(file.path()).err().unwrap();
        assert!(matches!(err, InferenceError::ModelLoadError(_)));
    }
}
