//! Prediction Route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use inference_engine::DemandFeatures;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::validation::{validate_min, validate_range, ValidationError, GRID_SIZE, MAX_HOUR_OF_DAY};
use crate::{ApiError, AppState};

/// Body of `POST /predict`
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DemandRequest {
    pub hour_of_day: i64,
    pub day: i64,
    pub row: i64,
    pub col: i64,
}

impl DemandRequest {
    /// Range-check every field and convert into model features
    pub fn validate(&self) -> Result<DemandFeatures, ValidationError> {
        Ok(DemandFeatures {
            hour_of_day: validate_range("hour_of_day", self.hour_of_day, 0, MAX_HOUR_OF_DAY)?,
            day: validate_min("day", self.day, 0)?,
            row: validate_range("row", self.row, 0, GRID_SIZE - 1)?,
            col: validate_range("col", self.col, 0, GRID_SIZE - 1)?,
        })
    }
}

/// Response of `POST /predict`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DemandResponse {
    pub demand: i64,
}

/// Predict taxi demand for one grid cell and hour
pub async fn predict_demand(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DemandRequest>, JsonRejection>,
) -> Result<Json<DemandResponse>, ApiError> {
    let Json(request) = payload?;
    let features = request.validate()?;

    let prediction = state.engine.predict(&features)?;
    debug!(
        "Predicted demand {} (raw={:.3}) for {:?}",
        prediction.demand, prediction.raw, features
    );

    Ok(Json(DemandResponse {
        demand: prediction.demand,
    }))
}
