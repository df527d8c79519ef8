//! API error responses

use crate::validation::ValidationError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not valid JSON or does not match the request shape
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// A field is out of range
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The model failed to produce a prediction
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// JSON error body
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Json(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (
                    rejection.status(),
                    ErrorBody {
                        error: rejection.body_text(),
                        field: None,
                    },
                )
            }
            ApiError::Validation(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: err.to_string(),
                    field: Some(err.field()),
                },
            ),
            ApiError::Inference(err) => {
                error!("Prediction failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: err.to_string(),
                        field: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
