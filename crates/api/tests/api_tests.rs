//! Router tests for the prediction server

use api::{create_router, AppState, DemandResponse, HealthResponse};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use inference_engine::{Coefficients, InferenceEngine, LinearModel};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn router() -> Router {
    // demand = 0.5 + 1*hour + 0*day + 10*row + 100*col
    let model = LinearModel {
        intercept: 0.5,
        coefficients: Coefficients {
            hour_of_day: 1.0,
            day: 0.0,
            row: 10.0,
            col: 100.0,
        },
    };
    let engine = InferenceEngine::with_model(model, "models/model.json");
    create_router(Arc::new(AppState::new(engine)))
}

fn predict_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_predict_returns_rounded_demand() {
    let (status, body) = send(predict_request(
        r#"{"hour_of_day": 2, "day": 1, "row": 3, "col": 4}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    // 0.5 + 2 + 30 + 400 = 432.5, ties to even
    let response: DemandResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response, DemandResponse { demand: 432 });
}

#[tokio::test]
async fn test_out_of_range_field_is_unprocessable() {
    let (status, body) = send(predict_request(
        r#"{"hour_of_day": 24, "day": 1, "row": 3, "col": 4}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["field"], "hour_of_day");
}

#[tokio::test]
async fn test_negative_day_rejected() {
    let (status, body) = send(predict_request(
        r#"{"hour_of_day": 0, "day": -1, "row": 0, "col": 0}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["field"], "day");
}

#[tokio::test]
async fn test_missing_field_is_client_error() {
    let (status, body) = send(predict_request(r#"{"hour_of_day": 0, "day": 0, "row": 0}"#)).await;

    assert!(status.is_client_error());
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("col"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, _) = send(predict_request("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_model() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.model.kind, "linear");
    assert_eq!(health.model.path, "models/model.json");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_state_from_config_loads_model() {
    let dir = tempfile::tempdir().unwrap();
    let models = dir.path().join("models");
    std::fs::create_dir_all(&models).unwrap();
    std::fs::write(
        models.join("model.json"),
        r#"{"intercept": 2.0, "coefficients": {"hour_of_day": 0.0, "day": 0.0, "row": 0.0, "col": 0.0}}"#,
    )
    .unwrap();

    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        format!(
            "data_ingestion:\n  artifact_dir: {root}\ndata_processing:\n  shift: 0\nweb:\n  host: 127.0.0.1\n  port: 0\n  model_output_dir: {models}\n  model_name: model.json\n",
            root = dir.path().display(),
            models = models.display()
        ),
    )
    .unwrap();

    let config = settings::read_config_with_env(&config_path, Default::default()).unwrap();
    let state = AppState::from_config(&config).unwrap();
    let app = create_router(Arc::new(state));

    let response = app
        .oneshot(predict_request(r#"{"hour_of_day": 5, "day": 0, "row": 0, "col": 0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
