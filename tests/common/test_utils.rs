use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use penguin_mass::{
    config::ModelConfig,
    model::{self, LoadedModel},
    server::{self, handlers::AppState},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;

/// Training-time columns in the order `get_dummies` produced them.
pub const COLUMNS: [&str; 11] = [
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "species_Adelie",
    "species_Chinstrap",
    "species_Gentoo",
    "island_Biscoe",
    "island_Dream",
    "island_Torgersen",
    "sex_Female",
    "sex_Male",
];

/// Recorded prediction of the linear fixture for [`adelie_request`].
pub const ADELIE_EXPECTED_MASS: f64 = 4445.0;

/// Recorded prediction of the linear fixture for [`gentoo_request`].
pub const GENTOO_EXPECTED_MASS: f64 = 5355.0;

pub fn columns_json() -> String {
    json!(COLUMNS).to_string()
}

/// `float_input [N, 11] x coef [11, 1] + intercept`, with coefficients
/// `[10, 20, 30, 100, -100, 500, 0, 50, -50, -200, 200]` and intercept `-2000`.
pub fn linear_model_onnx() -> Vec<u8> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/penguin_model.onnx");
    std::fs::read(path).expect("Failed to read ONNX fixture")
}

pub fn adelie_request() -> Value {
    json!({
        "species": "Adelie",
        "island": "Torgersen",
        "bill_length_mm": 39.1,
        "bill_depth_mm": 18.7,
        "flipper_length_mm": 181.0,
        "sex": "Male"
    })
}

pub fn gentoo_request() -> Value {
    json!({
        "species": "Gentoo",
        "island": "Biscoe",
        "bill_length_mm": 46.1,
        "bill_depth_mm": 13.2,
        "flipper_length_mm": 211,
        "sex": "Female"
    })
}

/// Writes both artifacts into a fresh temp directory.
pub fn write_artifacts(model_bytes: &[u8], columns_json: &str) -> (TempDir, ModelConfig) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let model_path = temp_dir.path().join("penguin_model.onnx");
    let columns_path = temp_dir.path().join("model_columns.json");

    std::fs::write(&model_path, model_bytes).unwrap();
    std::fs::write(&columns_path, columns_json).unwrap();

    let config = ModelConfig {
        model_path: model_path.to_string_lossy().to_string(),
        columns_path: columns_path.to_string_lossy().to_string(),
    };
    (temp_dir, config)
}

pub async fn load_fixture() -> LoadedModel {
    let (_temp_dir, config) = write_artifacts(&linear_model_onnx(), &columns_json());
    model::load(&config).await.unwrap()
}

pub async fn create_test_app() -> Router {
    let model = load_fixture().await;
    server::router(AppState {
        model: Some(Arc::new(model)),
    })
}

pub fn create_app_without_model() -> Router {
    server::router(AppState { model: None })
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The graph computes in `f32`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-2,
        "Expected {}, got {}",
        expected,
        actual
    );
}
