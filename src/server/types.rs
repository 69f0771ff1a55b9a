use crate::features::PenguinRecord;
use serde::{Deserialize, Serialize};

pub const STATUS_MESSAGE: &str = "Penguin Prediction API is running";

/// Body of `POST /predict`. Every field is required.
pub type PredictionRequest = PenguinRecord;

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_body_mass_g: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
