use super::types::{
    ErrorResponse, PredictionRequest, PredictionResponse, STATUS_MESSAGE, StatusResponse,
};
use crate::{Error, model::LoadedModel};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    /// `None` when the artifacts failed to load at startup.
    pub model: Option<Arc<LoadedModel>>,
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE.to_string(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected prediction request: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;

    info!(
        "Received prediction request for species={} island={} sex={}",
        request.species, request.island, request.sex
    );

    let Some(model) = state.model.as_ref() else {
        error!("Prediction requested but no model is loaded");
        return Err(error_response(Error::ModelNotLoaded));
    };

    match model.predict(&request) {
        Ok(predicted_body_mass_g) => {
            info!("Predicted body mass: {:.2} g", predicted_body_mass_g);
            Ok(Json(PredictionResponse {
                predicted_body_mass_g,
            }))
        }
        Err(e) => {
            error!("Failed to predict body mass: {}", e);
            Err(error_response(e))
        }
    }
}

fn error_response(e: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        Error::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: format!("Prediction error: {}", e),
        }),
    )
}
