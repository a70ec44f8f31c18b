use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::state::SharedState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Epoch seconds at the time of the check.
    pub timestamp: f64,
    /// Whether the detection model loaded at boot.
    pub detector_loaded: bool,
    /// Whether the LLM backend answers its availability probe right now.
    pub llm_available: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Service health and boot-state flags", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    let llm_available = match &state.llm {
        Some(provider) => provider.available().await,
        None => false,
    };

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        detector_loaded: state.detector.is_some(),
        llm_available,
    })
}

#[derive(OpenApi)]
#[openapi(paths(health), components(schemas(HealthResponse)))]
pub struct ApiDoc;
