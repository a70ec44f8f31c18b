use std::time::Instant;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use utoipa::{OpenApi, ToSchema};

use souschef_core::detect::mock::detect_mock;
use souschef_core::detect::DetectFallback;
use souschef_core::image::{decode_image, validate_image, MAX_FILE_SIZE};
use souschef_core::{map_detections, DetectionResult};

use crate::api::ErrorResponse;
use crate::state::{AppState, SharedState};

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct DetectRequest {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/detect",
    tag = "detect",
    request_body(content_type = "multipart/form-data", content = DetectRequest),
    responses(
        (status = 200, description = "Ingredients detected in the photo", body = DetectionResult),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 404, description = "No ingredients detected", body = ErrorResponse),
        (status = 503, description = "Detection model not loaded", body = ErrorResponse)
    )
)]
pub async fn detect(State(state): State<SharedState>, mut multipart: Multipart) -> Response {
    let started = Instant::now();

    // Find the "image" field
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("image") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return error_response(StatusCode::BAD_REQUEST, "No image file provided");
            }
            Err(e) => {
                tracing::warn!("Multipart read error: {}", e);
                let detail = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    "File too large. Maximum size is 10MB".to_string()
                } else {
                    format!("Failed to read multipart data: {}", e.body_text())
                };
                return error_response(e.status(), &detail);
            }
        }
    };

    let is_image = field
        .content_type()
        .map(|ct| ct.starts_with("image/"))
        .unwrap_or(false);
    if !is_image {
        return error_response(StatusCode::BAD_REQUEST, "File must be an image");
    }

    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            let detail = if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                "File too large. Maximum size is 10MB".to_string()
            } else {
                format!("Failed to read file data: {}", e.body_text())
            };
            return error_response(e.status(), &detail);
        }
    };

    if data.len() > MAX_FILE_SIZE {
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("File too large. Maximum size is {} bytes", MAX_FILE_SIZE),
        );
    }

    let (ingredients, confidence) = match run_detection(&state, &data) {
        Outcome::Detected(ingredients, confidence) => (ingredients, confidence),
        Outcome::Empty => match state.detector_config.fallback {
            DetectFallback::Mock => mock_detection(&state),
            DetectFallback::NotFound => {
                return error_response(StatusCode::NOT_FOUND, "No ingredients detected");
            }
        },
        Outcome::Unavailable => match state.detector_config.fallback {
            DetectFallback::Mock => mock_detection(&state),
            DetectFallback::NotFound => {
                return error_response(StatusCode::SERVICE_UNAVAILABLE, "Detection model not loaded");
            }
        },
    };

    Json(DetectionResult {
        ingredients,
        confidence,
        processing_time: started.elapsed().as_secs_f64(),
    })
    .into_response()
}

enum Outcome {
    Detected(Vec<String>, Vec<f32>),
    Empty,
    Unavailable,
}

/// Decode and run the real detector. Decode and inference failures are
/// treated as "no detections" so the fallback policy applies.
fn run_detection(state: &AppState, data: &[u8]) -> Outcome {
    let Some(detector) = &state.detector else {
        return Outcome::Unavailable;
    };

    if let Err(e) = validate_image(data) {
        tracing::warn!(error = %e, "Image validation failed, treating as no detections");
        return Outcome::Empty;
    }

    let image = match decode_image(data) {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!(error = %e, "Image decode failed, treating as no detections");
            return Outcome::Empty;
        }
    };

    match detector.detect(&image, state.detector_config.confidence_threshold) {
        Ok(detections) => {
            let (ingredients, confidence) =
                map_detections(&detections, state.detector_config.label_table);
            if ingredients.is_empty() {
                Outcome::Empty
            } else {
                Outcome::Detected(ingredients, confidence)
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Inference failed, treating as no detections");
            Outcome::Empty
        }
    }
}

fn mock_detection(state: &AppState) -> (Vec<String>, Vec<f32>) {
    let mut rng = state.rng.lock().unwrap();
    detect_mock(&mut *rng)
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}

#[derive(OpenApi)]
#[openapi(paths(detect), components(schemas(DetectRequest, DetectionResult)))]
pub struct ApiDoc;
