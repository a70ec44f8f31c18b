use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use souschef_core::BUILD_ID;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceDescriptor {
    pub message: String,
    pub version: String,
    pub build: String,
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service descriptor", body = ServiceDescriptor)
    )
)]
pub async fn root() -> impl IntoResponse {
    Json(ServiceDescriptor {
        message: "Souschef Kitchen Assistant API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: BUILD_ID.to_string(),
        status: "running".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(paths(root), components(schemas(ServiceDescriptor)))]
pub struct ApiDoc;
