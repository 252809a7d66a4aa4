//! Health check and fallback handlers

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::RESOURCE_NOT_FOUND;

/// API version reported by the health check
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub versao: &'static str,
}

/// GET /api/health - Liveness check, independent of the store
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        versao: API_VERSION,
    })
}

/// Fallback for unmatched routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "erro": RESOURCE_NOT_FOUND
        })),
    )
}
