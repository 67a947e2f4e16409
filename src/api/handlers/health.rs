//! Handler for the health check endpoint.

use axum::Json;

use crate::api::dto::HealthResponse;

/// Returns a static liveness payload.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always 200; no dependency checks.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
