use axum::Json;

use super::HealthResponse;
use crate::models::iso8601;

/// Liveness probe. Never touches the store.
///
/// # Endpoint
/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: iso8601(&chrono::Utc::now()),
    })
}
