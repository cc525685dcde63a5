//! The liveness check endpoint.

use axum::Json;
use serde::Serialize;

/// The body returned by the health check.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Always "ok" while the server is accepting requests.
    pub status: &'static str,
}

/// Report that the server is up. The database is not touched.
pub async fn get_health_endpoint() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
