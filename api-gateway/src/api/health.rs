//! Health check handler

use crate::api::response::HealthResponse;

/// Health check
///
/// No auth, no side effects, no failure modes.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "proxy"
)]
pub async fn health_check() -> HealthResponse {
    HealthResponse::ok()
}
