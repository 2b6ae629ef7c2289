//! Bearer-token authentication for the protected routes
//!
//! The check runs as middleware layered onto the protected router, so
//! no handler logic executes for an unauthenticated request. The
//! health check is mounted outside that router and never passes
//! through here.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::AppState;

/// Reject requests that do not carry the configured bearer token
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Missing or invalid authorization".to_string()))?;

    if !token_matches(token, &state.config.api_key) {
        return Err(ApiError::Unauthorized("Invalid API key".to_string()));
    }

    Ok(next.run(request).await)
}

/// Constant-time token comparison
///
/// The secret is compared without early exit so response timing does
/// not leak how much of a guessed token matched.
fn token_matches(candidate: &str, secret: &str) -> bool {
    ring::constant_time::verify_slices_are_equal(candidate.as_bytes(), secret.as_bytes()).is_ok()
}
