//! Connection test handler
//!
//! Verifies that an exchange is reachable without touching account
//! data: an unauthenticated connector fetches the public market
//! listing and the response carries the market count.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use common::model::exchange::ExchangeId;
use exchange_client::{ConnectorFactory, ExchangeConnector};

use crate::api::response::ConnectionTestResponse;
use crate::error::ApiError;
use crate::AppState;

/// Connection test request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConnectionTestRequest {
    /// Exchange name, case-insensitive
    pub exchange: Option<String>,
}

/// Test connectivity to an exchange
#[utoipa::path(
    post,
    path = "/test-connection",
    request_body = ConnectionTestRequest,
    responses(
        (status = 200, description = "Exchange reachable"),
        (status = 400, description = "Unsupported exchange"),
        (status = 401, description = "Bearer token rejected"),
        (status = 500, description = "Connection test failed")
    ),
    tag = "proxy"
)]
pub async fn test_connection(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConnectionTestRequest>,
) -> Result<ConnectionTestResponse, ApiError> {
    let exchange_name = request.exchange.unwrap_or_default().to_lowercase();

    let exchange: ExchangeId = exchange_name
        .parse()
        .map_err(|e: common::error::Error| ApiError::BadRequest(e.to_string()))?;

    // Past the name check, every failure collapses to one generic
    // response; this path has no auth/network taxonomy
    let markets_count = match state.connectors.public(exchange) {
        Ok(connector) => connector.fetch_market_count().await,
        Err(e) => Err(e),
    }
    .map_err(|e| ApiError::ConnectionTest(e.to_string()))?;

    info!("Connection test for {}: {} markets", exchange, markets_count);

    Ok(ConnectionTestResponse {
        success: true,
        exchange: exchange.to_string(),
        markets_count,
    })
}
