//! Response types for the proxy endpoints
//!
//! The field names and casing here are the wire contract callers of
//! the proxy already parse, which is why `accountType`/`fullBalance`
//! are camelCase while `markets_count` is not.

use std::collections::BTreeMap;

use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check payload
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Fixed "ok" status
    pub status: String,
    /// Service identifier
    pub service: String,
}

impl HealthResponse {
    /// The fixed health payload
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: "exchange-proxy".to_string(),
        }
    }
}

/// Successful balance fetch payload
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    /// Always true
    pub success: bool,
    /// USDT total, 0.0 when the account holds none
    pub balance: f64,
    /// Echoed exchange name
    pub exchange: String,
    /// Echoed account type
    #[serde(rename = "accountType")]
    pub account_type: String,
    /// Complete total-balance mapping from the exchange
    #[serde(rename = "fullBalance")]
    pub full_balance: BTreeMap<String, Decimal>,
}

/// Successful connection test payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionTestResponse {
    /// Always true
    pub success: bool,
    /// Echoed exchange name
    pub exchange: String,
    /// Number of markets listed on the exchange
    pub markets_count: usize,
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl IntoResponse for BalanceResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl IntoResponse for ConnectionTestResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
