//! Balance API handler
//!
//! Forwards an authenticated balance query to the target exchange and
//! normalizes the result. Credentials arrive in the request body, are
//! moved into a request-scoped connector and dropped with it.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use common::error::Error;
use common::model::exchange::{AccountType, Credentials, ExchangeId};
use exchange_client::{ConnectorFactory, ExchangeConnector};

use crate::api::response::BalanceResponse;
use crate::error::ApiError;
use crate::AppState;

/// Balance fetch request
///
/// Every field is optional at the type level; presence is validated by
/// hand so a missing field produces the gateway's own 400 body instead
/// of a framework rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BalanceRequest {
    /// Exchange name, case-insensitive
    pub exchange: Option<String>,
    /// Exchange API key
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
    /// Exchange API secret
    #[serde(rename = "apiSecret")]
    pub api_secret: Option<String>,
    /// Account-type hint, defaults to spot
    #[serde(rename = "accountType")]
    pub account_type: Option<String>,
}

/// Fetch the account balance from an exchange
#[utoipa::path(
    post,
    path = "/balance",
    request_body = BalanceRequest,
    responses(
        (status = 200, description = "Balance fetched successfully"),
        (status = 400, description = "Missing fields or unsupported exchange"),
        (status = 401, description = "Bearer token or exchange credentials rejected"),
        (status = 503, description = "Exchange unreachable"),
        (status = 500, description = "Internal server error")
    ),
    tag = "proxy"
)]
pub async fn fetch_balance(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BalanceRequest>,
) -> Result<BalanceResponse, ApiError> {
    let exchange_name = request.exchange.unwrap_or_default().to_lowercase();
    let api_key = request.api_key.unwrap_or_default();
    let api_secret = request.api_secret.unwrap_or_default();
    let account_type_hint = request.account_type.unwrap_or_else(|| "spot".to_string());

    // Presence check runs before name dispatch: an empty exchange name
    // is a missing field, not an unsupported exchange
    if exchange_name.is_empty() || api_key.is_empty() || api_secret.is_empty() {
        return Err(Error::MissingField(
            "exchange, apiKey and apiSecret are required".to_string(),
        )
        .into());
    }

    let exchange: ExchangeId = exchange_name.parse()?;
    let account_type = AccountType::parse_hint(&account_type_hint);

    // A fresh connector per request; credentials are never reused
    let connector = state
        .connectors
        .authenticated(exchange, Credentials::new(api_key, api_secret))?;

    let snapshot = connector.fetch_total_balance(account_type).await?;

    info!(
        "Fetched {} balance covering {} currencies",
        exchange,
        snapshot.totals.len()
    );

    Ok(BalanceResponse {
        success: true,
        balance: snapshot.usdt_total(),
        exchange: exchange.to_string(),
        account_type: account_type.to_string(),
        full_balance: snapshot.totals,
    })
}
