//! Binance spot REST connector
//!
//! Balance queries go through the signed `/api/v3/account` endpoint;
//! the market listing uses the public `/api/v3/exchangeInfo`. Binance
//! signs requests with an HMAC-SHA256 of the query string and carries
//! the API key in the `X-MBX-APIKEY` header.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use common::error::{Error, Result};
use common::model::exchange::{AccountType, BalanceSnapshot, Credentials, ExchangeId};

use crate::config::ConnectorConfig;
use crate::connector::ExchangeConnector;
use crate::http::{HttpClient, HttpResponse};
use crate::sign::hmac_sha256_hex;

/// `/api/v3/account` response
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    /// Per-asset balances
    pub balances: Vec<AssetBalance>,
}

/// One entry of the account balance list
#[derive(Debug, Deserialize)]
pub struct AssetBalance {
    /// Asset code
    pub asset: String,
    /// Amount available for trading
    pub free: Decimal,
    /// Amount locked in open orders
    pub locked: Decimal,
}

/// `/api/v3/exchangeInfo` response, reduced to what the proxy needs
#[derive(Debug, Deserialize)]
pub struct ExchangeInfoResponse {
    /// Listed symbols
    pub symbols: Vec<SymbolInfo>,
}

/// One listed symbol
#[derive(Debug, Deserialize)]
pub struct SymbolInfo {
    /// Symbol name
    pub symbol: String,
}

/// Binance error payload
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: i64,
    msg: String,
}

/// Binance connector, one instance per request
pub struct BinanceConnector {
    http: HttpClient,
    credentials: Option<Credentials>,
    recv_window_ms: u64,
}

impl BinanceConnector {
    /// Create a connector, authenticated when credentials are given
    pub fn new(credentials: Option<Credentials>, config: &ConnectorConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config.binance_api_url.clone(), config.http_timeout)?,
            credentials,
            recv_window_ms: config.recv_window_ms,
        })
    }

    /// Registry constructor
    pub fn boxed(
        credentials: Option<Credentials>,
        config: &ConnectorConfig,
    ) -> Result<Box<dyn ExchangeConnector>> {
        Ok(Box::new(Self::new(credentials, config)?))
    }
}

/// Fold an account response into a total-balance snapshot
///
/// Total per asset is free + locked; assets with nothing held are
/// dropped so the mapping only carries actual holdings.
pub fn parse_account_response(body: &str) -> Result<BalanceSnapshot> {
    let account: AccountResponse = serde_json::from_str(body)?;

    let mut snapshot = BalanceSnapshot::new();
    for balance in account.balances {
        snapshot.add(balance.asset, balance.free + balance.locked);
    }

    Ok(snapshot)
}

/// Map a non-success response onto the error taxonomy
///
/// Binance rejects bad keys and signatures with 401/403; everything
/// else is surfaced as an exchange-level error with its code.
pub fn classify_error_response(response: &HttpResponse) -> Error {
    let detail = serde_json::from_str::<ErrorResponse>(&response.body).ok();

    match response.status {
        401 | 403 => Error::ExchangeAuth(
            detail
                .map(|e| e.msg)
                .unwrap_or_else(|| response.body.clone()),
        ),
        _ => match detail {
            Some(e) => Error::ExchangeApi {
                code: e.code,
                message: e.msg,
            },
            None => Error::ExchangeApi {
                code: i64::from(response.status),
                message: response.body.clone(),
            },
        },
    }
}

#[async_trait]
impl ExchangeConnector for BinanceConnector {
    fn id(&self) -> ExchangeId {
        ExchangeId::Binance
    }

    async fn fetch_total_balance(&self, _account_type: AccountType) -> Result<BalanceSnapshot> {
        // Binance has a single spot wallet; the account-type hint is
        // only echoed by the gateway.
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            Error::ExchangeAuth("API credentials required for balance queries".to_string())
        })?;

        let timestamp = Utc::now().timestamp_millis();
        let query = format!("timestamp={}&recvWindow={}", timestamp, self.recv_window_ms);
        let signature = hmac_sha256_hex(&credentials.api_secret, &query);
        let query = format!("{}&signature={}", query, signature);

        let response = self
            .http
            .get(
                "/api/v3/account",
                &query,
                &[("X-MBX-APIKEY", credentials.api_key.clone())],
            )
            .await?;

        if !response.is_success() {
            return Err(classify_error_response(&response));
        }

        parse_account_response(&response.body)
    }

    async fn fetch_market_count(&self) -> Result<usize> {
        let response = self.http.get("/api/v3/exchangeInfo", "", &[]).await?;

        if !response.is_success() {
            return Err(classify_error_response(&response));
        }

        let info: ExchangeInfoResponse = serde_json::from_str(&response.body)?;
        Ok(info.symbols.len())
    }
}
