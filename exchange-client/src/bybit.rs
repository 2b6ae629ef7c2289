//! Bybit v5 REST connector
//!
//! Balance queries use the signed `/v5/account/wallet-balance`
//! endpoint; the market listing uses the public
//! `/v5/market/instruments-info`. Bybit signs the concatenation of
//! timestamp, API key, receive window and query string, and reports
//! errors through a `retCode` envelope on HTTP 200.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use common::error::{Error, Result};
use common::model::exchange::{AccountType, BalanceSnapshot, Credentials, ExchangeId};

use crate::config::ConnectorConfig;
use crate::connector::ExchangeConnector;
use crate::http::HttpClient;
use crate::sign::hmac_sha256_hex;

/// retCodes that mean the credentials were rejected
const AUTH_RET_CODES: &[i64] = &[10003, 10004, 10005, 33004];

/// Bybit v5 response envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V5Response<T> {
    /// Bybit status code, 0 on success
    pub ret_code: i64,
    /// Status message
    pub ret_msg: String,
    /// Payload, present on success
    pub result: Option<T>,
}

/// `wallet-balance` result
#[derive(Debug, Deserialize)]
pub struct WalletBalanceResult {
    /// One entry per account
    pub list: Vec<WalletAccount>,
}

/// One account's coin holdings
#[derive(Debug, Deserialize)]
pub struct WalletAccount {
    /// Per-coin balances
    pub coin: Vec<CoinBalance>,
}

/// One coin entry of a wallet account
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinBalance {
    /// Coin code
    pub coin: String,
    /// Wallet balance; Bybit sends an empty string for unset fields
    #[serde(deserialize_with = "lenient_decimal")]
    pub wallet_balance: Decimal,
}

/// `instruments-info` result, reduced to what the proxy needs
#[derive(Debug, Deserialize)]
pub struct InstrumentsResult {
    /// Listed instruments
    pub list: Vec<InstrumentInfo>,
}

/// One listed instrument
#[derive(Debug, Deserialize)]
pub struct InstrumentInfo {
    /// Symbol name
    pub symbol: String,
}

/// Decimal field that may arrive as an empty string
fn lenient_decimal<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    raw.parse::<Decimal>().map_err(serde::de::Error::custom)
}

/// Bybit connector, one instance per request
pub struct BybitConnector {
    http: HttpClient,
    credentials: Option<Credentials>,
    recv_window_ms: u64,
}

impl BybitConnector {
    /// Create a connector, authenticated when credentials are given
    pub fn new(credentials: Option<Credentials>, config: &ConnectorConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config.bybit_api_url.clone(), config.http_timeout)?,
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

/// Map the account-type hint onto Bybit's `accountType` parameter
pub fn account_type_param(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Spot => "SPOT",
        AccountType::Unified => "UNIFIED",
    }
}

/// Map a nonzero retCode onto the error taxonomy
pub fn classify_ret_code(ret_code: i64, ret_msg: &str) -> Error {
    if AUTH_RET_CODES.contains(&ret_code) {
        Error::ExchangeAuth(format!("{} (retCode {})", ret_msg, ret_code))
    } else {
        Error::ExchangeApi {
            code: ret_code,
            message: ret_msg.to_string(),
        }
    }
}

/// Fold a wallet-balance response into a total-balance snapshot
///
/// Totals are summed per coin across all account entries; coins with
/// nothing held are dropped.
pub fn parse_wallet_balance(body: &str) -> Result<BalanceSnapshot> {
    let response: V5Response<WalletBalanceResult> = serde_json::from_str(body)?;

    if response.ret_code != 0 {
        return Err(classify_ret_code(response.ret_code, &response.ret_msg));
    }

    let result = response
        .result
        .ok_or_else(|| Error::Internal("Bybit wallet-balance response missing result".to_string()))?;

    let mut snapshot = BalanceSnapshot::new();
    for account in result.list {
        for coin in account.coin {
            snapshot.add(coin.coin, coin.wallet_balance);
        }
    }

    Ok(snapshot)
}

#[async_trait]
impl ExchangeConnector for BybitConnector {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bybit
    }

    async fn fetch_total_balance(&self, account_type: AccountType) -> Result<BalanceSnapshot> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            Error::ExchangeAuth("API credentials required for balance queries".to_string())
        })?;

        let timestamp = Utc::now().timestamp_millis().to_string();
        let query = format!("accountType={}", account_type_param(account_type));

        // Signature payload per Bybit v5: timestamp + key + window + query
        let payload = format!(
            "{}{}{}{}",
            timestamp, credentials.api_key, self.recv_window_ms, query
        );
        let signature = hmac_sha256_hex(&credentials.api_secret, &payload);

        let response = self
            .http
            .get(
                "/v5/account/wallet-balance",
                &query,
                &[
                    ("X-BAPI-API-KEY", credentials.api_key.clone()),
                    ("X-BAPI-TIMESTAMP", timestamp),
                    ("X-BAPI-RECV-WINDOW", self.recv_window_ms.to_string()),
                    ("X-BAPI-SIGN", signature),
                ],
            )
            .await?;

        if !response.is_success() {
            return Err(Error::ExchangeApi {
                code: i64::from(response.status),
                message: response.body,
            });
        }

        parse_wallet_balance(&response.body)
    }

    async fn fetch_market_count(&self) -> Result<usize> {
        let response = self
            .http
            .get("/v5/market/instruments-info", "category=spot", &[])
            .await?;

        if !response.is_success() {
            return Err(Error::ExchangeApi {
                code: i64::from(response.status),
                message: response.body,
            });
        }

        let envelope: V5Response<InstrumentsResult> = serde_json::from_str(&response.body)?;
        if envelope.ret_code != 0 {
            return Err(classify_ret_code(envelope.ret_code, &envelope.ret_msg));
        }

        let result = envelope.result.ok_or_else(|| {
            Error::Internal("Bybit instruments-info response missing result".to_string())
        })?;

        Ok(result.list.len())
    }
}
