use std::time::Duration;

use common::error::Error;
use common::model::exchange::{AccountType, Credentials, ExchangeId};
use exchange_client::binance::{classify_error_response, parse_account_response};
use exchange_client::bybit::{account_type_param, classify_ret_code, parse_wallet_balance};
use exchange_client::http::HttpResponse;
use exchange_client::sign::hmac_sha256_hex;
use exchange_client::{
    ConnectorConfig, ConnectorFactory, ExchangeConnector, LiveConnectorFactory, CONNECTORS,
};
use rust_decimal_macros::dec;

/// Config pointing at an unroutable address, for tests that must fail
/// before or without touching the network
fn offline_config() -> ConnectorConfig {
    ConnectorConfig {
        binance_api_url: "http://127.0.0.1:1".to_string(),
        bybit_api_url: "http://127.0.0.1:1".to_string(),
        http_timeout: Duration::from_millis(250),
        recv_window_ms: 5000,
    }
}

// ============================================================================
// Signing
// ============================================================================

#[test]
fn test_hmac_sha256_known_vector() {
    // RFC 4231 test case 2
    let signature = hmac_sha256_hex("Jefe", "what do ya want for nothing?");
    assert_eq!(
        signature,
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

// ============================================================================
// Binance response handling
// ============================================================================

#[test]
fn test_binance_account_parsing_sums_free_and_locked() {
    let body = r#"{
        "makerCommission": 10,
        "balances": [
            {"asset": "USDT", "free": "100.00", "locked": "23.45"},
            {"asset": "BTC", "free": "0.01", "locked": "0.00"},
            {"asset": "ETH", "free": "0.00", "locked": "0.00"}
        ]
    }"#;

    let snapshot = parse_account_response(body).unwrap();

    assert_eq!(snapshot.totals.get("USDT"), Some(&dec!(123.45)));
    assert_eq!(snapshot.totals.get("BTC"), Some(&dec!(0.01)));
    // Assets with nothing held are dropped from the mapping
    assert!(!snapshot.totals.contains_key("ETH"));
    assert_eq!(snapshot.usdt_total(), 123.45);
}

#[test]
fn test_binance_account_parsing_rejects_malformed_body() {
    assert!(matches!(
        parse_account_response("not json"),
        Err(Error::Serialization(_))
    ));
}

#[test]
fn test_binance_auth_rejection_classification() {
    let response = HttpResponse {
        status: 401,
        body: r#"{"code": -2014, "msg": "API-key format invalid."}"#.to_string(),
    };

    match classify_error_response(&response) {
        Error::ExchangeAuth(msg) => assert_eq!(msg, "API-key format invalid."),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_binance_server_error_classification() {
    let response = HttpResponse {
        status: 500,
        body: r#"{"code": -1000, "msg": "An unknown error occured while processing the request."}"#
            .to_string(),
    };

    match classify_error_response(&response) {
        Error::ExchangeApi { code, .. } => assert_eq!(code, -1000),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_binance_unparseable_error_body_falls_back_to_status() {
    let response = HttpResponse {
        status: 502,
        body: "<html>Bad Gateway</html>".to_string(),
    };

    match classify_error_response(&response) {
        Error::ExchangeApi { code, message } => {
            assert_eq!(code, 502);
            assert!(message.contains("Bad Gateway"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// ============================================================================
// Bybit response handling
// ============================================================================

#[test]
fn test_bybit_wallet_balance_parsing_sums_across_accounts() {
    let body = r#"{
        "retCode": 0,
        "retMsg": "OK",
        "result": {
            "list": [
                {"accountType": "UNIFIED", "coin": [
                    {"coin": "USDT", "walletBalance": "500.5"},
                    {"coin": "BTC", "walletBalance": "0.02"}
                ]},
                {"accountType": "SPOT", "coin": [
                    {"coin": "USDT", "walletBalance": "99.5"},
                    {"coin": "DOGE", "walletBalance": ""}
                ]}
            ]
        }
    }"#;

    let snapshot = parse_wallet_balance(body).unwrap();

    assert_eq!(snapshot.totals.get("USDT"), Some(&dec!(600.0)));
    assert_eq!(snapshot.totals.get("BTC"), Some(&dec!(0.02)));
    // Empty-string balances count as zero and are dropped
    assert!(!snapshot.totals.contains_key("DOGE"));
}

#[test]
fn test_bybit_auth_ret_code_classification() {
    let body = r#"{"retCode": 10003, "retMsg": "API key is invalid.", "result": null}"#;

    match parse_wallet_balance(body).unwrap_err() {
        Error::ExchangeAuth(msg) => assert!(msg.contains("API key is invalid.")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_bybit_non_auth_ret_code_classification() {
    match classify_ret_code(10001, "params error") {
        Error::ExchangeApi { code, message } => {
            assert_eq!(code, 10001);
            assert_eq!(message, "params error");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // Signature failures are credential problems
    assert!(matches!(
        classify_ret_code(10004, "error sign!"),
        Error::ExchangeAuth(_)
    ));
}

#[test]
fn test_bybit_account_type_mapping() {
    assert_eq!(account_type_param(AccountType::Spot), "SPOT");
    assert_eq!(account_type_param(AccountType::Unified), "UNIFIED");
}

// ============================================================================
// Registry and factory
// ============================================================================

#[test]
fn test_registry_covers_both_exchanges() {
    let ids: Vec<ExchangeId> = CONNECTORS.iter().map(|(id, _)| *id).collect();
    assert!(ids.contains(&ExchangeId::Binance));
    assert!(ids.contains(&ExchangeId::Bybit));
    assert_eq!(ids.len(), 2);
}

#[test]
fn test_factory_builds_connectors_for_every_registry_entry() {
    let factory = LiveConnectorFactory::new(offline_config());

    for (id, _) in CONNECTORS {
        let connector = factory.public(*id).unwrap();
        assert_eq!(connector.id(), *id);

        let connector = factory
            .authenticated(*id, Credentials::new("k", "s"))
            .unwrap();
        assert_eq!(connector.id(), *id);
    }
}

#[tokio::test]
async fn test_balance_fetch_without_credentials_fails_before_network() {
    let factory = LiveConnectorFactory::new(offline_config());

    // The base URL is unroutable, so an auth error here proves the
    // credential check runs before any network use
    for (id, _) in CONNECTORS {
        let connector = factory.public(*id).unwrap();
        let err = connector
            .fetch_total_balance(AccountType::Spot)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ExchangeAuth(_)));
    }
}

#[tokio::test]
async fn test_unreachable_exchange_classifies_as_network_error() {
    let factory = LiveConnectorFactory::new(offline_config());

    let connector = factory
        .authenticated(ExchangeId::Binance, Credentials::new("k", "s"))
        .unwrap();
    let err = connector
        .fetch_total_balance(AccountType::Spot)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network(_)));
}
