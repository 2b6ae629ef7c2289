//! HMAC request signing for exchange REST APIs

use ring::hmac;

/// Sign a payload with HMAC-SHA256, returning the lowercase hex digest
///
/// Both Binance and Bybit expect this encoding for signed endpoints;
/// only the payload construction differs between them.
pub fn hmac_sha256_hex(secret: &str, payload: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, payload.as_bytes());
    hex::encode(tag.as_ref())
}
