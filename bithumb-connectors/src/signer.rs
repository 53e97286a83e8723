//! Request signing for private endpoints.
//!
//! Bithumb signs `path NUL body NUL nonce` with HMAC-SHA512 keyed by the
//! secret key. The digest is hex-encoded and the hex string is then
//! base64-encoded; the exchange verifies exactly this double encoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use url::form_urlencoded;

use bithumb_domain::Payload;

use crate::error::{BithumbError, BithumbResult};

type HmacSha512 = Hmac<Sha512>;

/// Encode a payload as `application/x-www-form-urlencoded`, keeping key order.
///
/// Output matches the exchange's reference encoder: `~` stays literal and
/// `*` is escaped, the reverse of the WHATWG form serializer.
pub fn url_encode(payload: &Payload) -> String {
    payload
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_component(key),
                encode_component(&value.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(input: &str) -> String {
    // `%7E` can only come from a literal `~`, since `%` itself becomes `%25`
    form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace("%7E", "~")
        .replace('*', "%2A")
}

/// Sign an already-encoded body.
pub fn sign(secret_key: &str, path: &str, encoded_payload: &str, nonce: &str) -> BithumbResult<String> {
    let message = format!("{}\0{}\0{}", path, encoded_payload, nonce);

    let mut mac = HmacSha512::new_from_slice(secret_key.as_bytes())
        .map_err(|e| BithumbError::Signature(format!("HMAC error: {}", e)))?;
    mac.update(message.as_bytes());

    let digest_hex = hex::encode(mac.finalize().into_bytes());
    Ok(STANDARD.encode(digest_hex.as_bytes()))
}

/// Encode and sign a payload in one step.
pub fn sign_payload(secret_key: &str, path: &str, payload: &Payload, nonce: &str) -> BithumbResult<String> {
    sign(secret_key, path, &url_encode(payload), nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const GOLDEN_BALANCE_SIGNATURE: &str = "MzcxMjQ0NGFkZWJkNTZjNDE5NTA4MmZjZmY0YzMxZjkyNDRhMDIzMjVmNzcwODcyMDcxODZlNzcyMjI1ODczYzFlNjM2NWQ2YWQwYjRmYTYzYThhZTEzZjU2OTlhODEwYzg5MTE3MzhiOTEwOGM4OTY1M2Y5MzA1N2NmMjMxZmE=";

    #[test]
    fn test_golden_signature() {
        let payload = Payload::new().with("currency", "BTC");

        let signature = sign_payload("secret", "/info/balance", &payload, "1700000000000").unwrap();

        assert_eq!(signature, GOLDEN_BALANCE_SIGNATURE);
    }

    #[test]
    fn test_golden_signature_multi_key_payload() {
        let payload = Payload::new()
            .with("order_currency", "BTC")
            .with("payment_currency", "KRW")
            .with("count", 100i64);

        let signature = sign_payload("secret", "/info/orders", &payload, "1700000000000").unwrap();

        assert_eq!(
            signature,
            "MTI2MjI5YTAxMTMzNWEyODFkNGYxZGZlMjVmNDhkYzNlMWVjMTk5Y2UzYmIyODk2MTY1Zjk1MTc2NmRmY2NkMGU5MjU0NmYwMjkyYzU0ZGVlNTU1ZjM2ZjhhM2E2NDgwNGVjNWQ4NzczNjY3MTUzZGQ5ZTdlODhlNDRlZjE4ZjA="
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let payload = Payload::new()
            .with("order_currency", "ETH")
            .with("units", dec!(0.5));

        let a = sign_payload("k", "/trade/market_buy", &payload, "1").unwrap();
        let b = sign_payload("k", "/trade/market_buy", &payload, "1").unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_depends_on_every_input() {
        let payload = Payload::new().with("currency", "BTC");
        let base = sign_payload("secret", "/info/balance", &payload, "1").unwrap();

        assert_ne!(base, sign_payload("other", "/info/balance", &payload, "1").unwrap());
        assert_ne!(base, sign_payload("secret", "/info/account", &payload, "1").unwrap());
        assert_ne!(base, sign_payload("secret", "/info/balance", &payload, "2").unwrap());
        assert_ne!(
            base,
            sign_payload("secret", "/info/balance", &Payload::new().with("currency", "ETH"), "1")
                .unwrap()
        );
    }

    #[test]
    fn test_signature_is_base64_of_hex_digest() {
        let signature = sign("secret", "/info/balance", "currency=BTC", "1").unwrap();
        let decoded = STANDARD.decode(signature).unwrap();

        // SHA-512 digest is 64 bytes, 128 hex characters
        assert_eq!(decoded.len(), 128);
        assert!(decoded.iter().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }

    #[test]
    fn test_url_encode_order_and_escaping() {
        let payload = Payload::new()
            .with("bank", "011_농협은행")
            .with("account", "123 45")
            .with("price", 0i64);

        assert_eq!(
            url_encode(&payload),
            "bank=011_%EB%86%8D%ED%98%91%EC%9D%80%ED%96%89&account=123+45&price=0"
        );
    }

    #[test]
    fn test_url_encode_tilde_and_asterisk() {
        let payload = Payload::new()
            .with("address", "a~b*c")
            .with("destination", "100%7E");

        assert_eq!(url_encode(&payload), "address=a~b%2Ac&destination=100%257E");
    }

    #[test]
    fn test_url_encode_reserved_characters() {
        let payload = Payload::new().with("account", "a&b=c/d+e");

        assert_eq!(url_encode(&payload), "account=a%26b%3Dc%2Fd%2Be");
    }

    #[test]
    fn test_url_encode_empty_payload() {
        assert_eq!(url_encode(&Payload::new()), "");
    }
}
