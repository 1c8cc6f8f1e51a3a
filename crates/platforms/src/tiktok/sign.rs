//! TikTok Shop request signing.
//!
//! The platform recomputes the signature byte-for-byte, so the concatenation
//! rules are an exact contract: path, then every query parameter as
//! `key` + `value` in lexicographic key order, then the raw body if any,
//! wrapped in the app secret on both sides, HMAC-SHA256 keyed with the app
//! secret, hex-encoded lowercase.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the `sign` query parameter for a request.
///
/// `params` must hold every query parameter that will be sent except `sign`
/// itself; the `BTreeMap` guarantees the lexicographic ordering the platform
/// expects.
pub(crate) fn compute_signature(
    app_secret: &str,
    path: &str,
    params: &BTreeMap<String, String>,
    body: Option<&str>,
) -> String {
    let mut base = String::from(path);
    for (key, value) in params {
        base.push_str(key);
        base.push_str(value);
    }
    if let Some(body) = body {
        base.push_str(body);
    }

    let to_sign = format!("{app_secret}{base}{app_secret}");

    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(to_sign.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_signature_is_deterministic() {
        let query = params(&[
            ("app_key", "abc123"),
            ("timestamp", "1700000000"),
            ("page_size", "20"),
        ]);
        let first = compute_signature("secret", "/order/202309/orders/search", &query, Some("{}"));
        let second = compute_signature("secret", "/order/202309/orders/search", &query, Some("{}"));
        assert_eq!(first, second);
        // 32-byte HMAC-SHA256 digest, lowercase hex
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(first, first.to_lowercase());
    }

    #[test]
    fn test_signature_independent_of_insertion_order() {
        let forward = params(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let mut reversed = BTreeMap::new();
        reversed.insert("c".to_string(), "3".to_string());
        reversed.insert("b".to_string(), "2".to_string());
        reversed.insert("a".to_string(), "1".to_string());

        assert_eq!(
            compute_signature("secret", "/path", &forward, None),
            compute_signature("secret", "/path", &reversed, None)
        );
    }

    #[test]
    fn test_body_changes_signature() {
        let query = params(&[("app_key", "abc123")]);
        let without = compute_signature("secret", "/path", &query, None);
        let with = compute_signature("secret", "/path", &query, Some("{\"order_status\":\"AWAITING_SHIPMENT\"}"));
        assert_ne!(without, with);
    }

    #[test]
    fn test_secret_changes_signature() {
        let query = params(&[("app_key", "abc123")]);
        assert_ne!(
            compute_signature("secret-a", "/path", &query, None),
            compute_signature("secret-b", "/path", &query, None)
        );
    }
}
