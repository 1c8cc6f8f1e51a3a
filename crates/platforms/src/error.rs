//! Error taxonomy shared by every platform adapter.

use orderhub_core::Platform;
use thiserror::Error;

/// Errors that can occur when talking to a marketplace platform.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// HTTP request failed before a response was received (I/O, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Platform returned a non-2xx status.
    #[error("API request to {url} failed with status {status}: {snippet}")]
    Transport {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Truncated response body, for diagnostics.
        snippet: String,
    },

    /// Resource does not exist (HTTP 404). Probe-style lookups swallow this
    /// locally and fall through to the next interpretation of the id.
    #[error("not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Platform returned a well-formed error envelope (TikTok `code != 0`).
    #[error("platform API error: {message} (code {code})")]
    Api {
        /// Platform error code.
        code: i64,
        /// Platform error message.
        message: String,
        /// Platform request id, when echoed back.
        request_id: Option<String>,
    },

    /// Authorization-code exchange was rejected by the platform.
    #[error("authorization code exchange failed: {0}")]
    AuthExchange(String),

    /// Refresh was requested but the credential has no refresh token.
    #[error("no refresh token available")]
    RefreshUnavailable,

    /// The credential lacks the shop cipher this platform requires on signed
    /// requests.
    #[error("credential is missing the shop cipher required for signed requests")]
    MissingShopCipher,

    /// The credential carries an empty access token.
    #[error("credential has an empty access token")]
    MissingAccessToken,

    /// A request URL could not be constructed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Page size out of the platform's bounds, or an unparseable page token.
    #[error("invalid page parameters: {0}")]
    InvalidPageParams(String),

    /// The order has no shippable unit (no package / no shipment reference).
    #[error("order {0} has no shippable unit")]
    NoShipment(String),

    /// No adapter registered for the requested platform.
    #[error("no {service} adapter registered for platform {platform}")]
    UnsupportedPlatform {
        /// Requested platform.
        platform: Platform,
        /// Capability that was looked up.
        service: &'static str,
    },
}

impl IntegrationError {
    /// Whether this error is a missing-resource outcome rather than a
    /// transport or platform failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = IntegrationError::Transport {
            url: "https://api.example.com/orders".to_string(),
            status: 500,
            snippet: "internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request to https://api.example.com/orders failed with status 500: internal error"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = IntegrationError::Api {
            code: 105_001,
            message: "invalid shop cipher".to_string(),
            request_id: Some("req-1".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "platform API error: invalid shop cipher (code 105001)"
        );
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(IntegrationError::NotFound("x".to_string()).is_not_found());
        assert!(!IntegrationError::RefreshUnavailable.is_not_found());
    }
}
