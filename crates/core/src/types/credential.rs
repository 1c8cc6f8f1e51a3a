//! Per-call marketplace credentials.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use super::Platform;

/// Safety buffer applied to expiry checks so a token that is about to lapse
/// mid-request is already treated as expired.
const EXPIRY_BUFFER_SECONDS: i64 = 60;

/// Credentials for one marketplace seller account.
///
/// Carried by the WMS on every call. Tokens are immutable values: a refresh
/// mints a brand-new `Credential` rather than mutating this one, and the WMS
/// is responsible for persisting the replacement between calls.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Platform this credential authenticates against.
    pub platform: Platform,
    /// OAuth access token for API requests.
    pub access_token: SecretString,
    /// Optional refresh token for minting new access tokens.
    pub refresh_token: Option<SecretString>,
    /// When the access token expires.
    pub access_token_expires_at: Option<DateTime<Utc>>,
    /// When the refresh token expires (if the platform bounds it).
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    /// Shop identifier (e.g. TikTok Shop's shop_id).
    pub shop_id: Option<String>,
    /// Opaque per-request shop secret some platforms require in addition to
    /// the access token (TikTok Shop's shop_cipher).
    pub shop_cipher: Option<String>,
    /// Seller identifier (e.g. Mercado Libre's user_id).
    pub seller_id: Option<String>,
}

impl Credential {
    /// Create a credential carrying only a platform and access token.
    #[must_use]
    pub fn new(platform: Platform, access_token: impl Into<String>) -> Self {
        Self {
            platform,
            access_token: SecretString::from(access_token.into()),
            refresh_token: None,
            access_token_expires_at: None,
            refresh_token_expires_at: None,
            shop_id: None,
            shop_cipher: None,
            seller_id: None,
        }
    }

    /// Check whether the access token has expired (with a 60 second buffer).
    ///
    /// A credential without a recorded expiry is treated as still valid.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_within(EXPIRY_BUFFER_SECONDS)
    }

    /// Check whether the access token expires within the given number of
    /// seconds from now.
    #[must_use]
    pub fn expires_within(&self, seconds: i64) -> bool {
        self.access_token_expires_at
            .is_some_and(|expires_at| Utc::now().timestamp() >= expires_at.timestamp() - seconds)
    }

    /// Check whether a refresh token is available and not itself expired.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
            && self.refresh_token_expires_at.is_none_or(|expires_at| {
                Utc::now().timestamp() < expires_at.timestamp() - EXPIRY_BUFFER_SECONDS
            })
    }

    /// The access token in the clear, for building authenticated requests.
    #[must_use]
    pub fn access_token_str(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// The refresh token in the clear, if present.
    #[must_use]
    pub fn refresh_token_str(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(ExposeSecret::expose_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn credential(expires_at: Option<DateTime<Utc>>) -> Credential {
        Credential {
            access_token_expires_at: expires_at,
            ..Credential::new(Platform::MercadoLibre, "token")
        }
    }

    #[test]
    fn test_credential_is_expired() {
        // Expired an hour ago
        assert!(credential(Some(Utc::now() - Duration::hours(1))).is_expired());

        // Expires in an hour
        assert!(!credential(Some(Utc::now() + Duration::hours(1))).is_expired());

        // Expires in 30 seconds (inside the 60s buffer)
        assert!(credential(Some(Utc::now() + Duration::seconds(30))).is_expired());

        // No recorded expiry
        assert!(!credential(None).is_expired());
    }

    #[test]
    fn test_can_refresh() {
        let mut with_refresh = credential(Some(Utc::now() - Duration::hours(1)));
        with_refresh.refresh_token = Some(SecretString::from("refresh"));
        with_refresh.refresh_token_expires_at = Some(Utc::now() + Duration::days(1));
        assert!(with_refresh.can_refresh());

        let without_refresh = credential(Some(Utc::now() - Duration::hours(1)));
        assert!(!without_refresh.can_refresh());

        let mut expired_refresh = credential(Some(Utc::now() - Duration::hours(1)));
        expired_refresh.refresh_token = Some(SecretString::from("refresh"));
        expired_refresh.refresh_token_expires_at = Some(Utc::now() - Duration::minutes(30));
        assert!(!expired_refresh.can_refresh());
    }
}
