//! Adapter configuration loaded from the environment or built directly.
//!
//! # Environment Variables
//!
//! ## TikTok Shop
//! - `TIKTOK_APP_KEY` - Open-platform app key
//! - `TIKTOK_APP_SECRET` - Open-platform app secret (also the signing key)
//! - `TIKTOK_AUTH_PAGE_URL` - Optional authorization page override
//!
//! ## Mercado Libre
//! - `MERCADO_APP_ID` - Application id (OAuth client id)
//! - `MERCADO_CLIENT_SECRET` - OAuth client secret
//! - `MERCADO_REDIRECT_URI` - OAuth redirect target
//! - `MERCADO_AUTH_PAGE_URL` - Optional authorization page override (site
//!   specific, defaults to the Mexico site)
//!
//! Base API URLs default to the production endpoints and are public fields so
//! tests can point an adapter at a local mock server.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// TikTok Shop production API endpoint.
const TIKTOK_API_BASE_URL: &str = "https://open-api.tiktokglobalshop.com";
/// TikTok Shop token-exchange endpoint.
const TIKTOK_AUTH_API_BASE_URL: &str = "https://auth.tiktok-shops.com";
/// TikTok Shop seller authorization page.
const TIKTOK_AUTH_PAGE_URL: &str = "https://services.tiktokshop.com/open/authorize";

/// Mercado Libre production API endpoint.
const MERCADO_API_BASE_URL: &str = "https://api.mercadolibre.com";
/// Mercado Libre authorization page (per-country; Mexico by default).
const MERCADO_AUTH_PAGE_URL: &str = "https://auth.mercadolibre.com.mx/authorization";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is set but unusable.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))
}

/// TikTok Shop adapter configuration.
#[derive(Debug, Clone)]
pub struct TikTokConfig {
    /// Open-platform app key, sent as the `app_key` query parameter.
    pub app_key: String,
    /// App secret; keys the HMAC request signature.
    pub app_secret: SecretString,
    /// Base URL for signed API calls.
    pub api_base_url: String,
    /// Base URL for the token exchange/refresh endpoints.
    pub auth_api_base_url: String,
    /// Seller-facing authorization page.
    pub auth_page_url: Url,
}

impl TikTokConfig {
    /// Build a configuration against the production endpoints.
    ///
    /// # Panics
    ///
    /// Never panics in practice: only parses a known-good constant URL.
    #[must_use]
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: SecretString::from(app_secret.into()),
            api_base_url: TIKTOK_API_BASE_URL.to_string(),
            auth_api_base_url: TIKTOK_AUTH_API_BASE_URL.to_string(),
            auth_page_url: Url::parse(TIKTOK_AUTH_PAGE_URL).expect("constant URL is valid"),
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or an URL
    /// override does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::new(
            require_env("TIKTOK_APP_KEY")?,
            require_env("TIKTOK_APP_SECRET")?,
        );
        if let Ok(page) = std::env::var("TIKTOK_AUTH_PAGE_URL") {
            config.auth_page_url = parse_url("TIKTOK_AUTH_PAGE_URL", &page)?;
        }
        Ok(config)
    }
}

/// Mercado Libre adapter configuration.
#[derive(Debug, Clone)]
pub struct MercadoLibreConfig {
    /// Application id (OAuth client id).
    pub app_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
    /// OAuth redirect target registered with the application.
    pub redirect_uri: String,
    /// Base URL for API calls.
    pub api_base_url: String,
    /// Buyer-facing authorization page (site specific).
    pub auth_page_url: Url,
}

impl MercadoLibreConfig {
    /// Build a configuration against the production endpoints.
    ///
    /// # Panics
    ///
    /// Never panics in practice: only parses a known-good constant URL.
    #[must_use]
    pub fn new(
        app_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            redirect_uri: redirect_uri.into(),
            api_base_url: MERCADO_API_BASE_URL.to_string(),
            auth_page_url: Url::parse(MERCADO_AUTH_PAGE_URL).expect("constant URL is valid"),
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or an URL
    /// override does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::new(
            require_env("MERCADO_APP_ID")?,
            require_env("MERCADO_CLIENT_SECRET")?,
            require_env("MERCADO_REDIRECT_URI")?,
        );
        if let Ok(page) = std::env::var("MERCADO_AUTH_PAGE_URL") {
            config.auth_page_url = parse_url("MERCADO_AUTH_PAGE_URL", &page)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_production() {
        let config = TikTokConfig::new("key", "secret");
        assert_eq!(config.api_base_url, TIKTOK_API_BASE_URL);
        assert_eq!(config.auth_api_base_url, TIKTOK_AUTH_API_BASE_URL);

        let config = MercadoLibreConfig::new("id", "secret", "https://wms.example/cb");
        assert_eq!(config.api_base_url, MERCADO_API_BASE_URL);
        assert_eq!(config.auth_page_url.as_str(), MERCADO_AUTH_PAGE_URL);
    }
}
